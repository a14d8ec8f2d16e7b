use bevy::math::{Quat, Vec3};

use crate::vehicle::{VehicleParams, VehicleState};

/// Pressed state of the four driving controls for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DriveInput {
    pub accelerate: bool,
    pub brake: bool,
    pub turn_left: bool,
    pub turn_right: bool,
}

impl DriveInput {
    pub const IDLE: DriveInput = DriveInput {
        accelerate: false,
        brake: false,
        turn_left: false,
        turn_right: false,
    };
}

/// Turns per-frame control signals into speed changes and yaw increments.
#[derive(Debug, Clone, Copy)]
pub struct InputController {
    params: VehicleParams,
}

impl InputController {
    pub fn new(params: VehicleParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &VehicleParams {
        &self.params
    }

    /// Apply one frame of input to `state`: throttle first, then steering.
    pub fn apply(&self, state: &mut VehicleState, input: DriveInput, dt: f32) {
        if dt <= 0.0 {
            return;
        }
        state.speed = self.next_speed(state.speed, input, dt);

        // Both turn increments are multiplied on in sequence, left first.
        for angle in self.yaw_increments(state.speed, input, dt) {
            state.orientation =
                (state.orientation * Quat::from_axis_angle(Vec3::Y, angle)).normalize();
        }
    }

    /// Speed after one frame of throttle, brake or coasting.
    pub fn next_speed(&self, speed: f32, input: DriveInput, dt: f32) -> f32 {
        let p = &self.params;
        if input.accelerate {
            (speed + p.acceleration * dt).min(p.max_speed)
        } else if input.brake {
            (speed - p.acceleration * dt * p.brake_factor).max(p.min_speed())
        } else {
            let decay = p.deceleration * dt;
            if speed > 0.0 {
                (speed - decay).max(0.0)
            } else if speed < 0.0 {
                (speed + decay).min(0.0)
            } else {
                0.0
            }
        }
    }

    /// Fraction of the full turn rate available at `speed`.
    ///
    /// Zero inside the dead zone, so a parked vehicle cannot rotate in place.
    pub fn turn_ratio(&self, speed: f32) -> f32 {
        let p = &self.params;
        if speed.abs() <= p.turn_dead_zone {
            return 0.0;
        }
        (speed.abs() / (p.max_speed * 0.5)).min(1.0)
    }

    /// Signed yaw increments for this frame, left turn before right turn.
    pub fn yaw_increments(
        &self,
        speed: f32,
        input: DriveInput,
        dt: f32,
    ) -> impl Iterator<Item = f32> {
        let ratio = self.turn_ratio(speed);
        let step = self.params.turn_rate * ratio * dt;
        let turning = ratio > 0.0;

        [
            (turning && input.turn_left).then_some(step),
            (turning && input.turn_right).then_some(-step),
        ]
        .into_iter()
        .flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn controller() -> InputController {
        InputController::new(VehicleParams::default())
    }

    fn pressed(accelerate: bool, brake: bool, turn_left: bool, turn_right: bool) -> DriveInput {
        DriveInput {
            accelerate,
            brake,
            turn_left,
            turn_right,
        }
    }

    #[test]
    fn accelerate_clamps_to_max_speed() {
        let c = controller();
        let speed = c.next_speed(19.9, pressed(true, false, false, false), 1.0);
        assert_eq!(speed, 20.0);
    }

    #[test]
    fn brake_is_stronger_and_clamps_to_half_reverse() {
        let c = controller();
        let speed = c.next_speed(0.0, pressed(false, true, false, false), 0.1);
        assert!((speed + 15.0 * 0.1 * 1.5).abs() < 1e-6);

        let floored = c.next_speed(-9.9, pressed(false, true, false, false), 1.0);
        assert_eq!(floored, -10.0);
    }

    #[test]
    fn accelerate_wins_over_brake() {
        let c = controller();
        let speed = c.next_speed(0.0, pressed(true, true, false, false), 0.1);
        assert!(speed > 0.0);
    }

    #[test]
    fn coasting_stops_exactly_at_zero() {
        let c = controller();
        assert_eq!(c.next_speed(0.1, DriveInput::IDLE, DT), 0.0);
        assert_eq!(c.next_speed(-0.1, DriveInput::IDLE, DT), 0.0);
        assert_eq!(c.next_speed(0.0, DriveInput::IDLE, DT), 0.0);
    }

    #[test]
    fn stationary_vehicle_cannot_turn() {
        let c = controller();
        let mut state = VehicleState::at_rest(0.25);
        c.apply(&mut state, pressed(false, false, true, false), DT);
        assert_eq!(state.orientation, Quat::IDENTITY);
    }

    #[test]
    fn dead_zone_is_exclusive() {
        let c = controller();
        assert_eq!(c.turn_ratio(0.1), 0.0);
        assert!(c.turn_ratio(0.11) > 0.0);
    }

    #[test]
    fn turn_ratio_saturates_at_half_max_speed() {
        let c = controller();
        assert!((c.turn_ratio(5.0) - 0.5).abs() < 1e-6);
        assert_eq!(c.turn_ratio(10.0), 1.0);
        assert_eq!(c.turn_ratio(-18.0), 1.0);
    }

    #[test]
    fn left_turn_increases_yaw() {
        let c = controller();
        let mut state = VehicleState {
            speed: 10.0,
            ..VehicleState::at_rest(0.25)
        };
        c.apply(&mut state, pressed(true, false, true, false), 0.5);
        // Full ratio at max speed: 60 deg/s for half a second.
        assert!((state.yaw() - 30f32.to_radians()).abs() < 1e-4);
    }

    #[test]
    fn opposite_turns_are_applied_in_order() {
        let c = controller();
        let increments: Vec<f32> = c
            .yaw_increments(10.0, pressed(false, false, true, true), DT)
            .collect();
        assert_eq!(increments.len(), 2);
        assert!(increments[0] > 0.0);
        assert_eq!(increments[0], -increments[1]);
    }

    #[test]
    fn negative_dt_is_a_no_op() {
        let c = controller();
        let mut state = VehicleState {
            speed: 4.0,
            ..VehicleState::at_rest(0.25)
        };
        let before = state;
        c.apply(&mut state, pressed(true, false, true, false), -0.5);
        assert_eq!(state, before);
    }
}
