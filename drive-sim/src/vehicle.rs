use std::fmt;

use bevy::math::{EulerRot, Quat, Vec3};

use crate::config::VehicleConfig;

/// Canonical forward axis of the vehicle body before any rotation.
pub const FORWARD: Vec3 = Vec3::Z;

/// Pose and speed of the player vehicle.
///
/// Created once when the scene starts and updated in place every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleState {
    pub position: Vec3,
    pub orientation: Quat,
    /// Signed speed along the forward axis. Negative while reversing.
    pub speed: f32,
}

impl VehicleState {
    /// A stationary vehicle at the origin, resting at `ride_height`.
    pub fn at_rest(ride_height: f32) -> Self {
        Self {
            position: Vec3::new(0.0, ride_height, 0.0),
            orientation: Quat::IDENTITY,
            speed: 0.0,
        }
    }

    /// Unit vector the vehicle is currently facing.
    pub fn forward(&self) -> Vec3 {
        (self.orientation * FORWARD).normalize()
    }

    /// Rotation about the vertical axis, in radians.
    pub fn yaw(&self) -> f32 {
        yaw_of(self.orientation)
    }

    pub fn gear(&self) -> GearState {
        GearState::from_speed(self.speed)
    }
}

/// Yaw component of an arbitrary orientation, ignoring pitch and roll.
pub fn yaw_of(orientation: Quat) -> f32 {
    let (yaw, _pitch, _roll) = orientation.to_euler(EulerRot::YXZ);
    yaw
}

/// Tuning constants shared by the input controller and the integrator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleParams {
    pub max_speed: f32,
    pub acceleration: f32,
    pub deceleration: f32,
    /// Yaw rate at full turn ratio, radians per second.
    pub turn_rate: f32,
    pub brake_factor: f32,
    pub turn_dead_zone: f32,
    pub ride_height: f32,
}

impl VehicleParams {
    /// Lowest speed the vehicle may reach. Reverse is capped at half the forward limit.
    pub fn min_speed(&self) -> f32 {
        -self.max_speed / 2.0
    }
}

impl Default for VehicleParams {
    fn default() -> Self {
        VehicleConfig::default().params()
    }
}

/// Gear shown on the HUD, derived from the sign of the speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GearState {
    Drive,
    Reverse,
    #[default]
    Neutral,
}

impl GearState {
    pub fn from_speed(speed: f32) -> Self {
        if speed > 0.0 {
            GearState::Drive
        } else if speed < 0.0 {
            GearState::Reverse
        } else {
            GearState::Neutral
        }
    }
}

impl fmt::Display for GearState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GearState::Drive => "Drive",
            GearState::Reverse => "Reverse",
            GearState::Neutral => "Neutral",
        };
        f.write_str(label)
    }
}
