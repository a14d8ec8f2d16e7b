use crate::vehicle::VehicleState;

/// Moves the vehicle along its facing direction and pins it to the ground.
#[derive(Debug, Clone, Copy)]
pub struct KinematicsIntegrator {
    ride_height: f32,
}

impl KinematicsIntegrator {
    pub fn new(ride_height: f32) -> Self {
        Self { ride_height }
    }

    pub fn ride_height(&self) -> f32 {
        self.ride_height
    }

    pub fn integrate(&self, state: &mut VehicleState, dt: f32) {
        let dt = dt.max(0.0);
        let displacement = state.forward() * state.speed * dt;
        state.position += displacement;
        // Rotation must never lift or sink the car.
        state.position.y = self.ride_height;
    }
}
