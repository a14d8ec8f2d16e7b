use tracing::trace;

use crate::camera::{CameraPose, CameraProjection, CameraRig};
use crate::config::DriveConfig;
use crate::ground::GroundGrid;
use crate::input::{DriveInput, InputController};
use crate::kinematics::KinematicsIntegrator;
use crate::vehicle::VehicleState;

/// Outcome of a single [`DriveSim::step`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// The ground window moved to a new center tile this frame.
    pub grid_rebuilt: bool,
    pub camera: CameraPose,
}

/// The whole per-frame core: vehicle, ground window and chase camera.
#[derive(Debug, Clone)]
pub struct DriveSim {
    vehicle: VehicleState,
    controller: InputController,
    integrator: KinematicsIntegrator,
    ground: GroundGrid,
    rig: CameraRig,
    projection: CameraProjection,
}

impl DriveSim {
    pub fn new(config: &DriveConfig, viewport_width: f32, viewport_height: f32) -> Self {
        let params = config.vehicle.params();
        let vehicle = VehicleState::at_rest(params.ride_height);
        let mut ground = GroundGrid::new(
            config.ground.radius,
            config.ground.tile_size,
            config.ground.tile_thickness,
        );
        ground.recenter(vehicle.position, true);

        Self {
            vehicle,
            controller: InputController::new(params),
            integrator: KinematicsIntegrator::new(params.ride_height),
            ground,
            rig: config.camera_rig(),
            projection: config.projection(viewport_width, viewport_height),
        }
    }

    /// Advance one frame: input, kinematics, ground window, camera, in that order.
    pub fn step(&mut self, input: DriveInput, dt: f32) -> FrameReport {
        self.controller.apply(&mut self.vehicle, input, dt);
        self.integrator.integrate(&mut self.vehicle, dt);
        let grid_rebuilt = self.ground.recenter(self.vehicle.position, false);
        let camera = self.rig.pose(&self.vehicle);

        trace!(
            speed = self.vehicle.speed,
            x = self.vehicle.position.x,
            z = self.vehicle.position.z,
            grid_rebuilt,
            "frame"
        );
        FrameReport {
            grid_rebuilt,
            camera,
        }
    }

    pub fn vehicle(&self) -> &VehicleState {
        &self.vehicle
    }

    pub fn ground(&self) -> &GroundGrid {
        &self.ground
    }

    pub fn camera(&self) -> CameraPose {
        self.rig.pose(&self.vehicle)
    }

    pub fn projection(&self) -> &CameraProjection {
        &self.projection
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.projection.resize(width, height);
    }
}

#[cfg(test)]
mod tests {
    use bevy::math::{IVec2, Vec3};

    use super::*;

    #[test]
    fn new_sim_has_a_built_window() {
        let sim = DriveSim::new(&DriveConfig::default(), 1280.0, 720.0);
        assert_eq!(sim.ground().center(), Some(IVec2::ZERO));
        assert_eq!(sim.ground().generation(), 1);
        assert_eq!(sim.vehicle().position, Vec3::new(0.0, 0.25, 0.0));
    }

    #[test]
    fn idle_frame_changes_nothing() {
        let mut sim = DriveSim::new(&DriveConfig::default(), 1280.0, 720.0);
        let before = *sim.vehicle();
        let report = sim.step(DriveInput::IDLE, 1.0 / 60.0);
        assert!(!report.grid_rebuilt);
        assert_eq!(*sim.vehicle(), before);
        assert_eq!(report.camera, sim.camera());
    }

    #[test]
    fn resize_reaches_the_projection() {
        let mut sim = DriveSim::new(&DriveConfig::default(), 1280.0, 720.0);
        sim.resize(640.0, 640.0);
        assert_eq!(sim.projection().aspect_ratio(), 1.0);
    }
}
