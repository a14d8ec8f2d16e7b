use bevy::math::{Quat, Vec3};

use crate::vehicle::{VehicleState, yaw_of};

/// Chase camera that trails the vehicle by a fixed, vehicle-local offset.
///
/// Only the vehicle's yaw is applied to the offset, so the camera never banks
/// or pitches with the body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraRig {
    offset: Vec3,
    look_at_lift: f32,
}

/// Camera placement derived for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
}

impl CameraRig {
    pub fn new(offset: Vec3, look_at_lift: f32) -> Self {
        Self {
            offset,
            look_at_lift,
        }
    }

    pub fn offset(&self) -> Vec3 {
        self.offset
    }

    /// World-space offset from the vehicle to the camera.
    pub fn world_offset(&self, orientation: Quat) -> Vec3 {
        Quat::from_rotation_y(yaw_of(orientation)) * self.offset
    }

    pub fn pose(&self, vehicle: &VehicleState) -> CameraPose {
        CameraPose {
            position: vehicle.position + self.world_offset(vehicle.orientation),
            target: vehicle.position + Vec3::Y * self.look_at_lift,
            up: Vec3::Y,
        }
    }
}

/// Perspective parameters handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraProjection {
    /// Vertical field of view in radians.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub viewport_width: f32,
    pub viewport_height: f32,
}

impl CameraProjection {
    pub fn aspect_ratio(&self) -> f32 {
        self.viewport_width / self.viewport_height
    }

    /// Track a new viewport size. A zero-sized window (minimised) is ignored.
    pub fn resize(&mut self, width: f32, height: f32) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        self.viewport_width = width;
        self.viewport_height = height;
    }
}
