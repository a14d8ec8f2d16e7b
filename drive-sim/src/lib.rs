//! Per-frame simulation core of the driving demo: vehicle kinematics, a
//! chase camera and an endlessly recycled ground-tile window.

pub mod camera;
pub mod config;
pub mod ground;
pub mod input;
pub mod kinematics;
pub mod script;
pub mod sim;
pub mod vehicle;

pub use camera::{CameraPose, CameraProjection, CameraRig};
pub use config::DriveConfig;
pub use ground::{GroundGrid, TileShade, TileSlot};
pub use input::{DriveInput, InputController};
pub use kinematics::KinematicsIntegrator;
pub use script::DriveScript;
pub use sim::{DriveSim, FrameReport};
pub use vehicle::{GearState, VehicleParams, VehicleState};
