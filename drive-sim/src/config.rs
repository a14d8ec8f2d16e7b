use std::path::Path;

use bevy::math::Vec3;
use serde::{Deserialize, Serialize};

use crate::camera::{CameraProjection, CameraRig};
use crate::vehicle::VehicleParams;

/// Tuning file for the driving demo.
///
/// Every field has a default, so an empty file is a valid config.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct DriveConfig {
    #[serde(default)]
    pub vehicle: VehicleConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub ground: GroundConfig,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct VehicleConfig {
    pub max_speed: f32,
    pub acceleration: f32,
    pub deceleration: f32,
    /// Degrees per second at full turn ratio.
    pub turn_speed_deg: f32,
    pub brake_factor: f32,
    pub turn_dead_zone: f32,
    pub ride_height: f32,
    /// Width, height and length of the car body.
    pub body_size: [f32; 3],
}

impl Default for VehicleConfig {
    fn default() -> Self {
        Self {
            max_speed: 20.0,
            acceleration: 15.0,
            deceleration: 20.0,
            turn_speed_deg: 60.0,
            brake_factor: 1.5,
            turn_dead_zone: 0.1,
            ride_height: 0.25,
            body_size: [1.0, 0.5, 2.5],
        }
    }
}

impl VehicleConfig {
    pub fn params(&self) -> VehicleParams {
        VehicleParams {
            max_speed: self.max_speed,
            acceleration: self.acceleration,
            deceleration: self.deceleration,
            turn_rate: self.turn_speed_deg.to_radians(),
            brake_factor: self.brake_factor,
            turn_dead_zone: self.turn_dead_zone,
            ride_height: self.ride_height,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Camera position relative to the car, in the car's frame.
    pub offset: [f32; 3],
    pub look_at_lift: f32,
    pub fov_deg: f32,
    pub near: f32,
    /// Extra tiles beyond the ground window radius covered by the far plane.
    pub far_margin_tiles: u32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            offset: [0.0, 4.0, -8.0],
            look_at_lift: 0.2,
            fov_deg: 70.0,
            near: 1.0,
            far_margin_tiles: 5,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct GroundConfig {
    /// Half-extent of the tile window, in tiles.
    pub radius: u32,
    pub tile_size: f32,
    pub tile_thickness: f32,
}

impl Default for GroundConfig {
    fn default() -> Self {
        Self {
            radius: 15,
            tile_size: 5.0,
            tile_thickness: 0.1,
        }
    }
}

impl DriveConfig {
    /// Load a config from a TOML file.
    pub fn load(path: &Path) -> Result<Self, String> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        let config = Self::from_toml(&text)
            .map_err(|e| format!("Failed to parse {}: {}", path.display(), e))?;
        tracing::info!("loaded drive config from {}", path.display());
        Ok(config)
    }

    /// Like [`DriveConfig::load`], but a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            tracing::warn!("{} not found, using default config", path.display());
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn from_toml(text: &str) -> Result<Self, String> {
        let config: Self = toml::from_str(text).map_err(|e| e.to_string())?;
        config.validate()?;
        Ok(config)
    }

    /// Save this config to a TOML file.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let text = toml::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;
        std::fs::write(path, text)
            .map_err(|e| format!("Failed to write {}: {}", path.display(), e))
    }

    pub fn validate(&self) -> Result<(), String> {
        let v = &self.vehicle;
        let checks = [
            (v.max_speed > 0.0, "vehicle.max_speed must be positive"),
            (v.acceleration > 0.0, "vehicle.acceleration must be positive"),
            (v.deceleration >= 0.0, "vehicle.deceleration must not be negative"),
            (v.turn_dead_zone >= 0.0, "vehicle.turn_dead_zone must not be negative"),
            (self.camera.near > 0.0, "camera.near must be positive"),
            (self.ground.tile_size > 0.0, "ground.tile_size must be positive"),
            (self.ground.tile_thickness > 0.0, "ground.tile_thickness must be positive"),
        ];
        match checks.iter().find(|(ok, _)| !ok) {
            Some((_, message)) => Err(message.to_string()),
            None => Ok(()),
        }
    }

    pub fn camera_rig(&self) -> CameraRig {
        CameraRig::new(Vec3::from_array(self.camera.offset), self.camera.look_at_lift)
    }

    /// Projection sized for the given viewport; the far plane reaches just past the tile window.
    pub fn projection(&self, viewport_width: f32, viewport_height: f32) -> CameraProjection {
        let far_tiles = self.ground.radius + self.camera.far_margin_tiles;
        CameraProjection {
            fov: self.camera.fov_deg.to_radians(),
            near: self.camera.near,
            far: far_tiles as f32 * self.ground.tile_size,
            viewport_width,
            viewport_height,
        }
    }
}
