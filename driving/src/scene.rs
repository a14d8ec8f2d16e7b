use std::path::PathBuf;

use bevy::{prelude::*, window::PrimaryWindow, window::WindowResized};
use drive_sim::{CameraPose, CameraProjection, DriveConfig, DriveSim, TileShade, VehicleState};

use crate::controls::{self, DriveControls};

pub const INITIAL_WIDTH: u32 = 1280;
pub const INITIAL_HEIGHT: u32 = 720;

const SKY: Color = Color::srgb(0.3, 0.5, 0.8);
const CAR_COLOR: Color = Color::srgb(0.85, 0.1, 0.1);
const LIGHT_TILE: Color = Color::srgb(0.75, 0.75, 0.75);
const DARK_TILE: Color = Color::srgb(0.25, 0.25, 0.25);

/// Builds the driving scene and runs the simulation tick once per rendered frame.
pub struct DrivePlugin {
    /// Config file to load; defaults are used when `None`.
    pub config_path: Option<PathBuf>,
}

impl DrivePlugin {
    /// Config path from the first CLI argument, else `DRIVING_CONFIG`.
    pub fn from_env() -> Self {
        let config_path = std::env::args()
            .nth(1)
            .or_else(|| std::env::var("DRIVING_CONFIG").ok())
            .map(PathBuf::from);
        Self { config_path }
    }

    fn load_config(&self) -> DriveConfig {
        let Some(path) = &self.config_path else {
            return DriveConfig::default();
        };
        DriveConfig::load_or_default(path)
            .unwrap_or_else(|e| panic!("Failed to load drive config: {e}"))
    }
}

impl Plugin for DrivePlugin {
    fn build(&self, app: &mut App) {
        let config = self.load_config();
        let sim = DriveSim::new(&config, INITIAL_WIDTH as f32, INITIAL_HEIGHT as f32);
        info!(
            "ground window radius {} ({} tiles of {}m)",
            config.ground.radius,
            sim.ground().slots().len(),
            config.ground.tile_size
        );

        app.insert_resource(DriveSettings(config))
            .insert_resource(Simulation(sim))
            .init_resource::<DriveControls>()
            .insert_resource(ClearColor(SKY))
            .add_systems(Startup, (setup_scene, fit_viewport).chain())
            .add_systems(
                Update,
                (
                    handle_resize,
                    controls::read_keyboard,
                    step_simulation,
                    (sync_car, sync_ground_tiles, sync_camera, sync_projection),
                )
                    .chain(),
            );
    }
}

#[derive(Resource)]
pub struct DriveSettings(pub DriveConfig);

#[derive(Resource)]
pub struct Simulation(pub DriveSim);

#[derive(Component)]
pub struct PlayerCar;

/// Render entity mirroring one slot of the ground window.
#[derive(Component)]
pub struct GroundTile {
    pub slot: usize,
}

#[derive(Component)]
pub struct ChaseCamera;

pub fn shade_color(shade: TileShade) -> Color {
    match shade {
        TileShade::Light => LIGHT_TILE,
        TileShade::Dark => DARK_TILE,
    }
}

pub fn vehicle_transform(vehicle: &VehicleState) -> Transform {
    Transform::from_translation(vehicle.position).with_rotation(vehicle.orientation)
}

pub fn camera_transform(pose: &CameraPose) -> Transform {
    Transform::from_translation(pose.position).looking_at(pose.target, pose.up)
}

fn perspective(projection: &CameraProjection) -> Projection {
    Projection::Perspective(PerspectiveProjection {
        fov: projection.fov,
        near: projection.near,
        far: projection.far,
        aspect_ratio: projection.aspect_ratio(),
        ..default()
    })
}

fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    settings: Res<DriveSettings>,
    sim: Res<Simulation>,
) {
    let config = &settings.0;
    let sim = &sim.0;

    commands.spawn((
        Camera3d::default(),
        perspective(sim.projection()),
        camera_transform(&sim.camera()),
        ChaseCamera,
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 8_000.0,
            ..default()
        },
        Transform::default().looking_to(Vec3::new(-1.0, -0.8, -0.2), Vec3::Y),
    ));

    let [width, height, length] = config.vehicle.body_size;
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(width, height, length))),
        MeshMaterial3d(materials.add(CAR_COLOR)),
        vehicle_transform(sim.vehicle()),
        PlayerCar,
    ));

    // Slot entities live for the whole session; recentering only rewrites them.
    let ground = sim.ground();
    let tile_mesh = meshes.add(Cuboid::new(
        ground.tile_size(),
        ground.tile_thickness(),
        ground.tile_size(),
    ));
    for (slot_index, slot) in ground.slots().iter().enumerate() {
        commands.spawn((
            Mesh3d(tile_mesh.clone()),
            MeshMaterial3d(materials.add(shade_color(slot.shade))),
            Transform::from_translation(slot.translation),
            GroundTile { slot: slot_index },
        ));
    }
}

fn fit_viewport(window_query: Query<&Window, With<PrimaryWindow>>, mut sim: ResMut<Simulation>) {
    let Ok(window) = window_query.single() else {
        return;
    };
    sim.0.resize(window.width(), window.height());
}

fn handle_resize(mut resize_events: MessageReader<WindowResized>, mut sim: ResMut<Simulation>) {
    for event in resize_events.read() {
        sim.0.resize(event.width, event.height);
    }
}

fn step_simulation(time: Res<Time>, controls: Res<DriveControls>, mut sim: ResMut<Simulation>) {
    let report = sim.0.step(controls.0, time.delta_secs());
    if report.grid_rebuilt {
        debug!(
            "ground window moved to {:?}",
            sim.0.ground().center().unwrap_or_default()
        );
    }
}

fn sync_car(sim: Res<Simulation>, mut car_query: Query<&mut Transform, With<PlayerCar>>) {
    let Ok(mut transform) = car_query.single_mut() else {
        return;
    };
    *transform = vehicle_transform(sim.0.vehicle());
}

fn sync_ground_tiles(
    sim: Res<Simulation>,
    mut synced_generation: Local<u64>,
    mut tile_query: Query<(&GroundTile, &mut Transform, &MeshMaterial3d<StandardMaterial>)>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let ground = sim.0.ground();
    if ground.generation() == *synced_generation {
        return;
    }
    *synced_generation = ground.generation();

    for (tile, mut transform, material_handle) in &mut tile_query {
        let Some(slot) = ground.slots().get(tile.slot) else {
            continue;
        };
        transform.translation = slot.translation;
        // A material that is not loaded yet keeps its old color.
        if let Some(material) = materials.get_mut(&material_handle.0) {
            material.base_color = shade_color(slot.shade);
        }
    }
}

fn sync_camera(sim: Res<Simulation>, mut camera_query: Query<&mut Transform, With<ChaseCamera>>) {
    let Ok(mut transform) = camera_query.single_mut() else {
        return;
    };
    *transform = camera_transform(&sim.0.camera());
}

fn sync_projection(
    sim: Res<Simulation>,
    mut applied: Local<Option<CameraProjection>>,
    mut camera_query: Query<&mut Projection, With<ChaseCamera>>,
) {
    let current = *sim.0.projection();
    if *applied == Some(current) {
        return;
    }
    let Ok(mut projection) = camera_query.single_mut() else {
        return;
    };
    *projection = perspective(&current);
    *applied = Some(current);
}

#[cfg(test)]
mod tests {
    use drive_sim::DriveInput;

    use super::*;

    #[test]
    fn bundled_config_matches_defaults() {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/drive.toml");
        let plugin = DrivePlugin {
            config_path: Some(path),
        };
        assert_eq!(plugin.load_config(), DriveConfig::default());
    }

    #[test]
    fn tile_shades_use_distinct_colors() {
        assert_ne!(shade_color(TileShade::Light), shade_color(TileShade::Dark));
    }

    #[test]
    fn car_transform_matches_vehicle_pose() {
        let mut sim = DriveSim::new(&DriveConfig::default(), 1280.0, 720.0);
        let input = DriveInput {
            accelerate: true,
            turn_right: true,
            ..DriveInput::IDLE
        };
        for _ in 0..90 {
            sim.step(input, 1.0 / 60.0);
        }
        let transform = vehicle_transform(sim.vehicle());
        assert_eq!(transform.translation, sim.vehicle().position);
        assert!(transform.forward().as_vec3().abs_diff_eq(-sim.vehicle().forward(), 1e-5));
    }

    #[test]
    fn camera_looks_at_the_car() {
        let sim = DriveSim::new(&DriveConfig::default(), 1280.0, 720.0);
        let pose = sim.camera();
        let transform = camera_transform(&pose);
        let to_target = (pose.target - pose.position).normalize();
        assert!(transform.forward().as_vec3().abs_diff_eq(to_target, 1e-5));
    }
}
