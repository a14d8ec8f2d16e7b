use std::path::PathBuf;

use color_eyre::Result;
use color_eyre::eyre::eyre;
use drive_sim::{DriveConfig, DriveScript, DriveSim};
use tracing::info;

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "drive_sim=info".into()),
        )
        .init();

    // drive-replay [script.toml] [config.toml]
    let mut args = std::env::args().skip(1);
    let script = match args.next() {
        Some(path) => DriveScript::load(&PathBuf::from(path)).map_err(|e| eyre!(e))?,
        None => DriveScript::demo(),
    };
    let config = match args.next().or_else(|| std::env::var("DRIVING_CONFIG").ok()) {
        Some(path) => DriveConfig::load_or_default(&PathBuf::from(path)).map_err(|e| eyre!(e))?,
        None => DriveConfig::default(),
    };

    let mut sim = DriveSim::new(&config, 1280.0, 720.0);
    let mut frames = 0usize;
    for (input, dt) in script.frames() {
        sim.step(input, dt);
        frames += 1;
    }

    let vehicle = sim.vehicle();
    let center = sim.ground().center().unwrap_or_default();
    info!(
        "replayed {} frames ({:.2}s of input)",
        frames,
        script.total_duration()
    );
    info!(
        "speed {:.3} ({}), position ({:.3}, {:.3}, {:.3}), yaw {:.1} deg",
        vehicle.speed,
        vehicle.gear(),
        vehicle.position.x,
        vehicle.position.y,
        vehicle.position.z,
        vehicle.yaw().to_degrees()
    );
    info!(
        "ground window centered on tile ({}, {}) after {} rebuilds",
        center.x,
        center.y,
        sim.ground().generation()
    );
    Ok(())
}
