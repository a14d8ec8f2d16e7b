use bevy::{diagnostic::FrameTimeDiagnosticsPlugin, prelude::*};

use driving::hud::HudPlugin;
use driving::scene::{DrivePlugin, INITIAL_HEIGHT, INITIAL_WIDTH};

fn main() {
    App::new()
        .add_plugins((
            DefaultPlugins.set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Driving".to_string(),
                    resolution: (INITIAL_WIDTH, INITIAL_HEIGHT).into(),
                    ..default()
                }),
                ..default()
            }),
            FrameTimeDiagnosticsPlugin::default(),
            DrivePlugin::from_env(),
            HudPlugin,
        ))
        .run();
}
