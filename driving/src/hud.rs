use bevy::{
    color::palettes::css::WHITE,
    diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin},
    prelude::*,
};
use drive_sim::GearState;

use crate::scene::Simulation;

/// Speed, gear and FPS overlay in the top-left corner.
pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_hud)
            .add_systems(Update, (update_drive_text, update_fps_counter));
    }
}

#[derive(Component)]
struct SpeedText;
#[derive(Component)]
struct GearText;
#[derive(Component)]
struct FpsCounterText;

const HUD_BG: Color = Color::srgba(0.0, 0.0, 0.0, 0.55);

pub fn speed_label(speed: f32) -> String {
    format!("Speed: {:.0}", speed.abs())
}

pub fn gear_label(gear: GearState) -> String {
    format!("Gear: {gear}")
}

fn hud_text(label: String) -> (Text, TextFont, TextColor) {
    (
        Text::new(label),
        TextFont {
            font_size: 18.0,
            ..default()
        },
        TextColor(WHITE.into()),
    )
}

fn setup_hud(mut commands: Commands) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(8.0),
                left: Val::Px(8.0),
                padding: UiRect::axes(Val::Px(8.0), Val::Px(4.0)),
                column_gap: Val::Px(20.0),
                ..default()
            },
            BackgroundColor(HUD_BG),
        ))
        .with_children(|parent| {
            parent.spawn((hud_text(speed_label(0.0)), SpeedText));
            parent.spawn((hud_text(gear_label(GearState::Neutral)), GearText));
            parent.spawn((hud_text("FPS: --".to_string()), FpsCounterText));
        });
}

fn update_drive_text(
    sim: Res<Simulation>,
    mut speed_query: Query<&mut Text, (With<SpeedText>, Without<GearText>)>,
    mut gear_query: Query<&mut Text, (With<GearText>, Without<SpeedText>)>,
) {
    let vehicle = sim.0.vehicle();
    if let Ok(mut text) = speed_query.single_mut() {
        text.0 = speed_label(vehicle.speed);
    }
    if let Ok(mut text) = gear_query.single_mut() {
        text.0 = gear_label(vehicle.gear());
    }
}

fn update_fps_counter(
    diagnostics: Res<DiagnosticsStore>,
    mut query: Query<&mut Text, With<FpsCounterText>>,
) {
    let Ok(mut text) = query.single_mut() else {
        return;
    };

    if let Some(fps) = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|value| value.smoothed())
    {
        text.0 = format!("FPS: {fps:>3.0}");
    }
}
