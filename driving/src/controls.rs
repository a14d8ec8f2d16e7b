use bevy::prelude::*;
use drive_sim::DriveInput;

/// Driving controls sampled this frame.
#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct DriveControls(pub DriveInput);

/// WASD and the arrow keys both drive the car.
pub fn drive_input(keyboard: &ButtonInput<KeyCode>) -> DriveInput {
    DriveInput {
        accelerate: keyboard.any_pressed([KeyCode::KeyW, KeyCode::ArrowUp]),
        brake: keyboard.any_pressed([KeyCode::KeyS, KeyCode::ArrowDown]),
        turn_left: keyboard.any_pressed([KeyCode::KeyA, KeyCode::ArrowLeft]),
        turn_right: keyboard.any_pressed([KeyCode::KeyD, KeyCode::ArrowRight]),
    }
}

pub fn read_keyboard(keyboard: Res<ButtonInput<KeyCode>>, mut controls: ResMut<DriveControls>) {
    controls.0 = drive_input(&keyboard);
}
