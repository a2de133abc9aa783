//! Movement domain: input sampling for locomotion.

use bevy::prelude::*;

use crate::movement::input::{ControlEdges, PlayerIntent, RawControls};

pub(crate) fn read_keyboard_controls(
    keyboard: Option<Res<ButtonInput<KeyCode>>>,
    mut raw: ResMut<RawControls>,
) {
    let Some(keyboard) = keyboard else {
        return;
    };
    raw.left = keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft);
    raw.right = keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight);
    raw.jump = keyboard.pressed(KeyCode::Space);
    raw.attack = keyboard.pressed(KeyCode::KeyJ);
}

pub(crate) fn derive_player_intent(
    raw: Res<RawControls>,
    mut edges: ResMut<ControlEdges>,
    mut intent: ResMut<PlayerIntent>,
) {
    let jump = edges.jump.sample(raw.jump);
    let attack = edges.attack.sample(raw.attack);
    *intent = PlayerIntent {
        move_left: raw.left,
        move_right: raw.right,
        jump: jump.just_pressed(),
        attack: attack.just_pressed(),
    };
}
