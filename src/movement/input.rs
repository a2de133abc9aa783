//! Movement domain: input adapter turning held buttons into player intent.

use bevy::prelude::*;

use crate::core::SimSet;
use crate::movement::systems::{derive_player_intent, read_keyboard_controls};

/// Per-tick commands for the player. `jump` and `attack` are one-shot edges:
/// the system that acts on each clears it.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PlayerIntent {
    pub move_left: bool,
    pub move_right: bool,
    pub jump: bool,
    pub attack: bool,
}

impl PlayerIntent {
    /// -1, 0 or +1. Both directions held cancel out.
    pub fn walk_axis(&self) -> f32 {
        match (self.move_left, self.move_right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonEdge {
    #[default]
    None,
    Pressed,
    Held,
    Released,
}

impl ButtonEdge {
    pub fn just_pressed(self) -> bool {
        self == ButtonEdge::Pressed
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeDetector {
    was_down: bool,
}

impl EdgeDetector {
    pub fn sample(&mut self, down: bool) -> ButtonEdge {
        let edge = match (self.was_down, down) {
            (false, true) => ButtonEdge::Pressed,
            (true, true) => ButtonEdge::Held,
            (true, false) => ButtonEdge::Released,
            (false, false) => ButtonEdge::None,
        };
        self.was_down = down;
        edge
    }
}

/// Device-level "is it down right now" state, filled by whatever reads the
/// hardware (or a script).
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RawControls {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub attack: bool,
}

#[derive(Resource, Debug, Default)]
pub struct ControlEdges {
    pub jump: EdgeDetector,
    pub attack: EdgeDetector,
}

pub struct InputAdapterPlugin {
    /// Read A/D/arrows, Space and J from `ButtonInput<KeyCode>` when present.
    pub keyboard: bool,
}

impl Plugin for InputAdapterPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<RawControls>()
            .init_resource::<ControlEdges>()
            .init_resource::<PlayerIntent>()
            .add_systems(Update, derive_player_intent.in_set(SimSet::Input));
        if self.keyboard {
            app.add_systems(
                Update,
                read_keyboard_controls
                    .in_set(SimSet::Input)
                    .before(derive_player_intent),
            );
        }
    }
}
