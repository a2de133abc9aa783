//! Movement domain: actor pose, tile collision, and locomotion.

pub mod collision;
mod components;
mod input;
mod resources;
mod systems;


pub use collision::{
    HorizontalContact, MAX_SCAN_CELLS, VerticalContact, resolve_horizontal, resolve_vertical,
};
pub use components::{Body, Facing, Jumps, Kinematics, Movable, Player};
pub use input::{
    ButtonEdge, ControlEdges, EdgeDetector, InputAdapterPlugin, PlayerIntent, RawControls,
};
pub use resources::MovementTuning;
pub use systems::{apply_gravity, apply_knockback, clamp_to_world, try_jump, walk};

use bevy::prelude::*;

use crate::core::SimSet;
use crate::movement::systems::{move_enemies, move_player};

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MovementTuning>()
            .init_resource::<PlayerIntent>()
            .add_systems(
                Update,
                (move_player, move_enemies).chain().in_set(SimSet::Physics),
            );
    }
}
