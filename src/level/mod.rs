//! Level domain: tile grid, level building, and special-tile contact.

mod events;
mod flow;
mod grid;
mod layout;
mod resources;
mod spawn;
mod systems;


pub use events::{LevelRebuilt, SpecialTileTouched};
pub use flow::LevelFlowPlugin;
pub use grid::{
    InvalidLevelLayout, Solidity, TILE_AQUA_DOOR, TILE_DIRT, TILE_EMPTY, TILE_ENEMY_SPAWN,
    TILE_GRASS, TILE_RED_DOOR, TileClass, TileCode, TileGrid, TilePalette,
};
pub use layout::{build_grid, parse_rows, spawn_position, tile_code_for};
pub use resources::{ActiveLevel, DoorContact, PendingLevel};
pub use spawn::{SpawnParams, ground_below, spawn_enemy, spawn_level_enemies, spawn_player};

use bevy::prelude::*;

use crate::core::SimSet;
use crate::level::systems::{apply_pending_level, detect_special_tile_contact};

pub struct LevelPlugin;

impl Plugin for LevelPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<SpecialTileTouched>()
            .add_message::<LevelRebuilt>()
            .init_resource::<TilePalette>()
            .init_resource::<PendingLevel>()
            .init_resource::<DoorContact>()
            .add_systems(
                Update,
                (detect_special_tile_contact, apply_pending_level)
                    .chain()
                    .in_set(SimSet::Transition),
            );
    }
}
