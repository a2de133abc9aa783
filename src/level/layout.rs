//! Level domain: turns text level definitions into tile grids.

use bevy::prelude::*;

use crate::content::LevelDef;
use crate::level::grid::{
    InvalidLevelLayout, TILE_AQUA_DOOR, TILE_DIRT, TILE_EMPTY, TILE_ENEMY_SPAWN, TILE_GRASS,
    TILE_RED_DOOR, TileCode, TileGrid, TilePalette,
};

pub fn tile_code_for(ch: char) -> TileCode {
    match ch {
        '#' => TILE_GRASS,
        'd' => TILE_DIRT,
        '?' => TILE_RED_DOOR,
        '>' => TILE_AQUA_DOOR,
        'E' => TILE_ENEMY_SPAWN,
        _ => TILE_EMPTY,
    }
}

/// Parse rows written top-down (as they read on screen) into bottom-up
/// rows of codes.
pub fn parse_rows(lines: &[String]) -> Vec<Vec<TileCode>> {
    lines
        .iter()
        .rev()
        .map(|line| line.chars().map(tile_code_for).collect())
        .collect()
}

pub fn build_grid(def: &LevelDef, palette: &TilePalette) -> Result<TileGrid, InvalidLevelLayout> {
    TileGrid::new(parse_rows(&def.rows), def.tile_size, palette.clone())
}

/// World position of the player spawn: standing on top of the spawn cell.
pub fn spawn_position(def: &LevelDef) -> Vec2 {
    let (col, row) = def.spawn;
    Vec2::new(
        col as f32 * def.tile_size,
        row as f32 * def.tile_size + def.tile_size,
    )
}
