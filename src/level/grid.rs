//! Level domain: the tile grid and its solidity classifier.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::overlaps;

pub type TileCode = u16;

pub const TILE_EMPTY: TileCode = 0;
pub const TILE_GRASS: TileCode = 1;
pub const TILE_RED_DOOR: TileCode = 2;
pub const TILE_AQUA_DOOR: TileCode = 3;
pub const TILE_DIRT: TileCode = 4;
pub const TILE_ENEMY_SPAWN: TileCode = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TileClass {
    #[default]
    Empty,
    Solid,
    DoorA,
    DoorB,
    EnemySpawn,
}

impl TileClass {
    pub fn is_door(self) -> bool {
        matches!(self, TileClass::DoorA | TileClass::DoorB)
    }
}

/// Which solidity rule a query uses. Enemies treat everything outside the
/// grid as solid so they never walk off the map; the player is clamped by
/// world bounds instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Solidity {
    #[default]
    Player,
    Enemy,
}

/// Maps tile codes to gameplay classes. Codes not listed are decorative.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TilePalette {
    pub solid: Vec<TileCode>,
    pub door_a: Vec<TileCode>,
    pub door_b: Vec<TileCode>,
    pub enemy_spawn: TileCode,
}

impl Default for TilePalette {
    fn default() -> Self {
        Self {
            solid: vec![TILE_GRASS],
            door_a: vec![TILE_RED_DOOR],
            door_b: vec![TILE_AQUA_DOOR],
            enemy_spawn: TILE_ENEMY_SPAWN,
        }
    }
}

impl TilePalette {
    pub fn classify(&self, code: TileCode) -> TileClass {
        if code == self.enemy_spawn {
            TileClass::EnemySpawn
        } else if self.solid.contains(&code) {
            TileClass::Solid
        } else if self.door_a.contains(&code) {
            TileClass::DoorA
        } else if self.door_b.contains(&code) {
            TileClass::DoorB
        } else {
            TileClass::Empty
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InvalidLevelLayout {
    Empty,
    RaggedRow {
        row: usize,
        len: usize,
        expected: usize,
    },
    BadTileSize(f32),
}

impl fmt::Display for InvalidLevelLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidLevelLayout::Empty => write!(f, "level layout has no tiles"),
            InvalidLevelLayout::RaggedRow { row, len, expected } => write!(
                f,
                "row {} has {} tiles, expected {}",
                row, len, expected
            ),
            InvalidLevelLayout::BadTileSize(size) => {
                write!(f, "tile size must be positive and finite, got {}", size)
            }
        }
    }
}

impl std::error::Error for InvalidLevelLayout {}

/// Immutable rows × cols array of tile codes. Row 0 is the bottom row and
/// y grows upward; cell (col, row) covers
/// `[col * tile_size, (col + 1) * tile_size) × [row * tile_size, (row + 1) * tile_size)`.
#[derive(Debug, Clone)]
pub struct TileGrid {
    rows: usize,
    cols: usize,
    tiles: Vec<TileCode>,
    tile_size: f32,
    palette: TilePalette,
}

impl TileGrid {
    /// Build a grid from bottom-up rows of codes.
    pub fn new(
        rows: Vec<Vec<TileCode>>,
        tile_size: f32,
        palette: TilePalette,
    ) -> Result<Self, InvalidLevelLayout> {
        if !tile_size.is_finite() || tile_size <= 0.0 {
            return Err(InvalidLevelLayout::BadTileSize(tile_size));
        }
        let Some(first) = rows.first() else {
            return Err(InvalidLevelLayout::Empty);
        };
        let cols = first.len();
        if cols == 0 {
            return Err(InvalidLevelLayout::Empty);
        }
        if let Some((row, bad)) = rows.iter().enumerate().find(|(_, r)| r.len() != cols) {
            return Err(InvalidLevelLayout::RaggedRow {
                row,
                len: bad.len(),
                expected: cols,
            });
        }

        Ok(Self {
            rows: rows.len(),
            cols,
            tiles: rows.into_iter().flatten().collect(),
            tile_size,
            palette,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    pub fn palette(&self) -> &TilePalette {
        &self.palette
    }

    pub fn world_width(&self) -> f32 {
        self.cols as f32 * self.tile_size
    }

    pub fn world_height(&self) -> f32 {
        self.rows as f32 * self.tile_size
    }

    pub fn in_bounds(&self, col: i32, row: i32) -> bool {
        col >= 0 && row >= 0 && (col as usize) < self.cols && (row as usize) < self.rows
    }

    /// Raw code at (row, col); the empty code out of range.
    pub fn tile(&self, row: i32, col: i32) -> TileCode {
        if !self.in_bounds(col, row) {
            return TILE_EMPTY;
        }
        self.tiles[row as usize * self.cols + col as usize]
    }

    pub fn classify(&self, row: i32, col: i32) -> TileClass {
        if !self.in_bounds(col, row) {
            return TileClass::Empty;
        }
        self.palette.classify(self.tile(row, col))
    }

    pub fn is_solid_for_player(&self, col: i32, row: i32) -> bool {
        self.is_solid(Solidity::Player, col, row)
    }

    pub fn is_solid_for_enemy(&self, col: i32, row: i32) -> bool {
        self.is_solid(Solidity::Enemy, col, row)
    }

    pub fn is_solid(&self, solidity: Solidity, col: i32, row: i32) -> bool {
        if !self.in_bounds(col, row) {
            return solidity == Solidity::Enemy;
        }
        let code = self.tile(row, col);
        code != self.palette.enemy_spawn && self.palette.classify(code) == TileClass::Solid
    }

    /// Column containing world x. Floors, so negative x maps to negative columns.
    pub fn column_at(&self, x: f32) -> i32 {
        (x / self.tile_size).floor() as i32
    }

    pub fn row_at(&self, y: f32) -> i32 {
        (y / self.tile_size).floor() as i32
    }

    pub fn cell_rect(&self, col: i32, row: i32) -> Rect {
        let min = Vec2::new(col as f32, row as f32) * self.tile_size;
        Rect {
            min,
            max: min + Vec2::splat(self.tile_size),
        }
    }

    /// Every (col, row) whose cell carries `class`, bottom row first.
    pub fn cells_of_class(&self, class: TileClass) -> impl Iterator<Item = (i32, i32)> + '_ {
        (0..self.rows as i32).flat_map(move |row| {
            (0..self.cols as i32)
                .filter(move |&col| self.classify(row, col) == class)
                .map(move |col| (col, row))
        })
    }

    /// True when `area` strictly overlaps any cell of `class`.
    pub fn touches_class(&self, area: Rect, class: TileClass) -> bool {
        if area.is_empty() {
            return false;
        }
        let (cols, rows) = self.cell_span(area);
        rows.into_iter().any(|row| {
            cols.clone().any(|col| {
                self.classify(row, col) == class && overlaps(area, self.cell_rect(col, row))
            })
        })
    }

    /// Inclusive column and row ranges of the cells `area` can touch.
    pub(crate) fn cell_span(
        &self,
        area: Rect,
    ) -> (std::ops::RangeInclusive<i32>, std::ops::RangeInclusive<i32>) {
        (
            self.column_at(area.min.x)..=self.column_at(area.max.x),
            self.row_at(area.min.y)..=self.row_at(area.max.y),
        )
    }
}
