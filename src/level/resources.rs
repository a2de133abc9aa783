//! Level domain: the active level and pending transitions.

use bevy::prelude::*;

use crate::content::{DoorLinks, LevelDef};
use crate::level::grid::{InvalidLevelLayout, TileClass, TileGrid, TilePalette};
use crate::level::layout::{build_grid, spawn_position};

/// The grid every actor collides against this tick. Replaced wholesale on
/// a level change.
#[derive(Resource, Debug, Clone)]
pub struct ActiveLevel {
    pub id: String,
    pub grid: TileGrid,
    pub spawn: Vec2,
    pub doors: DoorLinks,
}

impl ActiveLevel {
    pub fn from_def(def: &LevelDef, palette: &TilePalette) -> Result<Self, InvalidLevelLayout> {
        Ok(Self {
            id: def.id.clone(),
            grid: build_grid(def, palette)?,
            spawn: spawn_position(def),
            doors: def.doors.clone(),
        })
    }
}

/// Level to build at the end of the current tick.
#[derive(Resource, Debug, Default)]
pub struct PendingLevel {
    level_id: Option<String>,
}

impl PendingLevel {
    pub fn to(level_id: impl Into<String>) -> Self {
        Self {
            level_id: Some(level_id.into()),
        }
    }

    /// Later requests in the same tick are ignored.
    pub fn request(&mut self, level_id: impl Into<String>) {
        if self.level_id.is_none() {
            self.level_id = Some(level_id.into());
        }
    }

    pub fn is_pending(&self) -> bool {
        self.level_id.is_some()
    }

    pub fn take(&mut self) -> Option<String> {
        self.level_id.take()
    }
}

/// Door contact seen on the previous tick, for rising-edge detection.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DoorContact {
    pub door_a: bool,
    pub door_b: bool,
}

impl DoorContact {
    pub fn at(grid: &TileGrid, area: Rect) -> Self {
        Self {
            door_a: grid.touches_class(area, TileClass::DoorA),
            door_b: grid.touches_class(area, TileClass::DoorB),
        }
    }
}
