//! Content definitions deserialized from RON files under `assets/data`.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::combat::{CombatTuning, EnemyTuning};
use crate::core::SimClock;
use crate::level::TilePalette;
use crate::movement::MovementTuning;

/// Wrapper for list-style data files.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataFile<T> {
    pub schema_version: u32,
    pub items: Vec<T>,
}

// ============================================================================
// Levels (levels.ron)
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize, Reflect)]
pub struct LevelDef {
    pub id: String,
    pub tile_size: f32,
    /// Spawn cell as (col, row), row 0 being the bottom row.
    pub spawn: (u32, u32),
    /// Rows as they read on screen, top row first.
    pub rows: Vec<String>,
    #[serde(default)]
    pub doors: DoorLinks,
}

/// Level reached through each door class. `None` means the door is inert.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, Reflect)]
pub struct DoorLinks {
    pub door_a: Option<String>,
    pub door_b: Option<String>,
}

// ============================================================================
// Simulation defaults (simulation_defaults.ron)
// ============================================================================

#[derive(Resource, Debug, Clone, Deserialize, Serialize)]
pub struct SimulationDefaults {
    pub schema_version: u32,
    pub start_level: String,
    #[serde(default)]
    pub clock: SimClock,
    #[serde(default)]
    pub palette: TilePalette,
    #[serde(default)]
    pub movement: MovementTuning,
    #[serde(default)]
    pub combat: CombatTuning,
    #[serde(default)]
    pub enemy: EnemyTuning,
}
