//! Validation for level layouts and cross-references between levels.

use super::data::*;
use super::registry::ContentRegistry;
use crate::level::{InvalidLevelLayout, TilePalette, build_grid};

/// A validation failure with context about what failed.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    MissingReference {
        source_type: &'static str,
        source_id: String,
        field: &'static str,
        target_type: &'static str,
        missing_id: String,
    },
    InvalidLayout {
        level_id: String,
        reason: InvalidLevelLayout,
    },
    SpawnOutOfBounds {
        level_id: String,
        spawn: (u32, u32),
        cols: usize,
        rows: usize,
    },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::MissingReference {
                source_type,
                source_id,
                field,
                target_type,
                missing_id,
            } => write!(
                f,
                "{} '{}' references missing {} '{}' in field '{}'",
                source_type, source_id, target_type, missing_id, field
            ),
            ValidationError::InvalidLayout { level_id, reason } => {
                write!(f, "Level '{}' has an invalid layout: {}", level_id, reason)
            }
            ValidationError::SpawnOutOfBounds {
                level_id,
                spawn,
                cols,
                rows,
            } => write!(
                f,
                "Level '{}' spawn cell {:?} lies outside its {}x{} grid",
                level_id, spawn, cols, rows
            ),
        }
    }
}

impl std::error::Error for ValidationError {}

macro_rules! check_ref {
    ($errors:expr, $registry_map:expr, $source_type:expr, $source_id:expr, $field:expr, $target_type:expr, $ref_id:expr) => {
        if !$registry_map.contains_key($ref_id) {
            $errors.push(ValidationError::MissingReference {
                source_type: $source_type,
                source_id: $source_id.to_string(),
                field: $field,
                target_type: $target_type,
                missing_id: $ref_id.to_string(),
            });
        }
    };
}

/// Validate layouts, spawns, door links, and the start level.
/// Returns every error found, empty if the content is usable.
pub fn validate_content(
    registry: &ContentRegistry,
    defaults: &SimulationDefaults,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    check_ref!(
        errors,
        registry.levels,
        "SimulationDefaults",
        "simulation_defaults",
        "start_level",
        "Level",
        &defaults.start_level
    );

    let mut ids: Vec<&String> = registry.levels.keys().collect();
    ids.sort_unstable();
    for id in ids {
        let level = &registry.levels[id];
        validate_level(level, &defaults.palette, &mut errors);

        if let Some(ref target) = level.doors.door_a {
            check_ref!(errors, registry.levels, "Level", id, "doors.door_a", "Level", target);
        }
        if let Some(ref target) = level.doors.door_b {
            check_ref!(errors, registry.levels, "Level", id, "doors.door_b", "Level", target);
        }
    }

    errors
}

fn validate_level(level: &LevelDef, palette: &TilePalette, errors: &mut Vec<ValidationError>) {
    match build_grid(level, palette) {
        Ok(grid) => {
            let (col, row) = level.spawn;
            if col as usize >= grid.cols() || row as usize >= grid.rows() {
                errors.push(ValidationError::SpawnOutOfBounds {
                    level_id: level.id.clone(),
                    spawn: level.spawn,
                    cols: grid.cols(),
                    rows: grid.rows(),
                });
            }
        }
        Err(reason) => errors.push(ValidationError::InvalidLayout {
            level_id: level.id.clone(),
            reason,
        }),
    }
}
