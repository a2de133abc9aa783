//! Shared fixtures for unit and App-level tests.

use bevy::prelude::*;
use std::time::Duration;

use crate::SimulationPlugin;
use crate::content::{ContentRegistry, DoorLinks, LevelDef};
use crate::core::RunConfig;
use crate::level::{PendingLevel, TileGrid, TilePalette, parse_rows};
use crate::movement::Player;

pub(crate) const DT: f32 = 1.0 / 60.0;

/// Grid from rows written top-down, 16 px tiles, default palette.
/// `#` is solid, `?` door A, `>` door B, `E` enemy spawn, anything else empty.
pub(crate) fn grid(rows: &[&str]) -> TileGrid {
    let lines: Vec<String> = rows.iter().map(|r| r.to_string()).collect();
    TileGrid::new(parse_rows(&lines), 16.0, TilePalette::default()).unwrap()
}

pub(crate) fn level_def(id: &str, spawn: (u32, u32), rows: &[&str], doors: DoorLinks) -> LevelDef {
    LevelDef {
        id: id.to_string(),
        tile_size: 16.0,
        spawn,
        rows: rows.iter().map(|r| r.to_string()).collect(),
        doors,
    }
}

/// App with the core plugins, a manual clock, and `levels` registered.
/// The first `tick` builds `start`.
pub(crate) fn test_app(levels: Vec<LevelDef>, start: &str) -> App {
    let mut app = App::new();
    app.add_plugins(SimulationPlugin);
    app.init_resource::<Time>();
    app.insert_resource(RunConfig { seed: 7 });

    let mut registry = ContentRegistry::default();
    for level in levels {
        registry.insert_level(level);
    }
    app.insert_resource(registry);
    app.insert_resource(PendingLevel::to(start));
    app
}

pub(crate) fn tick(app: &mut App) {
    tick_by(app, DT);
}

pub(crate) fn tick_by(app: &mut App, seconds: f32) {
    app.world_mut()
        .resource_mut::<Time>()
        .advance_by(Duration::from_secs_f32(seconds));
    app.update();
}

pub(crate) fn player_entity(app: &mut App) -> Entity {
    let mut query = app.world_mut().query_filtered::<Entity, With<Player>>();
    query.single(app.world()).unwrap()
}
