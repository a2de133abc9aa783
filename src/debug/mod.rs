//! Debug domain: world snapshots and periodic snapshot logging.

mod snapshot;

pub use snapshot::{ActorKind, ActorSnapshot, RectSnapshot, WorldSnapshot, capture_snapshot};

use bevy::prelude::*;

use crate::core::{SimClock, SimSet};

/// Resource tracking debug logging state
#[derive(Resource, Debug)]
pub struct DebugState {
    /// Log a snapshot summary every this many ticks; 0 disables it.
    pub log_every_ticks: u64,
}

impl Default for DebugState {
    fn default() -> Self {
        Self {
            log_every_ticks: 60,
        }
    }
}

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugState>()
            .add_systems(Update, log_world_snapshot.after(SimSet::Transition));
    }
}

fn log_world_snapshot(world: &mut World) {
    let Some(every) = world.get_resource::<DebugState>().map(|s| s.log_every_ticks) else {
        return;
    };
    let Some(tick) = world.get_resource::<SimClock>().map(|c| c.tick) else {
        return;
    };
    if every == 0 || tick % every != 0 {
        return;
    }

    let snapshot = capture_snapshot(world);
    let Some(player) = snapshot.player() else {
        return;
    };
    let live_enemies = snapshot.enemies().filter(|e| !e.dead).count();
    debug!(
        "Tick {} [{}]: player at ({:.1}, {:.1}) hp {}/{}, {} live enemies",
        tick,
        snapshot.level_id.as_deref().unwrap_or("-"),
        player.x,
        player.y,
        player.hp,
        player.max_hp,
        live_enemies
    );
}
