//! Simulation core of a tile-based 2D action platformer.

pub mod combat;
pub mod content;
pub mod core;
pub mod debug;
pub mod level;
pub mod movement;

#[cfg(test)]
mod test_support;

use bevy::app::PluginGroupBuilder;
use bevy::prelude::*;

/// Every core domain, in dependency order. Level routing and device input
/// are separate plugins (`LevelFlowPlugin`, `InputAdapterPlugin`).
pub struct SimulationPlugin;

impl PluginGroup for SimulationPlugin {
    fn build(self) -> PluginGroupBuilder {
        PluginGroupBuilder::start::<Self>()
            .add(core::CorePlugin)
            .add(level::LevelPlugin)
            .add(movement::MovementPlugin)
            .add(combat::CombatPlugin)
    }
}
