//! Content domain: RON-backed level definitions and simulation defaults.

mod data;
mod loader;
mod registry;
mod validation;


pub use data::{DataFile, DoorLinks, LevelDef, SimulationDefaults};
pub use loader::{ContentLoadError, load_all_content, parse_ron};
pub use registry::ContentRegistry;
pub use validation::{ValidationError, validate_content};

use bevy::prelude::*;

/// Installs loaded content and the tuning it carries.
pub struct ContentPlugin {
    pub registry: ContentRegistry,
    pub defaults: SimulationDefaults,
}

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        let registry = self.registry.clone();
        info!("{}", registry.summary());

        let defaults = self.defaults.clone();
        app.insert_resource(registry)
            .insert_resource(defaults.clock.clone())
            .insert_resource(defaults.palette.clone())
            .insert_resource(defaults.movement.clone())
            .insert_resource(defaults.combat.clone())
            .insert_resource(defaults.enemy.clone())
            .insert_resource(crate::level::PendingLevel::to(defaults.start_level.clone()))
            .insert_resource(defaults);
    }
}
