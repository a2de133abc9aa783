//! ContentRegistry resource providing lookups for loaded levels.

use bevy::prelude::*;
use std::collections::HashMap;

use super::data::*;

#[derive(Resource, Debug, Clone, Default)]
pub struct ContentRegistry {
    pub levels: HashMap<String, LevelDef>,
}

impl ContentRegistry {
    pub fn level(&self, id: &str) -> Option<&LevelDef> {
        self.levels.get(id)
    }

    pub fn insert_level(&mut self, def: LevelDef) {
        self.levels.insert(def.id.clone(), def);
    }

    /// Returns a summary of loaded content for logging.
    pub fn summary(&self) -> String {
        let mut ids: Vec<&str> = self.levels.keys().map(String::as_str).collect();
        ids.sort_unstable();
        format!(
            "ContentRegistry loaded:\n - Levels: {} ({})",
            ids.len(),
            ids.join(", ")
        )
    }
}
