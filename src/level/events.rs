//! Level domain: messages for tile contact and rebuilds.

use bevy::ecs::message::Message;

use crate::level::grid::TileClass;

/// The player started touching a special tile this tick.
#[derive(Debug, Clone, Copy)]
pub struct SpecialTileTouched {
    pub class: TileClass,
}

impl Message for SpecialTileTouched {}

#[derive(Debug, Clone)]
pub struct LevelRebuilt {
    pub level_id: String,
    pub enemies: usize,
}

impl Message for LevelRebuilt {}
