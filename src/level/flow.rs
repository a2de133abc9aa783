//! Level domain: door-to-level routing.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::core::SimSet;
use crate::level::events::SpecialTileTouched;
use crate::level::grid::TileClass;
use crate::level::resources::{ActiveLevel, PendingLevel};
use crate::level::systems::{apply_pending_level, detect_special_tile_contact};

/// Follows each level's door links when the player touches a door.
pub struct LevelFlowPlugin;

impl Plugin for LevelFlowPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            follow_door_links
                .in_set(SimSet::Transition)
                .after(detect_special_tile_contact)
                .before(apply_pending_level),
        );
    }
}

pub(crate) fn follow_door_links(
    mut touched: MessageReader<SpecialTileTouched>,
    level: Option<Res<ActiveLevel>>,
    mut pending: ResMut<PendingLevel>,
) {
    let Some(level) = level else {
        touched.clear();
        return;
    };
    for event in touched.read() {
        let target = match event.class {
            TileClass::DoorA => level.doors.door_a.as_ref(),
            TileClass::DoorB => level.doors.door_b.as_ref(),
            _ => None,
        };
        match target {
            Some(next) => {
                info!("Door {:?} in '{}' leads to '{}'", event.class, level.id, next);
                pending.request(next.clone());
            }
            None => debug!("Door {:?} in '{}' has no link", event.class, level.id),
        }
    }
}
