//! Level domain: special-tile contact and level rebuilds.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::combat::{CombatTuning, Enemy, EnemyTuning};
use crate::content::ContentRegistry;
use crate::core::RunConfig;
use crate::level::events::{LevelRebuilt, SpecialTileTouched};
use crate::level::grid::{TileClass, TilePalette};
use crate::level::resources::{ActiveLevel, DoorContact, PendingLevel};
use crate::level::spawn::{SpawnParams, spawn_level_enemies, spawn_player};
use crate::movement::{Body, Jumps, Kinematics, MovementTuning, Player};

pub(crate) fn detect_special_tile_contact(
    level: Option<Res<ActiveLevel>>,
    mut contact: ResMut<DoorContact>,
    player_query: Query<&Body, With<Player>>,
    mut touched: MessageWriter<SpecialTileTouched>,
) {
    let Some(level) = level else {
        return;
    };
    let Ok(body) = player_query.single() else {
        return;
    };

    let now = DoorContact::at(&level.grid, body.rect());
    if now.door_a && !contact.door_a {
        info!("Player touched door A in level '{}'", level.id);
        touched.write(SpecialTileTouched {
            class: TileClass::DoorA,
        });
    } else if now.door_b && !contact.door_b {
        info!("Player touched door B in level '{}'", level.id);
        touched.write(SpecialTileTouched {
            class: TileClass::DoorB,
        });
    }
    *contact = now;
}

/// Build the pending level: swap the grid, replace every enemy, and move
/// the player (spawning it on first use) to the new spawn point.
#[allow(clippy::too_many_arguments)]
pub(crate) fn apply_pending_level(
    mut commands: Commands,
    mut pending: ResMut<PendingLevel>,
    registry: Option<Res<ContentRegistry>>,
    palette: Res<TilePalette>,
    movement: Res<MovementTuning>,
    combat: Res<CombatTuning>,
    enemy_tuning: Res<EnemyTuning>,
    run: Res<RunConfig>,
    mut contact: ResMut<DoorContact>,
    enemy_query: Query<Entity, With<Enemy>>,
    mut player_query: Query<(&mut Body, &mut Kinematics, &mut Jumps), With<Player>>,
    mut rebuilt: MessageWriter<LevelRebuilt>,
) {
    let Some(level_id) = pending.take() else {
        return;
    };
    let Some(registry) = registry else {
        warn!("Level '{}' requested before content was loaded", level_id);
        return;
    };
    let Some(def) = registry.level(&level_id) else {
        warn!("Requested unknown level '{}'", level_id);
        return;
    };
    let level = match ActiveLevel::from_def(def, &palette) {
        Ok(level) => level,
        Err(e) => {
            error!("Level '{}' could not be built: {}", level_id, e);
            return;
        }
    };

    let params = SpawnParams {
        movement: &movement,
        combat: &combat,
        enemy: &enemy_tuning,
    };

    for entity in &enemy_query {
        commands.entity(entity).despawn();
    }

    match player_query.single_mut() {
        Ok((mut body, mut kinematics, mut jumps)) => {
            body.position = level.spawn;
            kinematics.velocity_y = 0.0;
            kinematics.on_ground = false;
            jumps.reset();
        }
        Err(_) => {
            let entity = spawn_player(&mut commands, level.spawn, params);
            debug!("Spawned player {:?} at {:?}", entity, level.spawn);
        }
    }

    let mut rng = ChaCha8Rng::seed_from_u64(run.level_seed(&level.id));
    let enemies = spawn_level_enemies(&mut commands, &level.grid, params, &mut rng);

    let player_rect = Rect {
        min: level.spawn,
        max: level.spawn + movement.player_size(),
    };
    *contact = DoorContact::at(&level.grid, player_rect);

    info!(
        "Level '{}' built: {}x{} tiles, {} enemies",
        level.id,
        level.grid.cols(),
        level.grid.rows(),
        enemies
    );
    rebuilt.write(LevelRebuilt {
        level_id: level.id.clone(),
        enemies,
    });
    commands.insert_resource(level);
}
