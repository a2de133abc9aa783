//! Level domain: spawning the player and enemies for a built level.

use bevy::prelude::*;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::combat::{
    AiControlled, CombatState, CombatTuning, Combatant, DeathState, Enemy, EnemyBrain,
    EnemyTuning, Health, Hitboxes,
};
use crate::level::grid::{TileClass, TileGrid};
use crate::movement::{Body, Jumps, Kinematics, Movable, MovementTuning, Player};

/// Tuning needed to build actors.
#[derive(Clone, Copy)]
pub struct SpawnParams<'a> {
    pub movement: &'a MovementTuning,
    pub combat: &'a CombatTuning,
    pub enemy: &'a EnemyTuning,
}

/// Height of the first enemy-solid surface at or below the bottom of cell
/// (col, row). The floor of the world counts as solid.
pub fn ground_below(grid: &TileGrid, col: i32, row: i32) -> f32 {
    let mut below = row - 1;
    while below >= 0 && !grid.is_solid_for_enemy(col, below) {
        below -= 1;
    }
    (below + 1) as f32 * grid.tile_size()
}

pub fn spawn_player(commands: &mut Commands, position: Vec2, params: SpawnParams<'_>) -> Entity {
    let profile = &params.combat.player;
    commands
        .spawn((
            Name::new("Player"),
            Player,
            Movable,
            Combatant,
            Body::new(position, params.movement.player_size()),
            Kinematics::default(),
            Jumps::new(params.movement.max_jumps),
            Health::new(profile.max_hp),
            CombatState::new(profile),
            DeathState::default(),
            Hitboxes::default(),
        ))
        .id()
}

pub fn spawn_enemy(
    commands: &mut Commands,
    position: Vec2,
    move_dir: f32,
    params: SpawnParams<'_>,
) -> Entity {
    let profile = &params.combat.enemy;
    commands
        .spawn((
            Name::new("Enemy"),
            Enemy,
            Movable,
            Combatant,
            AiControlled,
            Body::new(position, params.movement.enemy_size()),
            Kinematics::default(),
            Health::new(profile.max_hp),
            CombatState::new(profile),
            DeathState::default(),
            Hitboxes::default(),
            EnemyBrain::new(position.x, move_dir, params.enemy),
        ))
        .id()
}

/// One enemy per spawn cell, standing on the ground beneath it. Initial
/// patrol directions come from `rng`.
pub fn spawn_level_enemies(
    commands: &mut Commands,
    grid: &TileGrid,
    params: SpawnParams<'_>,
    rng: &mut ChaCha8Rng,
) -> usize {
    let mut count = 0;
    for (col, row) in grid.cells_of_class(TileClass::EnemySpawn) {
        let position = Vec2::new(col as f32 * grid.tile_size(), ground_below(grid, col, row));
        let move_dir = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        spawn_enemy(commands, position, move_dir, params);
        count += 1;
    }
    count
}
