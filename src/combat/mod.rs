//! Combat domain: attack timing, hitboxes, damage, and enemy AI.

pub mod ai;
mod components;
mod events;
pub mod hitbox;
mod resources;
mod systems;
pub mod timer;

#[cfg(test)]
mod tests;

pub use ai::{AiContext, AiControlled, AiDecision, EnemyBrain, PlayerView, think};
pub use components::{CombatState, Combatant, DeathState, Enemy, Health, Knockback};
pub use events::{DamageEvent, DeathEvent, EnemyRemoved, PlayerDied};
pub use hitbox::{
    CLEARED, FighterMut, HitOutcome, Hitboxes, Threat, WeaponShape, apply_hit, pick_threat,
    refresh_hitboxes, strike_with_swing, weapon_hitbox,
};
pub use resources::{CombatTuning, EnemyTuning, FighterProfile};
pub use timer::{
    AttackPhase, AttackTick, AttackTimer, Countdown, DamageSource, HurtGuard, HurtLockTuning,
};

use bevy::prelude::*;

use crate::combat::ai::update_enemy_ai;
use crate::combat::systems::{
    advance_death_animations, despawn_finished_enemies, refresh_all_hitboxes,
    resolve_enemy_threats, resolve_player_strikes, start_player_attack, tick_combat_timers,
};
use crate::core::SimSet;

pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CombatTuning>()
            .init_resource::<EnemyTuning>()
            .add_message::<DamageEvent>()
            .add_message::<DeathEvent>()
            .add_message::<PlayerDied>()
            .add_message::<EnemyRemoved>()
            .add_systems(
                Update,
                (start_player_attack, update_enemy_ai)
                    .chain()
                    .in_set(SimSet::Intent),
            )
            .add_systems(Update, tick_combat_timers.in_set(SimSet::Timers))
            .add_systems(Update, refresh_all_hitboxes.in_set(SimSet::Hitboxes))
            .add_systems(
                Update,
                (resolve_player_strikes, resolve_enemy_threats)
                    .chain()
                    .in_set(SimSet::Damage),
            )
            .add_systems(
                Update,
                (advance_death_animations, despawn_finished_enemies)
                    .chain()
                    .in_set(SimSet::Cleanup),
            );
    }
}
