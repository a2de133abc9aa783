//! Combat domain: messages for hits, deaths, and removals.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::combat::timer::DamageSource;

/// One point of damage landed on `target`.
#[derive(Debug, Clone, Copy)]
pub struct DamageEvent {
    pub source: Entity,
    pub target: Entity,
    pub kind: DamageSource,
    pub remaining_hp: u32,
}

impl Message for DamageEvent {}

#[derive(Debug, Clone, Copy)]
pub struct DeathEvent {
    pub entity: Entity,
}

impl Message for DeathEvent {}

/// Sent once, the tick the player's hit points reach zero.
#[derive(Debug, Clone, Copy)]
pub struct PlayerDied {
    pub entity: Entity,
}

impl Message for PlayerDied {}

/// An enemy finished its death animation and was despawned.
#[derive(Debug, Clone, Copy)]
pub struct EnemyRemoved {
    pub entity: Entity,
}

impl Message for EnemyRemoved {}
