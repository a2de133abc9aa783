//! Debug domain: read-only world snapshots for presentation and tooling.

use bevy::prelude::*;
use serde::Serialize;

use crate::combat::{CombatState, DeathState, EnemyBrain, Health, Hitboxes};
use crate::core::SimClock;
use crate::level::ActiveLevel;
use crate::movement::{Body, Facing, Kinematics, Player};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RectSnapshot {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl From<Rect> for RectSnapshot {
    fn from(rect: Rect) -> Self {
        Self {
            x: rect.min.x,
            y: rect.min.y,
            width: rect.width(),
            height: rect.height(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ActorKind {
    Player,
    Enemy,
}

/// Everything a renderer needs to draw one actor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActorSnapshot {
    pub id: u64,
    pub kind: ActorKind,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub facing: Facing,
    pub on_ground: bool,
    pub velocity_y: f32,
    pub hp: u32,
    pub max_hp: u32,
    pub attacking: bool,
    pub stunned: bool,
    pub dead: bool,
    pub death_animation_started: bool,
    pub ready_for_removal: bool,
    pub hurtbox: RectSnapshot,
    /// Present only while the weapon is live.
    pub weapon: Option<RectSnapshot>,
    /// Chase latch for enemies; `None` for the player.
    pub chasing: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorldSnapshot {
    pub tick: u64,
    pub level_id: Option<String>,
    /// Player first, then enemies in spawn order.
    pub actors: Vec<ActorSnapshot>,
}

impl WorldSnapshot {
    pub fn player(&self) -> Option<&ActorSnapshot> {
        self.actors.iter().find(|a| a.kind == ActorKind::Player)
    }

    pub fn enemies(&self) -> impl Iterator<Item = &ActorSnapshot> {
        self.actors.iter().filter(|a| a.kind == ActorKind::Enemy)
    }
}

pub fn capture_snapshot(world: &mut World) -> WorldSnapshot {
    let tick = world.get_resource::<SimClock>().map_or(0, |clock| clock.tick);
    let level_id = world
        .get_resource::<ActiveLevel>()
        .map(|level| level.id.clone());

    let mut query = world.query::<(
        Entity,
        &Body,
        &Kinematics,
        &Health,
        &CombatState,
        &DeathState,
        &Hitboxes,
        Option<&EnemyBrain>,
        Has<Player>,
    )>();

    let mut actors: Vec<ActorSnapshot> = query
        .iter(world)
        .map(
            |(entity, body, kinematics, health, combat, death, hitboxes, brain, is_player)| {
                ActorSnapshot {
                    id: entity.to_bits(),
                    kind: if is_player {
                        ActorKind::Player
                    } else {
                        ActorKind::Enemy
                    },
                    x: body.position.x,
                    y: body.position.y,
                    width: body.size.x,
                    height: body.size.y,
                    facing: body.facing,
                    on_ground: kinematics.on_ground,
                    velocity_y: kinematics.velocity_y,
                    hp: health.current,
                    max_hp: health.max,
                    attacking: combat.attack.is_attacking(),
                    stunned: combat.is_stunned(),
                    dead: death.dead,
                    death_animation_started: death.animation_started,
                    ready_for_removal: death.ready_for_removal,
                    hurtbox: hitboxes.hurtbox.into(),
                    weapon: hitboxes
                        .weapon_active()
                        .then(|| hitboxes.weapon.into()),
                    chasing: brain.map(|b| b.chasing),
                }
            },
        )
        .collect();

    actors.sort_by_key(|a| (a.kind != ActorKind::Player, a.id));

    WorldSnapshot {
        tick,
        level_id,
        actors,
    }
}
