//! Combat domain: tuning resources.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::combat::hitbox::WeaponShape;
use crate::combat::timer::HurtLockTuning;

/// Stats shared in shape by the player and every enemy.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FighterProfile {
    pub max_hp: u32,
    pub attack_duration: f32,
    pub attack_cooldown: f32,
    pub weapon: WeaponShape,
    /// Stun applied to this fighter when it takes a hit.
    pub stun_on_hit: f32,
    /// Knockback speed applied to this fighter when it takes a hit.
    pub knockback_on_hit: f32,
}

impl FighterProfile {
    pub fn player() -> Self {
        Self {
            max_hp: 5,
            attack_duration: 0.32,
            attack_cooldown: 0.0,
            weapon: WeaponShape {
                width: 14.0,
                height: 10.0,
                forward: 10.0,
                vertical: 4.0,
            },
            stun_on_hit: 0.2,
            knockback_on_hit: 120.0,
        }
    }

    pub fn enemy() -> Self {
        Self {
            max_hp: 3,
            attack_duration: 0.48,
            attack_cooldown: 1.0,
            weapon: WeaponShape {
                width: 14.0,
                height: 10.0,
                forward: 6.0,
                vertical: 4.0,
            },
            stun_on_hit: 0.3,
            knockback_on_hit: 140.0,
        }
    }
}

#[derive(Resource, Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CombatTuning {
    pub player: FighterProfile,
    pub enemy: FighterProfile,
    pub hurt_lock: HurtLockTuning,
    /// Linear knockback decay in px/s².
    pub knockback_friction: f32,
    pub death_animation_seconds: f32,
}

impl Default for CombatTuning {
    fn default() -> Self {
        Self {
            player: FighterProfile::player(),
            enemy: FighterProfile::enemy(),
            hurt_lock: HurtLockTuning::default(),
            knockback_friction: 600.0,
            death_animation_seconds: 0.6,
        }
    }
}

#[derive(Resource, Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct EnemyTuning {
    pub patrol_speed: f32,
    pub chase_speed: f32,
    pub aggro_radius: f32,
    pub disengage_radius: f32,
    pub attack_range: f32,
    /// Patrol bounds extend this far either side of the spawn point.
    pub patrol_half_range: f32,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            patrol_speed: 60.0,
            chase_speed: 90.0,
            aggro_radius: 140.0,
            disengage_radius: 180.0,
            attack_range: 40.0,
            patrol_half_range: 48.0,
        }
    }
}
