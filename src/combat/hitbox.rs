//! Combat domain: hurtbox and weapon rectangles, and hit application.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::combat::components::{CombatState, DeathState, Health};
use crate::combat::resources::FighterProfile;
use crate::combat::timer::{DamageSource, HurtGuard};
use crate::core::overlaps;
use crate::movement::{Body, Facing};

/// Zero-area rectangle used for an inactive weapon.
pub const CLEARED: Rect = Rect {
    min: Vec2::ZERO,
    max: Vec2::ZERO,
};

/// Weapon box size and its offset from the wielder's leading edge.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct WeaponShape {
    pub width: f32,
    pub height: f32,
    pub forward: f32,
    pub vertical: f32,
}

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Hitboxes {
    pub hurtbox: Rect,
    pub weapon: Rect,
}

impl Default for Hitboxes {
    fn default() -> Self {
        Self {
            hurtbox: CLEARED,
            weapon: CLEARED,
        }
    }
}

impl Hitboxes {
    pub fn weapon_active(&self) -> bool {
        !self.weapon.is_empty()
    }

    pub fn clear_weapon(&mut self) {
        self.weapon = CLEARED;
    }
}

pub fn weapon_hitbox(body: &Body, shape: &WeaponShape) -> Rect {
    let x = match body.facing {
        Facing::Right => body.right() + shape.forward,
        Facing::Left => body.left() - shape.forward - shape.width,
    };
    let min = Vec2::new(x, body.bottom() + shape.vertical);
    Rect {
        min,
        max: min + Vec2::new(shape.width, shape.height),
    }
}

/// Recompute both rectangles from the settled pose. The weapon is live only
/// while swinging and alive.
pub fn refresh_hitboxes(
    hitboxes: &mut Hitboxes,
    body: &Body,
    combat: &CombatState,
    death: &DeathState,
    shape: &WeaponShape,
) {
    hitboxes.hurtbox = body.rect();
    hitboxes.weapon = if combat.attack.is_attacking() && !death.is_dead() {
        weapon_hitbox(body, shape)
    } else {
        CLEARED
    };
}

/// Mutable view of everything a hit touches on its target.
pub struct FighterMut<'a> {
    pub body: &'a Body,
    pub health: &'a mut Health,
    pub combat: &'a mut CombatState,
    pub death: &'a mut DeathState,
    pub hitboxes: &'a mut Hitboxes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitOutcome {
    pub remaining_hp: u32,
    pub killed: bool,
}

/// Land one point of damage. A surviving target is stunned and knocked away
/// from `attacker_center_x`; either way its own swing is cancelled.
pub fn apply_hit(
    target: &mut FighterMut<'_>,
    profile: &FighterProfile,
    attacker_center_x: f32,
) -> HitOutcome {
    target.health.take_damage(1);
    target.combat.attack.interrupt();
    target.hitboxes.clear_weapon();

    if target.health.is_depleted() {
        target.death.begin();
        target.combat.clear_transients();
        return HitOutcome {
            remaining_hp: 0,
            killed: true,
        };
    }

    target.combat.stun.start(profile.stun_on_hit);
    let away = if target.body.center_x() >= attacker_center_x {
        1.0
    } else {
        -1.0
    };
    target.combat.knockback.push(away * profile.knockback_on_hit);

    HitOutcome {
        remaining_hp: target.health.current,
        killed: false,
    }
}

/// The player's swing against one enemy. Each swing lands on a given target
/// at most once.
pub fn strike_with_swing(
    weapon: Rect,
    attacker_center_x: f32,
    target: &mut FighterMut<'_>,
    profile: &FighterProfile,
) -> Option<HitOutcome> {
    if target.death.is_dead()
        || target.combat.hit_by_current_swing
        || !overlaps(weapon, target.hitboxes.hurtbox)
    {
        return None;
    }
    target.combat.hit_by_current_swing = true;
    Some(apply_hit(target, profile, attacker_center_x))
}

/// A live enemy as seen by the player's damage check.
#[derive(Debug, Clone, Copy)]
pub struct Threat {
    pub entity: Entity,
    pub hurtbox: Rect,
    pub weapon: Rect,
    pub center_x: f32,
}

/// First threat allowed to hurt the player this tick. Weapons are checked
/// before body contact, and each channel honours the hurt guard.
pub fn pick_threat(
    player_hurtbox: Rect,
    guard: &HurtGuard,
    threats: &[Threat],
) -> Option<(Threat, DamageSource)> {
    let channels: [(DamageSource, fn(&Threat) -> Rect); 2] = [
        (DamageSource::Weapon, |t: &Threat| t.weapon),
        (DamageSource::Body, |t: &Threat| t.hurtbox),
    ];
    for (source, rect_of) in channels {
        if !guard.can_take(source) {
            continue;
        }
        if let Some(threat) = threats.iter().find(|t| overlaps(rect_of(t), player_hurtbox)) {
            return Some((*threat, source));
        }
    }
    None
}
