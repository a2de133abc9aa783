//! Combat domain: per-actor combat state.

use bevy::prelude::*;

use crate::combat::resources::FighterProfile;
use crate::combat::timer::{AttackTimer, Countdown, HurtGuard};

/// Marks an entity as a combat participant
#[derive(Component, Debug)]
pub struct Combatant;

#[derive(Component, Debug)]
pub struct Enemy;

/// Whole hit points. Never drops below zero.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let actual = amount.min(self.current);
        self.current -= actual;
        actual
    }

    pub fn is_depleted(&self) -> bool {
        self.current == 0
    }
}

/// Horizontal knockback velocity. Decays linearly toward zero and lands on
/// exactly zero without crossing it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Knockback {
    pub velocity_x: f32,
}

impl Knockback {
    pub fn is_active(&self) -> bool {
        self.velocity_x != 0.0
    }

    pub fn push(&mut self, velocity_x: f32) {
        self.velocity_x = if velocity_x.is_finite() { velocity_x } else { 0.0 };
    }

    pub fn stop(&mut self) {
        self.velocity_x = 0.0;
    }

    pub fn decay(&mut self, friction: f32, dt: f32) {
        let step = (friction * dt).max(0.0);
        if self.velocity_x.abs() <= step {
            self.velocity_x = 0.0;
        } else {
            self.velocity_x -= step * self.velocity_x.signum();
        }
    }
}

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct CombatState {
    pub attack: AttackTimer,
    pub hurt: HurtGuard,
    pub stun: Countdown,
    pub knockback: Knockback,
    /// Set once the opposing player's current swing has landed on this actor.
    pub hit_by_current_swing: bool,
}

impl CombatState {
    pub fn new(profile: &FighterProfile) -> Self {
        Self {
            attack: AttackTimer::new(profile.attack_duration, profile.attack_cooldown),
            hurt: HurtGuard::default(),
            stun: Countdown::default(),
            knockback: Knockback::default(),
            hit_by_current_swing: false,
        }
    }

    pub fn is_stunned(&self) -> bool {
        self.stun.is_active()
    }

    /// Drop every transient effect. Used when the actor dies.
    pub fn clear_transients(&mut self) {
        self.attack.reset();
        self.stun.clear();
        self.knockback.stop();
    }
}

#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct DeathState {
    pub dead: bool,
    pub animation_started: bool,
    pub elapsed: f32,
    pub ready_for_removal: bool,
}

impl DeathState {
    pub fn is_dead(&self) -> bool {
        self.dead
    }

    /// Enter the dead state. Returns false if already dead.
    pub fn begin(&mut self) -> bool {
        if self.dead {
            return false;
        }
        self.dead = true;
        self.animation_started = true;
        self.elapsed = 0.0;
        self.ready_for_removal = false;
        true
    }

    /// Advance the death animation. Returns true on the tick it completes.
    pub fn tick(&mut self, dt: f32, animation_seconds: f32) -> bool {
        if !self.dead || self.ready_for_removal {
            return false;
        }
        self.elapsed += dt.max(0.0);
        if self.elapsed >= animation_seconds {
            self.ready_for_removal = true;
            return true;
        }
        false
    }
}
