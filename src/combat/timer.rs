//! Combat domain: countdowns and the attack state machine.

use serde::{Deserialize, Serialize};

/// Time left on a countdown. Never negative; active while above zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Countdown {
    remaining: f32,
}

impl Countdown {
    pub fn start(&mut self, seconds: f32) {
        self.remaining = if seconds.is_finite() {
            seconds.max(0.0)
        } else {
            0.0
        };
    }

    pub fn tick(&mut self, dt: f32) {
        self.remaining = (self.remaining - dt.max(0.0)).max(0.0);
    }

    pub fn clear(&mut self) {
        self.remaining = 0.0;
    }

    pub fn is_active(&self) -> bool {
        self.remaining > 0.0
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AttackPhase {
    #[default]
    Idle,
    Active,
}

/// What a single [`AttackTimer::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackTick {
    Idle,
    Swinging,
    Finished,
}

/// One swing: `Idle -> Active` on start, back to `Idle` once `elapsed`
/// reaches `duration`, at which point the cooldown begins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackTimer {
    phase: AttackPhase,
    elapsed: f32,
    duration: f32,
    cooldown: Countdown,
    cooldown_duration: f32,
}

impl AttackTimer {
    pub fn new(duration: f32, cooldown_duration: f32) -> Self {
        Self {
            phase: AttackPhase::Idle,
            elapsed: 0.0,
            duration: duration.max(0.0),
            cooldown: Countdown::default(),
            cooldown_duration: cooldown_duration.max(0.0),
        }
    }

    pub fn phase(&self) -> AttackPhase {
        self.phase
    }

    pub fn is_attacking(&self) -> bool {
        self.phase == AttackPhase::Active
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn cooldown_remaining(&self) -> f32 {
        self.cooldown.remaining()
    }

    pub fn on_cooldown(&self) -> bool {
        self.cooldown.is_active()
    }

    pub fn can_start(&self) -> bool {
        !self.is_attacking() && !self.on_cooldown()
    }

    /// Begin a swing if idle and off cooldown. Returns whether it started.
    pub fn try_start(&mut self) -> bool {
        if !self.can_start() {
            return false;
        }
        self.phase = AttackPhase::Active;
        self.elapsed = 0.0;
        true
    }

    pub fn tick(&mut self, dt: f32) -> AttackTick {
        let dt = dt.max(0.0);
        self.cooldown.tick(dt);
        if self.phase != AttackPhase::Active {
            return AttackTick::Idle;
        }
        self.elapsed += dt;
        if self.elapsed >= self.duration {
            self.phase = AttackPhase::Idle;
            self.elapsed = 0.0;
            self.cooldown.start(self.cooldown_duration);
            return AttackTick::Finished;
        }
        AttackTick::Swinging
    }

    /// Cancel a swing without starting the cooldown.
    pub fn interrupt(&mut self) {
        self.phase = AttackPhase::Idle;
        self.elapsed = 0.0;
    }

    /// Back to idle with no cooldown pending.
    pub fn reset(&mut self) {
        self.interrupt();
        self.cooldown.clear();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageSource {
    Weapon,
    Body,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct HurtLockTuning {
    /// Debounce shared by every damage source.
    pub global: f32,
    pub body: f32,
    pub weapon: f32,
}

impl Default for HurtLockTuning {
    fn default() -> Self {
        Self {
            global: 0.15,
            body: 0.60,
            weapon: 0.40,
        }
    }
}

/// Global hurt-lock plus one cooldown per damage source. A hit needs both
/// the global lock and the source's own cooldown to be clear.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HurtGuard {
    global: Countdown,
    body: Countdown,
    weapon: Countdown,
}

impl HurtGuard {
    fn channel(&self, source: DamageSource) -> &Countdown {
        match source {
            DamageSource::Weapon => &self.weapon,
            DamageSource::Body => &self.body,
        }
    }

    pub fn can_take(&self, source: DamageSource) -> bool {
        !self.global.is_active() && !self.channel(source).is_active()
    }

    pub fn register_hit(&mut self, source: DamageSource, tuning: &HurtLockTuning) {
        self.global.start(tuning.global);
        match source {
            DamageSource::Weapon => self.weapon.start(tuning.weapon),
            DamageSource::Body => self.body.start(tuning.body),
        }
    }

    pub fn tick(&mut self, dt: f32) {
        self.global.tick(dt);
        self.body.tick(dt);
        self.weapon.tick(dt);
    }

    pub fn remaining(&self, source: DamageSource) -> f32 {
        self.channel(source).remaining()
    }

    pub fn global_remaining(&self) -> f32 {
        self.global.remaining()
    }
}
