//! Core domain: shared resources for the clock and run configuration.

use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Per-tick delta after clamping. Long frames are cut down to `max_dt` so a
/// single step can never carry an actor through a whole tile.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct SimClock {
    pub max_dt: f32,
    #[serde(skip)]
    pub dt: f32,
    #[serde(skip)]
    pub tick: u64,
}

impl Default for SimClock {
    fn default() -> Self {
        Self {
            max_dt: 1.0 / 30.0,
            dt: 0.0,
            tick: 0,
        }
    }
}

impl SimClock {
    /// Record the raw frame delta and return the clamped step.
    pub fn advance(&mut self, raw_dt: f32) -> f32 {
        self.dt = if raw_dt.is_finite() {
            raw_dt.clamp(0.0, self.max_dt)
        } else {
            0.0
        };
        self.tick += 1;
        self.dt
    }
}

#[derive(Resource, Debug)]
pub struct RunConfig {
    pub seed: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: rand::rng().random(),
        }
    }
}

impl RunConfig {
    /// Seed for per-level spawn decisions, stable for a given run and level.
    pub fn level_seed(&self, level_id: &str) -> u64 {
        level_id.bytes().fold(self.seed, |acc, byte| {
            acc.wrapping_mul(31).wrapping_add(byte as u64)
        })
    }
}
