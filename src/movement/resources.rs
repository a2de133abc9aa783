//! Movement domain: locomotion tuning.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Resource, Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MovementTuning {
    /// Horizontal walk speed in px/s.
    pub move_speed: f32,
    /// Signed vertical acceleration in px/s², negative pulls down.
    pub gravity: f32,
    pub jump_velocity: f32,
    /// Total jumps between landings (2 = double jump).
    pub max_jumps: u8,
    pub player_width: f32,
    pub player_height: f32,
    pub enemy_width: f32,
    pub enemy_height: f32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            move_speed: 150.0,
            gravity: -800.0,
            jump_velocity: 300.0,
            max_jumps: 2,
            player_width: 16.0,
            player_height: 20.0,
            enemy_width: 16.0,
            enemy_height: 16.0,
        }
    }
}

impl MovementTuning {
    pub fn player_size(&self) -> Vec2 {
        Vec2::new(self.player_width, self.player_height)
    }

    pub fn enemy_size(&self) -> Vec2 {
        Vec2::new(self.enemy_width, self.enemy_height)
    }

    /// Apex height of a single jump from rest: h = v² / (2g).
    pub fn single_jump_height(&self) -> f32 {
        let g = self.gravity.abs();
        if g <= f32::EPSILON {
            return f32::INFINITY;
        }
        self.jump_velocity * self.jump_velocity / (2.0 * g)
    }
}
