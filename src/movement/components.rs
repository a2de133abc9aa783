//! Movement domain: actor pose, kinematics, and capability markers.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Component, Debug)]
pub struct Player;

/// Capability tag: the actor is integrated by the physics step.
#[derive(Component, Debug)]
pub struct Movable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }

    /// Facing for a signed direction; zero keeps `self`.
    pub fn toward(self, direction: f32) -> Self {
        if direction > 0.0 {
            Facing::Right
        } else if direction < 0.0 {
            Facing::Left
        } else {
            self
        }
    }
}

/// Axis-aligned pose. `position` is the lower-left corner in world pixels.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub position: Vec2,
    pub size: Vec2,
    pub facing: Facing,
}

impl Body {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            position,
            size,
            facing: Facing::Right,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            min: self.position,
            max: self.position + self.size,
        }
    }

    pub fn left(&self) -> f32 {
        self.position.x
    }

    pub fn right(&self) -> f32 {
        self.position.x + self.size.x
    }

    pub fn bottom(&self) -> f32 {
        self.position.y
    }

    pub fn top(&self) -> f32 {
        self.position.y + self.size.y
    }

    pub fn center_x(&self) -> f32 {
        self.position.x + self.size.x / 2.0
    }

    /// Zero, negative, or non-finite extents never collide.
    pub fn is_degenerate(&self) -> bool {
        !(self.size.x > 0.0 && self.size.y > 0.0)
            || !self.size.is_finite()
            || !self.position.is_finite()
    }
}

/// Vertical motion state. Horizontal motion is an immediate per-tick
/// displacement and carries no velocity.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct Kinematics {
    pub velocity_y: f32,
    pub on_ground: bool,
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Jumps {
    pub used: u8,
    pub max: u8,
}

impl Jumps {
    pub fn new(max: u8) -> Self {
        Self { used: 0, max }
    }

    pub fn can_jump(&self) -> bool {
        self.used < self.max
    }

    pub fn reset(&mut self) {
        self.used = 0;
    }
}
