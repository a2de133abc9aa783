//! Core domain: tick ordering, the simulation clock, and run configuration.

mod geometry;
mod resources;
mod systems;

pub use geometry::overlaps;
pub use resources::{RunConfig, SimClock};

use bevy::prelude::*;

use crate::core::systems::advance_sim_clock;

/// Fixed per-tick ordering of the simulation. Every gameplay system lives in
/// exactly one of these sets; the sets run as a chain inside `Update`.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimSet {
    /// Clamp the frame delta.
    Clock,
    /// Device input turned into edge-detected intent (adapter side).
    Input,
    /// Player intent and enemy AI decisions.
    Intent,
    /// Attack, cooldown, stun and hurt-lock countdowns.
    Timers,
    /// Walking, jumping, knockback, gravity, tile collision.
    Physics,
    /// Hurtbox and weapon rectangles from the settled poses.
    Hitboxes,
    /// Player strikes first, then enemy weapons and bodies.
    Damage,
    /// Death animations and removal of finished enemies.
    Cleanup,
    /// Special tile contact and level rebuilds between ticks.
    Transition,
}

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimClock>()
            .init_resource::<RunConfig>()
            .configure_sets(
                Update,
                (
                    SimSet::Clock,
                    SimSet::Input,
                    SimSet::Intent,
                    SimSet::Timers,
                    SimSet::Physics,
                    SimSet::Hitboxes,
                    SimSet::Damage,
                    SimSet::Cleanup,
                    SimSet::Transition,
                )
                    .chain(),
            )
            .add_systems(Update, advance_sim_clock.in_set(SimSet::Clock));
    }
}
