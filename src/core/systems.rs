//! Core domain: clock system.

use bevy::prelude::*;

use crate::core::resources::SimClock;

pub(crate) fn advance_sim_clock(time: Res<Time>, mut clock: ResMut<SimClock>) {
    let raw = time.delta_secs();
    let dt = clock.advance(raw);
    if raw > dt {
        debug!("Tick {}: clamped frame delta {:.4}s to {:.4}s", clock.tick, raw, dt);
    }
}
