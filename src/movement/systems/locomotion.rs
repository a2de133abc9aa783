//! Movement domain: walking, jumping, knockback, gravity, and world bounds.

use bevy::prelude::*;

use crate::combat::{CombatState, CombatTuning, DeathState, Knockback};
use crate::core::SimClock;
use crate::level::{ActiveLevel, Solidity, TileGrid};
use crate::movement::collision::{
    HorizontalContact, VerticalContact, resolve_horizontal, resolve_vertical,
};
use crate::movement::input::PlayerIntent;
use crate::movement::{Body, Jumps, Kinematics, Movable, MovementTuning, Player};

/// Walk along `axis` (-1, 0, +1), turning to face it.
pub fn walk(
    grid: &TileGrid,
    body: &mut Body,
    axis: f32,
    speed: f32,
    dt: f32,
) -> HorizontalContact {
    if axis == 0.0 {
        return HorizontalContact::Free;
    }
    body.facing = body.facing.toward(axis);
    resolve_horizontal(grid, Solidity::Player, body, axis * speed * dt)
}

pub fn try_jump(kinematics: &mut Kinematics, jumps: &mut Jumps, jump_velocity: f32) -> bool {
    if !jumps.can_jump() {
        return false;
    }
    kinematics.velocity_y = jump_velocity;
    kinematics.on_ground = false;
    jumps.used += 1;
    true
}

/// Move by the knockback velocity; a blocked push stops dead, otherwise it
/// decays toward zero.
pub fn apply_knockback(
    grid: &TileGrid,
    solidity: Solidity,
    body: &mut Body,
    knockback: &mut Knockback,
    friction: f32,
    dt: f32,
) {
    if !knockback.is_active() {
        return;
    }
    match resolve_horizontal(grid, solidity, body, knockback.velocity_x * dt) {
        HorizontalContact::Blocked => knockback.stop(),
        HorizontalContact::Free => knockback.decay(friction, dt),
    }
}

pub fn apply_gravity(
    grid: &TileGrid,
    solidity: Solidity,
    body: &mut Body,
    kinematics: &mut Kinematics,
    gravity: f32,
    dt: f32,
) -> VerticalContact {
    kinematics.velocity_y += gravity * dt;
    let dy = kinematics.velocity_y * dt;
    resolve_vertical(grid, solidity, body, kinematics, dy)
}

/// Keep the player inside `[0, world_width]` horizontally and above y = 0.
/// Knockback pushing into a side bound is cancelled.
pub fn clamp_to_world(
    body: &mut Body,
    kinematics: &mut Kinematics,
    jumps: &mut Jumps,
    knockback: &mut Knockback,
    world_width: f32,
) {
    let max_x = (world_width - body.size.x).max(0.0);
    if body.position.x < 0.0 {
        body.position.x = 0.0;
        if knockback.velocity_x < 0.0 {
            knockback.stop();
        }
    } else if body.position.x > max_x {
        body.position.x = max_x;
        if knockback.velocity_x > 0.0 {
            knockback.stop();
        }
    }

    if body.position.y < 0.0 {
        body.position.y = 0.0;
        kinematics.velocity_y = 0.0;
        kinematics.on_ground = true;
        jumps.reset();
    }
}

pub(crate) fn move_player(
    clock: Res<SimClock>,
    tuning: Res<MovementTuning>,
    combat_tuning: Res<CombatTuning>,
    level: Option<Res<ActiveLevel>>,
    mut intent: ResMut<PlayerIntent>,
    mut query: Query<
        (
            &mut Body,
            &mut Kinematics,
            &mut Jumps,
            &mut CombatState,
            &DeathState,
        ),
        (With<Player>, With<Movable>),
    >,
) {
    let Some(level) = level else {
        return;
    };
    let grid = &level.grid;
    let dt = clock.dt;
    let jump_pressed = std::mem::take(&mut intent.jump);

    for (mut body, mut kinematics, mut jumps, mut combat, death) in &mut query {
        let can_act = !death.is_dead() && !combat.is_stunned();

        if can_act {
            walk(grid, &mut body, intent.walk_axis(), tuning.move_speed, dt);
            if jump_pressed && try_jump(&mut kinematics, &mut jumps, tuning.jump_velocity) {
                debug!("Jump {}/{}", jumps.used, jumps.max);
            }
        }

        apply_knockback(
            grid,
            Solidity::Player,
            &mut body,
            &mut combat.knockback,
            combat_tuning.knockback_friction,
            dt,
        );

        let contact = apply_gravity(
            grid,
            Solidity::Player,
            &mut body,
            &mut kinematics,
            tuning.gravity,
            dt,
        );
        if contact == VerticalContact::Landed {
            jumps.reset();
        }

        clamp_to_world(
            &mut body,
            &mut kinematics,
            &mut jumps,
            &mut combat.knockback,
            grid.world_width(),
        );
    }
}

pub(crate) fn move_enemies(
    clock: Res<SimClock>,
    tuning: Res<MovementTuning>,
    combat_tuning: Res<CombatTuning>,
    level: Option<Res<ActiveLevel>>,
    mut query: Query<(&mut Body, &mut Kinematics, &mut CombatState), (With<Movable>, Without<Player>)>,
) {
    let Some(level) = level else {
        return;
    };
    let dt = clock.dt;

    for (mut body, mut kinematics, mut combat) in &mut query {
        apply_knockback(
            &level.grid,
            Solidity::Enemy,
            &mut body,
            &mut combat.knockback,
            combat_tuning.knockback_friction,
            dt,
        );
        apply_gravity(
            &level.grid,
            Solidity::Enemy,
            &mut body,
            &mut kinematics,
            tuning.gravity,
            dt,
        );
    }
}
