//! Combat domain: enemy patrol, chase, and attack decisions.

use bevy::prelude::*;

use crate::combat::components::{CombatState, DeathState, Enemy};
use crate::combat::resources::EnemyTuning;
use crate::core::{SimClock, overlaps};
use crate::level::{ActiveLevel, Solidity, TileGrid};
use crate::movement::{Body, Kinematics, Player};

/// Capability tag: the actor is driven by [`think`].
#[derive(Component, Debug)]
pub struct AiControlled;

#[derive(Component, Debug, Clone, PartialEq)]
pub struct EnemyBrain {
    pub patrol_left: f32,
    pub patrol_right: f32,
    /// +1 walks right, -1 walks left.
    pub move_dir: f32,
    pub patrol_speed: f32,
    pub chase_speed: f32,
    pub aggro_radius: f32,
    pub disengage_radius: f32,
    pub attack_range: f32,
    pub chasing: bool,
}

impl EnemyBrain {
    pub fn new(spawn_x: f32, move_dir: f32, tuning: &EnemyTuning) -> Self {
        Self {
            patrol_left: spawn_x - tuning.patrol_half_range,
            patrol_right: spawn_x + tuning.patrol_half_range,
            move_dir: if move_dir < 0.0 { -1.0 } else { 1.0 },
            patrol_speed: tuning.patrol_speed,
            chase_speed: tuning.chase_speed,
            aggro_radius: tuning.aggro_radius,
            disengage_radius: tuning.disengage_radius,
            attack_range: tuning.attack_range,
            chasing: false,
        }
    }

    fn reverse(&mut self) {
        self.move_dir = -self.move_dir;
    }

    /// Enter the chase at `aggro_radius`, leave it only at `disengage_radius`.
    /// `distance` is the horizontal center-to-center gap.
    pub fn update_chase(&mut self, distance: f32) {
        if self.chasing {
            if distance >= self.disengage_radius {
                self.chasing = false;
            }
        } else if distance <= self.aggro_radius {
            self.chasing = true;
        }
    }
}

/// What the AI sees of the player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerView {
    pub center: Vec2,
    pub alive: bool,
}

impl PlayerView {
    pub fn of(body: &Body, death: &DeathState) -> Self {
        Self {
            center: body.rect().center(),
            alive: !death.is_dead(),
        }
    }
}

/// World context shared by every enemy in a tick.
#[derive(Debug, Clone, Copy)]
pub struct AiContext<'a> {
    pub grid: &'a TileGrid,
    pub player: Option<PlayerView>,
    pub dt: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AiDecision {
    /// Dead, stunned, or mid-swing.
    Skipped,
    Attack,
    Walk { dx: f32 },
    /// Turned around instead of stepping.
    Reversed,
    Idle,
}

/// One AI step for one enemy. Mutates the brain, the pose, and (on attack)
/// the combat state.
pub fn think(
    brain: &mut EnemyBrain,
    body: &mut Body,
    combat: &mut CombatState,
    death: &DeathState,
    on_ground: bool,
    ctx: &AiContext<'_>,
) -> AiDecision {
    let (grid, dt) = (ctx.grid, ctx.dt);
    if death.is_dead() || combat.is_stunned() || combat.attack.is_attacking() {
        return AiDecision::Skipped;
    }

    let target = ctx.player.filter(|p| p.alive);
    let center = body.rect().center();
    match target {
        Some(p) => brain.update_chase((p.center.x - center.x).abs()),
        None => brain.chasing = false,
    }

    if let Some(p) = target {
        let dx_to_player = p.center.x - center.x;
        if dx_to_player.abs() <= brain.attack_range && combat.attack.try_start() {
            body.facing = body.facing.toward(dx_to_player);
            return AiDecision::Attack;
        }
    }

    let speed = match target {
        Some(p) if brain.chasing => {
            let dir = p.center.x - center.x;
            if dir == 0.0 {
                return AiDecision::Idle;
            }
            brain.move_dir = dir.signum();
            brain.chase_speed
        }
        _ => {
            if brain.move_dir > 0.0 && body.left() >= brain.patrol_right {
                brain.move_dir = -1.0;
            } else if brain.move_dir < 0.0 && body.left() <= brain.patrol_left {
                brain.move_dir = 1.0;
            }
            if on_ground && patrol_blocked(brain, body, grid, brain.patrol_speed * dt) {
                brain.reverse();
                body.facing = body.facing.toward(brain.move_dir);
                return AiDecision::Reversed;
            }
            brain.patrol_speed
        }
    };

    let dx = brain.move_dir * speed * dt;
    body.facing = body.facing.toward(brain.move_dir);
    if dx == 0.0 {
        return AiDecision::Idle;
    }

    let mut probe = *body;
    probe.position.x += dx;
    if overlaps_solid(grid, probe.rect()) {
        brain.reverse();
        return AiDecision::Reversed;
    }

    body.position.x += dx;
    AiDecision::Walk { dx }
}

/// Ledge or wall one step ahead. At a ledge the body is first moved flush
/// against the gap's near face so it never steps over the edge.
fn patrol_blocked(brain: &EnemyBrain, body: &mut Body, grid: &TileGrid, step: f32) -> bool {
    let ts = grid.tile_size();
    let ahead = if brain.move_dir > 0.0 {
        ((body.right() + step) / ts).ceil() as i32 - 1
    } else {
        ((body.left() - step) / ts).floor() as i32
    };
    let below = grid.row_at(body.bottom() - ts * 0.5);

    if !grid.is_solid(Solidity::Enemy, ahead, below) {
        // Only ever pull toward the gap, never back across a tile already crossed.
        body.position.x = if brain.move_dir > 0.0 {
            (ahead as f32 * ts - body.size.x).max(body.position.x)
        } else {
            ((ahead + 1) as f32 * ts).min(body.position.x)
        };
        return true;
    }

    let top_row = grid.row_at(body.top() - ts * 0.5).max(grid.row_at(body.bottom()));
    (grid.row_at(body.bottom())..=top_row).any(|row| grid.is_solid(Solidity::Enemy, ahead, row))
}

fn overlaps_solid(grid: &TileGrid, area: Rect) -> bool {
    let (cols, rows) = grid.cell_span(area);
    rows.into_iter().any(|row| {
        cols.clone().any(|col| {
            grid.is_solid(Solidity::Enemy, col, row) && overlaps(area, grid.cell_rect(col, row))
        })
    })
}

pub(crate) fn update_enemy_ai(
    clock: Res<SimClock>,
    level: Option<Res<ActiveLevel>>,
    player_query: Query<(&Body, &DeathState), (With<Player>, Without<Enemy>)>,
    mut enemy_query: Query<
        (
            Entity,
            &mut EnemyBrain,
            &mut Body,
            &mut CombatState,
            &DeathState,
            &Kinematics,
        ),
        (With<AiControlled>, Without<Player>),
    >,
) {
    let Some(level) = level else {
        return;
    };
    let ctx = AiContext {
        grid: &level.grid,
        player: player_query
            .iter()
            .next()
            .map(|(body, death)| PlayerView::of(body, death)),
        dt: clock.dt,
    };

    for (entity, mut brain, mut body, mut combat, death, kinematics) in &mut enemy_query {
        let decision = think(
            &mut brain,
            &mut body,
            &mut combat,
            death,
            kinematics.on_ground,
            &ctx,
        );
        if decision == AiDecision::Attack {
            debug!("Enemy {:?} attack start facing {:?}", entity, body.facing);
        }
    }
}
