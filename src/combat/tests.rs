//! Combat domain: tests for timers, hit resolution, and enemy AI.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use super::*;
use crate::content::DoorLinks;
use crate::core::SimSet;
use crate::level::TileGrid;
use crate::movement::{Body, Facing, PlayerIntent};
use crate::test_support::{DT, grid, level_def, player_entity, test_app, tick};

fn fighter_body(x: f32, y: f32, size: Vec2) -> Body {
    Body::new(Vec2::new(x, y), size)
}

struct Fighter {
    body: Body,
    health: Health,
    combat: CombatState,
    death: DeathState,
    hitboxes: Hitboxes,
}

impl Fighter {
    fn enemy_at(x: f32, y: f32) -> Self {
        let profile = FighterProfile::enemy();
        let body = fighter_body(x, y, Vec2::splat(16.0));
        Self {
            body,
            health: Health::new(profile.max_hp),
            combat: CombatState::new(&profile),
            death: DeathState::default(),
            hitboxes: Hitboxes {
                hurtbox: body.rect(),
                weapon: CLEARED,
            },
        }
    }

    fn as_target(&mut self) -> FighterMut<'_> {
        FighterMut {
            body: &self.body,
            health: &mut self.health,
            combat: &mut self.combat,
            death: &mut self.death,
            hitboxes: &mut self.hitboxes,
        }
    }
}

// -----------------------------------------------------------------------------
// Countdown and attack timer
// -----------------------------------------------------------------------------

#[test]
fn test_countdown_clamps_at_zero() {
    let mut countdown = Countdown::default();
    assert!(!countdown.is_active());

    countdown.start(0.5);
    countdown.tick(0.2);
    assert!(countdown.is_active());
    countdown.tick(0.4);
    assert!(!countdown.is_active());
    assert_eq!(countdown.remaining(), 0.0);

    countdown.start(-1.0);
    assert_eq!(countdown.remaining(), 0.0);
    countdown.start(f32::NAN);
    assert_eq!(countdown.remaining(), 0.0);
}

#[test]
fn test_attack_timer_lifecycle() {
    let mut attack = AttackTimer::new(0.32, 1.0);
    assert_eq!(attack.phase(), AttackPhase::Idle);
    assert!(attack.try_start());
    assert!(attack.is_attacking());
    assert!(!attack.try_start());

    assert_eq!(attack.tick(0.2), AttackTick::Swinging);
    assert_eq!(attack.tick(0.2), AttackTick::Finished);
    assert!(!attack.is_attacking());
    assert_eq!(attack.elapsed(), 0.0);
    assert!(attack.on_cooldown());
    assert!(!attack.try_start());

    assert_eq!(attack.tick(0.5), AttackTick::Idle);
    assert!(attack.on_cooldown());
    attack.tick(0.6);
    assert!(attack.can_start());
}

#[test]
fn test_interrupt_skips_cooldown() {
    let mut attack = AttackTimer::new(0.48, 1.0);
    attack.try_start();
    attack.tick(0.1);
    attack.interrupt();
    assert!(!attack.is_attacking());
    assert!(!attack.on_cooldown());
    assert!(attack.try_start());
}

#[test]
fn test_hurt_guard_channels() {
    let tuning = HurtLockTuning::default();
    let mut guard = HurtGuard::default();
    assert!(guard.can_take(DamageSource::Weapon));
    assert!(guard.can_take(DamageSource::Body));

    guard.register_hit(DamageSource::Body, &tuning);
    // Global lock blocks every source.
    assert!(!guard.can_take(DamageSource::Weapon));
    assert!(!guard.can_take(DamageSource::Body));

    guard.tick(0.2);
    assert_eq!(guard.global_remaining(), 0.0);
    assert!(guard.can_take(DamageSource::Weapon));
    assert!(!guard.can_take(DamageSource::Body));

    guard.tick(0.3);
    assert!(!guard.can_take(DamageSource::Body));
    guard.tick(0.2);
    assert!(guard.can_take(DamageSource::Body));
    assert_eq!(guard.remaining(DamageSource::Body), 0.0);
}

// -----------------------------------------------------------------------------
// Hitboxes
// -----------------------------------------------------------------------------

#[test]
fn test_weapon_hitbox_follows_facing() {
    let shape = FighterProfile::player().weapon;
    let mut body = fighter_body(100.0, 50.0, Vec2::new(16.0, 20.0));

    let rect = weapon_hitbox(&body, &shape);
    assert_eq!(rect.min, Vec2::new(126.0, 54.0));
    assert_eq!(rect.max, Vec2::new(140.0, 64.0));

    body.facing = Facing::Left;
    let rect = weapon_hitbox(&body, &shape);
    assert_eq!(rect.min, Vec2::new(76.0, 54.0));
    assert_eq!(rect.max, Vec2::new(90.0, 64.0));
}

#[test]
fn test_weapon_only_live_while_swinging() {
    let profile = FighterProfile::player();
    let body = fighter_body(100.0, 50.0, Vec2::new(16.0, 20.0));
    let mut combat = CombatState::new(&profile);
    let mut death = DeathState::default();
    let mut hitboxes = Hitboxes::default();

    refresh_hitboxes(&mut hitboxes, &body, &combat, &death, &profile.weapon);
    assert_eq!(hitboxes.hurtbox, body.rect());
    assert!(!hitboxes.weapon_active());

    combat.attack.try_start();
    refresh_hitboxes(&mut hitboxes, &body, &combat, &death, &profile.weapon);
    assert!(hitboxes.weapon_active());

    death.begin();
    refresh_hitboxes(&mut hitboxes, &body, &combat, &death, &profile.weapon);
    assert!(!hitboxes.weapon_active());
}

// -----------------------------------------------------------------------------
// Hit application
// -----------------------------------------------------------------------------

fn player_swing() -> (Rect, f32) {
    let body = fighter_body(100.0, 50.0, Vec2::new(16.0, 20.0));
    (
        weapon_hitbox(&body, &FighterProfile::player().weapon),
        body.center_x(),
    )
}

#[test]
fn test_swing_lands_once_per_target() {
    let profile = FighterProfile::enemy();
    let (weapon, attacker_x) = player_swing();
    let mut enemy = Fighter::enemy_at(130.0, 50.0);

    let outcome = strike_with_swing(weapon, attacker_x, &mut enemy.as_target(), &profile);
    assert_eq!(
        outcome,
        Some(HitOutcome {
            remaining_hp: 2,
            killed: false
        })
    );
    assert!(enemy.combat.is_stunned());
    assert_eq!(enemy.combat.knockback.velocity_x, 140.0);

    assert_eq!(
        strike_with_swing(weapon, attacker_x, &mut enemy.as_target(), &profile),
        None
    );
    assert_eq!(enemy.health.current, 2);

    // A new swing clears the flag.
    enemy.combat.hit_by_current_swing = false;
    assert!(strike_with_swing(weapon, attacker_x, &mut enemy.as_target(), &profile).is_some());
    assert_eq!(enemy.health.current, 1);
}

#[test]
fn test_swing_misses_out_of_reach() {
    let profile = FighterProfile::enemy();
    let (weapon, attacker_x) = player_swing();
    let mut enemy = Fighter::enemy_at(140.0, 50.0);

    // Weapon ends at x = 140: touching edges do not count.
    assert_eq!(
        strike_with_swing(weapon, attacker_x, &mut enemy.as_target(), &profile),
        None
    );
    assert!(!enemy.combat.hit_by_current_swing);
}

#[test]
fn test_knockback_pushes_away_from_attacker() {
    let profile = FighterProfile::enemy();
    let mut enemy = Fighter::enemy_at(80.0, 50.0);
    apply_hit(&mut enemy.as_target(), &profile, 120.0);
    assert_eq!(enemy.combat.knockback.velocity_x, -140.0);
}

#[test]
fn test_hit_cancels_targets_swing() {
    let profile = FighterProfile::enemy();
    let mut enemy = Fighter::enemy_at(130.0, 50.0);
    enemy.combat.attack.try_start();
    enemy.hitboxes.weapon = weapon_hitbox(&enemy.body, &profile.weapon);

    apply_hit(&mut enemy.as_target(), &profile, 100.0);
    assert!(!enemy.combat.attack.is_attacking());
    assert!(!enemy.hitboxes.weapon_active());
}

#[test]
fn test_third_hit_kills_and_clears_effects() {
    let profile = FighterProfile::enemy();
    let (weapon, attacker_x) = player_swing();
    let mut enemy = Fighter::enemy_at(130.0, 50.0);

    for _ in 0..2 {
        enemy.combat.hit_by_current_swing = false;
        strike_with_swing(weapon, attacker_x, &mut enemy.as_target(), &profile);
    }
    enemy.combat.hit_by_current_swing = false;
    let outcome = strike_with_swing(weapon, attacker_x, &mut enemy.as_target(), &profile);
    assert_eq!(
        outcome,
        Some(HitOutcome {
            remaining_hp: 0,
            killed: true
        })
    );
    assert!(enemy.death.is_dead());
    assert!(enemy.death.animation_started);
    assert!(!enemy.combat.is_stunned());
    assert!(!enemy.combat.knockback.is_active());
    assert!(!enemy.combat.attack.is_attacking());

    // Dead targets take no further hits.
    enemy.combat.hit_by_current_swing = false;
    assert_eq!(
        strike_with_swing(weapon, attacker_x, &mut enemy.as_target(), &profile),
        None
    );
    assert_eq!(enemy.health.current, 0);
}

#[test]
fn test_death_animation_completes_once() {
    let mut death = DeathState::default();
    assert!(!death.tick(1.0, 0.6));
    assert!(death.begin());
    assert!(!death.begin());
    assert!(!death.tick(0.3, 0.6));
    assert!(death.tick(0.4, 0.6));
    assert!(death.ready_for_removal);
    assert!(!death.tick(0.4, 0.6));
}

fn threat(hurtbox: Rect, weapon: Rect, center_x: f32) -> Threat {
    Threat {
        entity: Entity::PLACEHOLDER,
        hurtbox,
        weapon,
        center_x,
    }
}

#[test]
fn test_weapon_threat_checked_before_body() {
    let player = Rect::new(0.0, 0.0, 16.0, 20.0);
    let toucher = threat(Rect::new(10.0, 0.0, 26.0, 16.0), CLEARED, 18.0);
    let striker = threat(
        Rect::new(40.0, 0.0, 56.0, 16.0),
        Rect::new(12.0, 4.0, 26.0, 14.0),
        48.0,
    );
    let threats = [toucher, striker];

    let mut guard = HurtGuard::default();
    let (picked, source) = pick_threat(player, &guard, &threats).unwrap();
    assert_eq!(source, DamageSource::Weapon);
    assert_eq!(picked.center_x, 48.0);

    guard.register_hit(DamageSource::Weapon, &HurtLockTuning::default());
    assert!(pick_threat(player, &guard, &threats).is_none());

    guard.tick(0.2);
    let (picked, source) = pick_threat(player, &guard, &threats).unwrap();
    assert_eq!(source, DamageSource::Body);
    assert_eq!(picked.center_x, 18.0);
}

// -----------------------------------------------------------------------------
// Enemy AI
// -----------------------------------------------------------------------------

struct Walker {
    brain: EnemyBrain,
    body: Body,
    combat: CombatState,
    death: DeathState,
}

impl Walker {
    fn at(x: f32, dir: f32) -> Self {
        let mut brain = EnemyBrain::new(x, dir, &EnemyTuning::default());
        brain.patrol_left = -1000.0;
        brain.patrol_right = 1000.0;
        Self {
            brain,
            body: fighter_body(x, 16.0, Vec2::splat(16.0)),
            combat: CombatState::new(&FighterProfile::enemy()),
            death: DeathState::default(),
        }
    }

    fn think(&mut self, grid: &TileGrid, player: Option<PlayerView>) -> AiDecision {
        let ctx = AiContext {
            grid,
            player,
            dt: DT,
        };
        think(
            &mut self.brain,
            &mut self.body,
            &mut self.combat,
            &self.death,
            true,
            &ctx,
        )
    }
}

fn view(x: f32, y: f32, alive: bool) -> Option<PlayerView> {
    Some(PlayerView {
        center: Vec2::new(x, y),
        alive,
    })
}

#[test]
fn test_chase_hysteresis() {
    let mut brain = EnemyBrain::new(0.0, 1.0, &EnemyTuning::default());
    brain.update_chase(150.0);
    assert!(!brain.chasing);
    brain.update_chase(130.0);
    assert!(brain.chasing);
    brain.update_chase(150.0);
    assert!(brain.chasing);
    brain.update_chase(180.0);
    assert!(!brain.chasing);
    brain.update_chase(150.0);
    assert!(!brain.chasing);
}

#[test]
fn test_patrol_stops_at_ledge() {
    let grid = grid(&["........", "........", "####...."]);
    let mut enemy = Walker::at(30.0, 1.0);

    let mut reversed = false;
    for _ in 0..100 {
        let decision = enemy.think(&grid, None);
        assert!(enemy.body.right() <= 64.0);
        if decision == AiDecision::Reversed {
            reversed = true;
            break;
        }
    }
    assert!(reversed);
    assert_eq!(enemy.body.right(), 64.0);
    assert_eq!(enemy.brain.move_dir, -1.0);
    assert_eq!(enemy.body.facing, Facing::Left);
}

#[test]
fn test_patrol_reverses_at_one_tile_gap() {
    let grid = grid(&["........", "........", "####.###"]);
    let mut enemy = Walker::at(30.0, 1.0);

    let mut reversed = false;
    for _ in 0..100 {
        let decision = enemy.think(&grid, None);
        assert!(enemy.body.right() <= 64.0);
        if decision == AiDecision::Reversed {
            reversed = true;
            break;
        }
    }
    assert!(reversed);
    assert_eq!(enemy.body.right(), 64.0);
    assert_eq!(enemy.brain.move_dir, -1.0);
    assert_eq!(enemy.body.facing, Facing::Left);
}

#[test]
fn test_ledge_snap_never_pulls_back() {
    // Knocked halfway over the gap: turning around must not drag it a tile back.
    let grid = grid(&["........", "........", "####.###"]);
    let mut enemy = Walker::at(60.0, 1.0);

    assert_eq!(enemy.think(&grid, None), AiDecision::Reversed);
    assert_eq!(enemy.body.position.x, 60.0);
    assert_eq!(enemy.brain.move_dir, -1.0);
}

#[test]
fn test_patrol_turns_at_wall() {
    let grid = grid(&["........", "...#....", "########"]);
    let mut enemy = Walker::at(30.0, 1.0);

    let mut reversed = false;
    for _ in 0..30 {
        if enemy.think(&grid, None) == AiDecision::Reversed {
            reversed = true;
            break;
        }
    }
    assert!(reversed);
    assert_eq!(enemy.brain.move_dir, -1.0);
    assert!(enemy.body.right() <= 48.0);
}

#[test]
fn test_patrol_bound_flips_direction() {
    let grid = grid(&["........", "........", "########"]);
    let mut enemy = Walker::at(30.0, 1.0);
    enemy.brain.patrol_right = 30.0;

    let decision = enemy.think(&grid, None);
    assert!(matches!(decision, AiDecision::Walk { dx } if dx < 0.0));
    assert_eq!(enemy.brain.move_dir, -1.0);
}

#[test]
fn test_attack_in_range_faces_player() {
    let grid = grid(&["........", "........", "########"]);
    let mut enemy = Walker::at(30.0, -1.0);
    enemy.body.facing = Facing::Left;

    let decision = enemy.think(&grid, view(58.0, 26.0, true));
    assert_eq!(decision, AiDecision::Attack);
    assert!(enemy.combat.attack.is_attacking());
    assert_eq!(enemy.body.facing, Facing::Right);
    assert_eq!(enemy.body.position.x, 30.0);

    // Mid-swing: no further decisions.
    assert_eq!(enemy.think(&grid, view(58.0, 26.0, true)), AiDecision::Skipped);
}

#[test]
fn test_chase_moves_toward_player() {
    let grid = grid(&["................", "................", "################"]);
    let mut enemy = Walker::at(30.0, -1.0);

    let decision = enemy.think(&grid, view(138.0, 24.0, true));
    assert!(enemy.brain.chasing);
    assert_eq!(enemy.brain.move_dir, 1.0);
    match decision {
        AiDecision::Walk { dx } => assert!((dx - 1.5).abs() < 1e-4),
        other => panic!("expected a chase step, got {:?}", other),
    }
}

#[test]
fn test_chase_latch_ignores_height_difference() {
    let grid = grid(&["................", "................", "################"]);
    let mut enemy = Walker::at(30.0, -1.0);

    // 130 px across and 100 px up: within aggro range horizontally.
    let decision = enemy.think(&grid, view(168.0, 124.0, true));
    assert!(enemy.brain.chasing);
    assert_eq!(enemy.brain.move_dir, 1.0);
    assert!(matches!(decision, AiDecision::Walk { dx } if dx > 0.0));

    // 150 px across and 150 px up keeps the chase going.
    let center_x = enemy.body.center_x();
    enemy.think(&grid, view(center_x + 150.0, 174.0, true));
    assert!(enemy.brain.chasing);
}

#[test]
fn test_chase_into_wall_reverses_in_place() {
    let grid = grid(&["................", "....#...........", "################"]);
    let mut enemy = Walker::at(47.0, 1.0);

    let decision = enemy.think(&grid, view(150.0, 24.0, true));
    assert!(enemy.brain.chasing);
    assert_eq!(decision, AiDecision::Reversed);
    assert_eq!(enemy.body.position.x, 47.0);
    assert_eq!(enemy.brain.move_dir, -1.0);
}

#[test]
fn test_dead_player_is_ignored() {
    let grid = grid(&["........", "........", "########"]);
    let mut enemy = Walker::at(30.0, 1.0);

    let decision = enemy.think(&grid, view(58.0, 26.0, false));
    assert_ne!(decision, AiDecision::Attack);
    assert!(!enemy.brain.chasing);
    assert!(!enemy.combat.attack.is_attacking());
}

#[test]
fn test_stunned_enemy_skips_turn() {
    let grid = grid(&["........", "........", "########"]);
    let mut enemy = Walker::at(30.0, 1.0);
    enemy.combat.stun.start(0.3);

    assert_eq!(enemy.think(&grid, view(58.0, 26.0, true)), AiDecision::Skipped);
    assert_eq!(enemy.body.position.x, 30.0);
    assert!(!enemy.combat.attack.is_attacking());
}

// -----------------------------------------------------------------------------
// App-level: damage flow
// -----------------------------------------------------------------------------

#[derive(Resource, Default)]
struct CombatLog {
    damage: usize,
    deaths: usize,
    removed: usize,
    player_died: usize,
}

fn record_combat(
    mut damage: MessageReader<DamageEvent>,
    mut deaths: MessageReader<DeathEvent>,
    mut removed: MessageReader<EnemyRemoved>,
    mut player_died: MessageReader<PlayerDied>,
    mut log: ResMut<CombatLog>,
) {
    log.damage += damage.read().count();
    log.deaths += deaths.read().count();
    log.removed += removed.read().count();
    log.player_died += player_died.read().count();
}

fn combat_app(rows: &[&str]) -> App {
    let level = level_def("arena", (1, 0), rows, DoorLinks::default());
    let mut app = test_app(vec![level], "arena");
    app.init_resource::<CombatLog>()
        .add_systems(Update, record_combat.after(SimSet::Cleanup));
    tick(&mut app);
    app
}

fn enemy_entity(app: &mut App) -> Entity {
    let mut query = app.world_mut().query_filtered::<Entity, With<Enemy>>();
    query.single(app.world()).unwrap()
}

#[test]
fn test_body_contact_costs_one_hp() {
    let mut app = combat_app(&["..........", ".E........", "##########"]);
    let player = player_entity(&mut app);

    tick(&mut app);
    assert_eq!(app.world().get::<Health>(player).unwrap().current, 4);
    assert_eq!(app.world().resource::<CombatLog>().damage, 1);

    let combat = app.world().get::<CombatState>(player).unwrap();
    assert!(!combat.hurt.can_take(DamageSource::Weapon));
}

#[test]
fn test_killed_enemy_is_removed_after_animation() {
    let mut app = combat_app(&["..........", "....E.....", "##########"]);
    let player = player_entity(&mut app);
    let enemy = enemy_entity(&mut app);

    let enemy_x = app.world().get::<Body>(enemy).unwrap().position.x;
    app.world_mut().get_mut::<Health>(enemy).unwrap().current = 1;
    {
        let mut body = app.world_mut().get_mut::<Body>(player).unwrap();
        body.position.x = enemy_x - 30.0;
        body.facing = Facing::Right;
    }
    app.world_mut().resource_mut::<PlayerIntent>().attack = true;

    tick(&mut app);
    assert!(app.world().get::<DeathState>(enemy).unwrap().is_dead());
    assert_eq!(app.world().get::<Health>(player).unwrap().current, 5);
    assert_eq!(app.world().resource::<CombatLog>().deaths, 1);

    for _ in 0..40 {
        tick(&mut app);
    }
    assert!(app.world().get_entity(enemy).is_err());
    let log = app.world().resource::<CombatLog>();
    assert_eq!(log.removed, 1);
    assert_eq!(log.deaths, 1);
}

#[test]
fn test_player_death_reported_once() {
    let mut app = combat_app(&["..........", ".E........", "##########"]);
    let player = player_entity(&mut app);
    app.world_mut().get_mut::<Health>(player).unwrap().current = 1;

    for _ in 0..60 {
        tick(&mut app);
    }
    // The player stays in the world, frozen in its death pose.
    let death = app.world().get::<DeathState>(player).unwrap();
    assert!(death.is_dead());
    assert!(death.animation_started);
    assert!(!death.ready_for_removal);
    assert_eq!(app.world().get::<Health>(player).unwrap().current, 0);

    let log = app.world().resource::<CombatLog>();
    assert_eq!(log.player_died, 1);
    assert_eq!(log.damage, 1);
}
