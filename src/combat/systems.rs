//! Combat domain: attack starts, timers, hitboxes, damage, and cleanup.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::combat::components::{CombatState, Combatant, DeathState, Enemy, Health};
use crate::combat::events::{DamageEvent, DeathEvent, EnemyRemoved, PlayerDied};
use crate::combat::hitbox::{
    FighterMut, Hitboxes, Threat, apply_hit, pick_threat, refresh_hitboxes, strike_with_swing,
};
use crate::combat::resources::CombatTuning;
use crate::combat::timer::{AttackTick, DamageSource};
use crate::core::SimClock;
use crate::movement::{Body, Player, PlayerIntent};

pub(crate) fn start_player_attack(
    mut intent: ResMut<PlayerIntent>,
    mut player_query: Query<(&mut CombatState, &DeathState), With<Player>>,
    mut enemy_query: Query<&mut CombatState, (With<Enemy>, Without<Player>)>,
) {
    if !std::mem::take(&mut intent.attack) {
        return;
    }
    let Ok((mut combat, death)) = player_query.single_mut() else {
        return;
    };
    if death.is_dead() || combat.is_stunned() || !combat.attack.try_start() {
        return;
    }

    for mut enemy in &mut enemy_query {
        enemy.hit_by_current_swing = false;
    }
    info!("Player attack start");
}

pub(crate) fn tick_combat_timers(
    clock: Res<SimClock>,
    mut query: Query<(Entity, &mut CombatState), With<Combatant>>,
) {
    let dt = clock.dt;
    for (entity, mut combat) in &mut query {
        if combat.attack.tick(dt) == AttackTick::Finished {
            debug!("{:?} attack finished", entity);
        }
        combat.hurt.tick(dt);
        combat.stun.tick(dt);
    }
}

pub(crate) fn refresh_all_hitboxes(
    tuning: Res<CombatTuning>,
    mut query: Query<(&mut Hitboxes, &Body, &CombatState, &DeathState, Has<Player>), With<Combatant>>,
) {
    for (mut hitboxes, body, combat, death, is_player) in &mut query {
        let shape = if is_player {
            &tuning.player.weapon
        } else {
            &tuning.enemy.weapon
        };
        refresh_hitboxes(&mut hitboxes, body, combat, death, shape);
    }
}

/// Player weapon against every live enemy not yet hit by this swing.
pub(crate) fn resolve_player_strikes(
    tuning: Res<CombatTuning>,
    player_query: Query<(Entity, &Body, &Hitboxes), With<Player>>,
    mut enemy_query: Query<
        (
            Entity,
            &Body,
            &mut Health,
            &mut CombatState,
            &mut DeathState,
            &mut Hitboxes,
        ),
        (With<Enemy>, Without<Player>),
    >,
    mut damage_events: MessageWriter<DamageEvent>,
    mut death_events: MessageWriter<DeathEvent>,
) {
    let Ok((player, player_body, player_hitboxes)) = player_query.single() else {
        return;
    };
    if !player_hitboxes.weapon_active() {
        return;
    }
    let weapon = player_hitboxes.weapon;
    let attacker_x = player_body.center_x();

    for (entity, body, mut health, mut combat, mut death, mut hitboxes) in &mut enemy_query {
        let mut target = FighterMut {
            body,
            health: &mut health,
            combat: &mut combat,
            death: &mut death,
            hitboxes: &mut hitboxes,
        };
        let Some(outcome) = strike_with_swing(weapon, attacker_x, &mut target, &tuning.enemy) else {
            continue;
        };

        info!("Enemy {:?} hit, hp = {}", entity, outcome.remaining_hp);
        damage_events.write(DamageEvent {
            source: player,
            target: entity,
            kind: DamageSource::Weapon,
            remaining_hp: outcome.remaining_hp,
        });
        if outcome.killed {
            info!("Enemy {:?} died", entity);
            death_events.write(DeathEvent { entity });
        }
    }
}

/// Enemy weapons, then enemy bodies, against the player. At most one hit
/// lands per tick.
pub(crate) fn resolve_enemy_threats(
    tuning: Res<CombatTuning>,
    enemy_query: Query<(Entity, &Body, &Hitboxes, &DeathState), (With<Enemy>, Without<Player>)>,
    mut player_query: Query<
        (
            Entity,
            &Body,
            &mut Health,
            &mut CombatState,
            &mut DeathState,
            &mut Hitboxes,
        ),
        With<Player>,
    >,
    mut damage_events: MessageWriter<DamageEvent>,
    mut death_events: MessageWriter<DeathEvent>,
    mut player_died: MessageWriter<PlayerDied>,
) {
    let Ok((player, body, mut health, mut combat, mut death, mut hitboxes)) =
        player_query.single_mut()
    else {
        return;
    };
    if death.is_dead() {
        return;
    }

    let threats: Vec<Threat> = enemy_query
        .iter()
        .filter(|(_, _, _, enemy_death)| !enemy_death.is_dead())
        .map(|(entity, enemy_body, enemy_hitboxes, _)| Threat {
            entity,
            hurtbox: enemy_hitboxes.hurtbox,
            weapon: enemy_hitboxes.weapon,
            center_x: enemy_body.center_x(),
        })
        .collect();

    let Some((threat, source)) = pick_threat(hitboxes.hurtbox, &combat.hurt, &threats) else {
        return;
    };

    combat.hurt.register_hit(source, &tuning.hurt_lock);
    let mut target = FighterMut {
        body,
        health: &mut health,
        combat: &mut combat,
        death: &mut death,
        hitboxes: &mut hitboxes,
    };
    let outcome = apply_hit(&mut target, &tuning.player, threat.center_x);

    info!(
        "Player hit by enemy {:?} ({:?}), hp = {}",
        threat.entity, source, outcome.remaining_hp
    );
    damage_events.write(DamageEvent {
        source: threat.entity,
        target: player,
        kind: source,
        remaining_hp: outcome.remaining_hp,
    });
    if outcome.killed {
        warn!("Player died");
        death_events.write(DeathEvent { entity: player });
        player_died.write(PlayerDied { entity: player });
    }
}

pub(crate) fn advance_death_animations(
    clock: Res<SimClock>,
    tuning: Res<CombatTuning>,
    mut query: Query<(Entity, &mut DeathState), With<Enemy>>,
) {
    for (entity, mut death) in &mut query {
        if death.tick(clock.dt, tuning.death_animation_seconds) {
            debug!("{:?} death animation finished", entity);
        }
    }
}

pub(crate) fn despawn_finished_enemies(
    mut commands: Commands,
    query: Query<(Entity, &DeathState), With<Enemy>>,
    mut removed: MessageWriter<EnemyRemoved>,
) {
    for (entity, death) in &query {
        if death.ready_for_removal {
            info!("Despawning enemy {:?}", entity);
            commands.entity(entity).despawn();
            removed.write(EnemyRemoved { entity });
        }
    }
}
