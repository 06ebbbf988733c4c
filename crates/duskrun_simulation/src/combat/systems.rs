//! Combat systems (FixedUpdate)
//!
//! - resolve_attacks - SimulationSet::Combat
//! - apply_health_requests, handle_deaths - SimulationSet::Health

use bevy::prelude::*;

use crate::components::{Health, MotionState, Player};
use crate::input::{AttackIntent, MotorIntent};
use crate::physics::{Body2D, PhysicsWorld};
use crate::signals::{
    AnimationSignal, SoundCue, ANIM_BASIC_ATTACK, ANIM_IS_DASH_ATTACKING, SOUND_ATTACK,
};

use super::damage::{DamageRequest, Dead, EntityDied, HealRequest, HealthEventWriters};
use super::resolver::{AttackOutcome, CombatResolver};

/// System: AttackIntent → CombatResolver::try_attack
///
/// Attack во время dash - dash attack (IsDashAttacking), без cooldown и урона.
pub fn resolve_attacks(
    time: Res<Time<Fixed>>,
    physics: Res<PhysicsWorld>,
    mut attackers: Query<
        (
            Entity,
            &Transform,
            &MotionState,
            &mut CombatResolver,
            &mut AttackIntent,
        ),
        Without<Dead>,
    >,
    mut targets: Query<&mut Health, Without<Dead>>,
    mut health_events: HealthEventWriters,
    mut animation: EventWriter<AnimationSignal>,
    mut sounds: EventWriter<SoundCue>,
) {
    let now = time.elapsed_secs();

    for (entity, transform, state, mut resolver, mut intent) in attackers.iter_mut() {
        if !intent.consume() {
            continue;
        }

        if state.dashing {
            animation.write(AnimationSignal::bool(entity, ANIM_IS_DASH_ATTACKING, true));
            crate::logger::log("Dash attack triggered");
            continue;
        }

        let origin = resolver.attack_origin(transform.translation.truncate(), state.facing_right);
        let outcome = resolver.try_attack(now, origin, &*physics, &mut targets);

        let AttackOutcome::Performed { hits } = outcome else {
            continue;
        };

        animation.write(AnimationSignal::trigger(entity, ANIM_BASIC_ATTACK));
        sounds.write(SoundCue::global(SOUND_ATTACK));
        crate::logger::log(&format!("Basic attack at {:?}: {} hit(s)", origin, hits.len()));

        for hit in hits {
            let Ok(health) = targets.get(hit.target) else {
                continue;
            };
            health_events.report(hit.target, Some(entity), hit.change, health);
        }
    }
}

/// System: DamageRequest/HealRequest → Health
///
/// Entity без Health пропускается (debug log), как и промах атаки.
pub fn apply_health_requests(
    mut damage_requests: EventReader<DamageRequest>,
    mut heal_requests: EventReader<HealRequest>,
    mut targets: Query<&mut Health>,
    mut health_events: HealthEventWriters,
) {
    for request in damage_requests.read() {
        let Ok(mut health) = targets.get_mut(request.target) else {
            crate::logger::log(&format!("DamageRequest: {:?} has no Health", request.target));
            continue;
        };

        let change = health.take_damage(request.amount);
        health_events.report(request.target, request.source, change, &health);
    }

    for request in heal_requests.read() {
        let Ok(mut health) = targets.get_mut(request.target) else {
            crate::logger::log(&format!("HealRequest: {:?} has no Health", request.target));
            continue;
        };

        let change = health.heal(request.amount);
        health_events.report(request.target, None, change, &health);
    }
}

/// System: EntityDied → Dead marker
///
/// Обнуляем velocity и intents сразу (не через Commands), Dead - через Commands.
/// Dead акторы исключены из motor/combat/PhysicsWorld.
pub fn handle_deaths(
    mut commands: Commands,
    mut deaths: EventReader<EntityDied>,
    mut actors: Query<(
        &mut Body2D,
        Option<&mut MotorIntent>,
        Option<&mut AttackIntent>,
        Has<Player>,
    )>,
) {
    for event in deaths.read() {
        if let Ok((mut body, motor_intent, attack_intent, is_player)) = actors.get_mut(event.entity) {
            body.velocity = Vec2::ZERO;

            if let Some(mut intent) = motor_intent {
                *intent = MotorIntent::default();
            }
            if let Some(mut intent) = attack_intent {
                intent.attack_pressed = false;
            }

            if is_player {
                crate::logger::log_warning("The Player died!");
            }
        }

        if let Ok(mut entity_commands) = commands.get_entity(event.entity) {
            entity_commands.insert(Dead);
            crate::logger::log(&format!(
                "Entity {:?} died (killer: {:?})",
                event.entity, event.killer
            ));
        }
    }
}
