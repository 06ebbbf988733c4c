//! Movement systems (FixedUpdate, SimulationSet::Motor)

use bevy::prelude::*;

use crate::combat::Dead;
use crate::components::{Enemy, MotionState};
use crate::input::MotorIntent;
use crate::interaction::ContactMemory;
use crate::physics::layers::LAYER_ENEMIES;
use crate::physics::{Body2D, Collider2D, PhysicsQuery, PhysicsWorld, SecondaryCollider};

use super::events::{CancelDash, MotionEvent, MotionSignal};
use super::motor::{CharacterMotor, ContactProbe};

/// Зазор для контакта тело-тело (касание считается контактом)
const CONTACT_SKIN: f32 = 0.05;

/// System: MotorIntent → CharacterMotor::fixed_tick
///
/// Intent потребляется: jump/dash edges гасятся после тика.
pub fn drive_character_motors(
    physics: Res<PhysicsWorld>,
    time: Res<Time<Fixed>>,
    mut actors: Query<
        (
            Entity,
            &Transform,
            &mut CharacterMotor,
            &mut MotorIntent,
            &mut MotionState,
            &mut Body2D,
        ),
        Without<Dead>,
    >,
    mut events: EventWriter<MotionEvent>,
) {
    let delta = time.delta_secs();

    for (entity, transform, mut motor, mut intent, mut state, mut body) in actors.iter_mut() {
        let intent = intent.consume();
        let probe = ContactProbe {
            physics: &*physics,
            position: transform.translation.truncate(),
            body_entity: entity,
        };

        let signals = motor.fixed_tick(&intent, &mut state, &mut body, &probe, delta);

        events.write_batch(signals.into_iter().map(|signal| MotionEvent { entity, signal }));
    }
}

/// System: CancelDash → DashEnded { cancelled: true }
pub fn cancel_dashes(
    mut requests: EventReader<CancelDash>,
    mut actors: Query<(&mut CharacterMotor, &mut MotionState, &mut Body2D)>,
    mut events: EventWriter<MotionEvent>,
) {
    for request in requests.read() {
        let Ok((mut motor, mut state, mut body)) = actors.get_mut(request.entity) else {
            continue;
        };

        if let Some(signal) = motor.cancel_dash(&mut state, &mut body) {
            events.write(MotionEvent {
                entity: request.entity,
                signal,
            });
        }
    }
}

/// System: one-shot nudge при новом контакте с врагом
///
/// Срабатывает на enter (враг появился в контакте), не каждый тик.
pub fn nudge_on_enemy_contact(
    physics: Res<PhysicsWorld>,
    mut actors: Query<
        (
            Entity,
            &Transform,
            &Collider2D,
            &CharacterMotor,
            &mut ContactMemory,
            &mut Body2D,
        ),
        Without<Dead>,
    >,
    enemies: Query<&Transform, With<Enemy>>,
    mut events: EventWriter<MotionEvent>,
) {
    for (entity, transform, collider, motor, mut contacts, mut body) in actors.iter_mut() {
        let position = transform.translation.truncate();
        let touching = physics.overlap_circle(
            position + collider.offset,
            collider.shape.bounding_radius() + CONTACT_SKIN,
            LAYER_ENEMIES,
        );

        for enemy in contacts.enter_enemies(touching) {
            if enemy == entity {
                continue;
            }
            let Ok(enemy_transform) = enemies.get(enemy) else {
                continue;
            };

            let enemy_position = enemy_transform.translation.truncate();
            if let Some(signal) = motor.nudge_from_enemy(position, enemy_position, &mut body) {
                events.write(MotionEvent { entity, signal });
            }
        }
    }
}

/// System: FacingChanged → знак scale.x
pub fn mirror_facing(mut events: EventReader<MotionEvent>, mut transforms: Query<&mut Transform>) {
    for event in events.read() {
        let MotionSignal::FacingChanged { facing_right } = event.signal else {
            continue;
        };
        let Ok(mut transform) = transforms.get_mut(event.entity) else {
            continue;
        };

        let sign = if facing_right { 1.0 } else { -1.0 };
        transform.scale.x = transform.scale.x.abs() * sign;
    }
}

/// System: crouch выключает верхний collider
pub fn sync_crouch_collider(mut actors: Query<(&MotionState, &mut SecondaryCollider), Changed<MotionState>>) {
    for (state, mut secondary) in actors.iter_mut() {
        let enabled = !state.crouching;
        if secondary.enabled != enabled {
            secondary.enabled = enabled;
        }
    }
}
