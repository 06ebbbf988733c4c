//! Input systems (logic tick)

use bevy::prelude::*;

use crate::combat::Dead;
use crate::components::Player;
use crate::movement::CharacterMotor;
use crate::signals::{AnimationSignal, ANIM_SPEED};

use super::intent::{AttackIntent, IntentBuilder, MotorIntent};
use super::source::PlayerInput;

/// System: опрос PlayerInput → MotorIntent/AttackIntent игрока
///
/// Работает в PreUpdate - до RunFixedMainLoop, так что fixed тик этого кадра
/// уже видит свежий intent. Заодно пишет `Speed` float для анимации.
pub fn capture_player_intents(
    input: Option<ResMut<PlayerInput>>,
    mut players: Query<
        (
            Entity,
            &CharacterMotor,
            &mut IntentBuilder,
            &mut MotorIntent,
            &mut AttackIntent,
        ),
        (With<Player>, Without<Dead>),
    >,
    mut animation: EventWriter<AnimationSignal>,
) {
    // Guard: хост не подключил input (например, AI-only прогон)
    let Some(mut input) = input else {
        return;
    };

    input.source.begin_frame();

    for (entity, motor, mut builder, mut motor_intent, mut attack_intent) in players.iter_mut() {
        let frame = builder.build(input.source.as_ref());

        motor_intent.merge(frame.motor);
        attack_intent.attack_pressed |= frame.attack_pressed;

        animation.write(AnimationSignal::float(
            entity,
            ANIM_SPEED,
            frame.motor.move_axis.abs() * motor.config().base_speed,
        ));
    }
}
