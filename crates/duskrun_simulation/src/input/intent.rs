//! Intent - per-tick input snapshot для motor/combat
//!
//! Пишется в PreUpdate (logic tick), потребляется в FixedUpdate.
//! Edges (jump/dash/attack) латчатся до ближайшего fixed тика:
//! если между fixed тиками прошло несколько logic тиков - нажатие не теряется.

use bevy::prelude::*;

use super::source::{InputAction, InputSource};

/// Intent для CharacterMotor
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct MotorIntent {
    /// Горизонтальная ось: -1.0 (влево) → +1.0 (вправо)
    pub move_axis: f32,
    /// Crouch удерживается
    pub crouch_held: bool,
    /// Jump нажат (edge)
    pub jump_pressed: bool,
    /// Dash нажат (edge)
    pub dash_pressed: bool,
}

impl MotorIntent {
    pub fn moving(move_axis: f32) -> Self {
        Self {
            move_axis,
            ..default()
        }
    }

    pub fn jump() -> Self {
        Self {
            jump_pressed: true,
            ..default()
        }
    }

    pub fn dash() -> Self {
        Self {
            dash_pressed: true,
            ..default()
        }
    }

    /// Уровни берём из нового snapshot'а, edges - OR с ещё не потреблёнными
    pub fn merge(&mut self, next: MotorIntent) {
        self.move_axis = next.move_axis;
        self.crouch_held = next.crouch_held;
        self.jump_pressed |= next.jump_pressed;
        self.dash_pressed |= next.dash_pressed;
    }

    /// Забрать snapshot для fixed тика, edges сбрасываются
    pub fn consume(&mut self) -> MotorIntent {
        let snapshot = *self;
        self.jump_pressed = false;
        self.dash_pressed = false;
        snapshot
    }
}

/// Intent для CombatResolver (attack edge, латчится как jump)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct AttackIntent {
    pub attack_pressed: bool,
}

impl AttackIntent {
    pub fn consume(&mut self) -> bool {
        std::mem::take(&mut self.attack_pressed)
    }
}

/// Результат одного logic тика
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameIntent {
    pub motor: MotorIntent,
    pub attack_pressed: bool,
}

/// InputIntentBuilder: InputSource edges → FrameIntent
///
/// Crouch - latch: down включает, up выключает (как в оригинальной схеме
/// GetButtonDown/GetButtonUp), поэтому builder хранит состояние.
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct IntentBuilder {
    crouch_latched: bool,
}

impl IntentBuilder {
    pub fn build(&mut self, source: &dyn InputSource) -> FrameIntent {
        if source.pressed(InputAction::Crouch) {
            self.crouch_latched = true;
        } else if source.released(InputAction::Crouch) {
            self.crouch_latched = false;
        }

        let axis = source.horizontal_axis();
        let move_axis = if axis.is_finite() { axis.clamp(-1.0, 1.0) } else { 0.0 };

        FrameIntent {
            motor: MotorIntent {
                move_axis,
                crouch_held: self.crouch_latched,
                jump_pressed: source.pressed(InputAction::Jump),
                dash_pressed: source.pressed(InputAction::Dash),
            },
            attack_pressed: source.pressed(InputAction::Attack),
        }
    }
}
