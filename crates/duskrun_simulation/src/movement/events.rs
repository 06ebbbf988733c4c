//! Movement events

use bevy::prelude::*;

/// Сигнал от CharacterMotor (без entity - core не знает про ECS)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotionSignal {
    /// grounded: false → true
    Landed,
    Jumped { double_jump: bool },
    CrouchChanged { crouching: bool },
    /// Разворот: хост зеркалит scale.x
    FacingChanged { facing_right: bool },
    DashStarted { direction: Vec2 },
    DashEnded { cancelled: bool },
    /// One-shot импульс от врага снизу
    Nudged { impulse: Vec2 },
}

/// Event: сигнал motor'а конкретного актора
///
/// Генерируется: drive_character_motors, nudge_on_enemy_contact, cancel_dashes
/// Обрабатывается: presentation (animation/audio), mirror_facing, тесты
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct MotionEvent {
    pub entity: Entity,
    pub signal: MotionSignal,
}

/// Event: прервать dash (стена, урон, скрипт)
///
/// DashEnded { cancelled: true } приходит в тот же fixed тик.
#[derive(Event, Debug, Clone, Copy)]
pub struct CancelDash {
    pub entity: Entity,
}
