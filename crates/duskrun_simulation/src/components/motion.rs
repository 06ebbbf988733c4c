//! MotionState - grounded/airborne/crouching/dashing статус актора

use bevy::prelude::*;

/// Состояние движения актора
///
/// Мутируется только CharacterMotor.
/// Инвариант: `dashing && crouching` никогда не true одновременно.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct MotionState {
    pub grounded: bool,
    pub crouching: bool,
    pub dashing: bool,
    pub facing_right: bool,
    /// Double jump уже использован в этом airborne периоде
    pub double_jump_used: bool,
    /// Внутренняя скорость smooth damp (не velocity тела!)
    pub smoothed_velocity: Vec2,
}

impl Default for MotionState {
    fn default() -> Self {
        Self {
            grounded: false,
            crouching: false,
            dashing: false,
            facing_right: true,
            double_jump_used: false,
            smoothed_velocity: Vec2::ZERO,
        }
    }
}

/// Фаза state machine (производная от флагов)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum MotionPhase {
    Grounded,
    Airborne,
    Crouching,
    Dashing,
}

impl MotionState {
    /// Приоритет: Dashing > Crouching > Grounded/Airborne
    pub fn phase(&self) -> MotionPhase {
        if self.dashing {
            MotionPhase::Dashing
        } else if self.crouching {
            MotionPhase::Crouching
        } else if self.grounded {
            MotionPhase::Grounded
        } else {
            MotionPhase::Airborne
        }
    }

    /// +1 вправо, -1 влево
    pub fn facing_sign(&self) -> f32 {
        if self.facing_right {
            1.0
        } else {
            -1.0
        }
    }
}
