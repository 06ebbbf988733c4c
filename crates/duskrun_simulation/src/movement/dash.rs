//! DashSession - dash как state machine, продвигаемая по одному fixed шагу
//!
//! Никаких блокирующих ожиданий: сессия живёт внутри CharacterMotor,
//! каждый fixed тик вызывается `advance`, отмена - просто drop сессии.

use bevy::prelude::*;

/// Остаток дистанции, который считаем нулём (погрешность f32 накопления)
pub const DASH_DISTANCE_EPSILON: f32 = 1e-4;

/// Результат одного шага dash
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashStep {
    /// Дистанция ещё осталась
    Continue,
    /// Дистанция исчерпана - сессия закончена
    Finished,
}

/// Активный dash
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct DashSession {
    /// Unit vector (±X по facing)
    pub direction: Vec2,
    pub distance_remaining: f32,
}

impl DashSession {
    pub fn new(facing_right: bool, distance: f32) -> Self {
        let direction = if facing_right { Vec2::X } else { Vec2::NEG_X };
        Self {
            direction,
            distance_remaining: distance.max(0.0),
        }
    }

    /// Продвинуть на один fixed шаг: съедаем `min(speed * dt, remaining)`
    pub fn advance(&mut self, dash_speed: f32, dt: f32) -> DashStep {
        let step = (dash_speed * dt).min(self.distance_remaining);
        self.distance_remaining -= step;

        if self.distance_remaining <= DASH_DISTANCE_EPSILON {
            self.distance_remaining = 0.0;
            DashStep::Finished
        } else {
            DashStep::Continue
        }
    }
}
