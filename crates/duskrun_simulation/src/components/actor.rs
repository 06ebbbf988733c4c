//! Базовые компоненты акторов: Actor, Player, Enemy, Health

use bevy::prelude::*;

use crate::combat::CombatResolver;
use crate::config::ConfigError;
use crate::input::{AttackIntent, IntentBuilder, MotorIntent};
use crate::interaction::ContactMemory;
use crate::movement::CharacterMotor;
use crate::physics::Body2D;

use super::motion::MotionState;

/// Актор (игрок, враг) - базовый компонент для живых существ
///
/// Автоматически добавляет Health, Body2D, Transform через Required Components.
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
#[require(Health, Body2D, Transform)]
pub struct Actor;

/// Marker: управляемый игроком актор (input → motor/combat)
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
#[require(
    Actor,
    MotionState,
    CharacterMotor,
    CombatResolver,
    MotorIntent,
    AttackIntent,
    IntentBuilder,
    ContactMemory
)]
pub struct Player;

/// Marker: враг (tag "enemy" - цель атак, источник nudge)
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
#[require(Actor)]
pub struct Enemy;

/// Результат мутации Health
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthChange {
    /// Ничего не изменилось (0 урона/лечения, мёртв, уже full)
    Unchanged,
    Damaged { amount: u32, current: u32 },
    Healed { amount: u32, current: u32 },
    /// current дошёл до 0 - ровно один раз за жизнь актора
    Died { amount: u32 },
}

impl HealthChange {
    pub fn is_changed(&self) -> bool {
        !matches!(self, HealthChange::Unchanged)
    }

    pub fn is_death(&self) -> bool {
        matches!(self, HealthChange::Died { .. })
    }
}

/// Здоровье актора (HealthPool)
///
/// Инвариант: 0 ≤ current ≤ max, max > 0.
/// current == 0 - терминальное Dead состояние: урон и лечение дальше no-op.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct Health {
    current: u32,
    max: u32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100) // Default 100 HP
    }
}

impl Health {
    /// Полное здоровье. `max == 0` поднимается до 1; для значений из
    /// конфига - `try_new`.
    pub fn new(max: u32) -> Self {
        let max = max.max(1);
        Self { current: max, max }
    }

    /// Fail fast: `max == 0` - ошибка конфигурации
    pub fn try_new(max: u32) -> Result<Self, ConfigError> {
        if max == 0 {
            return Err(ConfigError::Zero { field: "max_health" });
        }
        Ok(Self { current: max, max })
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    pub fn is_dead(&self) -> bool {
        self.current == 0
    }

    /// Доля HP (для health bar)
    pub fn fraction(&self) -> f32 {
        self.current as f32 / self.max as f32
    }

    pub fn take_damage(&mut self, amount: u32) -> HealthChange {
        if amount == 0 || self.is_dead() {
            return HealthChange::Unchanged;
        }

        let before = self.current;
        self.current = self.current.saturating_sub(amount);

        if self.current == 0 {
            HealthChange::Died { amount: before }
        } else {
            HealthChange::Damaged {
                amount: before - self.current,
                current: self.current,
            }
        }
    }

    pub fn heal(&mut self, amount: u32) -> HealthChange {
        // Revive не поддерживается: мёртвого не лечим
        if amount == 0 || self.is_dead() {
            return HealthChange::Unchanged;
        }

        let healed = self.current.saturating_add(amount).min(self.max);
        if healed == self.current {
            return HealthChange::Unchanged;
        }

        let amount = healed - self.current;
        self.current = healed;
        HealthChange::Healed {
            amount,
            current: self.current,
        }
    }
}
