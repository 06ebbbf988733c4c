//! AttackCooldown - rate-gated attack window
//!
//! Время абсолютное (секунды симуляции), а не убывающий таймер:
//! `now >= next_allowed_time` → атака разрешена.

use bevy::prelude::*;

use crate::config::{require_positive, ConfigError};

#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct AttackCooldown {
    next_allowed_time: f32,
    /// Атак в секунду (> 0)
    rate: f32,
}

impl Default for AttackCooldown {
    fn default() -> Self {
        Self {
            next_allowed_time: 0.0,
            rate: 1.0,
        }
    }
}

impl AttackCooldown {
    pub fn new(rate: f32) -> Result<Self, ConfigError> {
        require_positive("attack_rate", rate)?;
        Ok(Self {
            next_allowed_time: 0.0,
            rate,
        })
    }

    pub fn rate(&self) -> f32 {
        self.rate
    }

    pub fn next_allowed_time(&self) -> f32 {
        self.next_allowed_time
    }

    pub fn is_ready(&self, now: f32) -> bool {
        now >= self.next_allowed_time
    }

    /// Занять окно атаки. `false` - cooldown ещё идёт, состояние не меняется.
    pub fn try_consume(&mut self, now: f32) -> bool {
        if !self.is_ready(now) {
            return false;
        }

        self.next_allowed_time = now + 1.0 / self.rate;
        true
    }
}
