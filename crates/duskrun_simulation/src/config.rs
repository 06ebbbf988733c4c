//! Simulation config: tuning параметры motor/combat/health/pickups
//!
//! Defaults = значения из оригинальных сцен (jump 500 force × 0.02 s,
//! crouch 0.36, smoothing 0.05, dash 10/40/10, attack 0.5/20/1).
//!
//! Конфиг валидируется при создании (fail fast): невалидный attack rate
//! или нулевой max_health - ошибка конструктора, а не странный cooldown в рантайме.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::physics::layers::{LAYER_ENEMIES, LAYER_GROUND};

/// Ошибка конфигурации (precondition violation)
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} must be positive and finite, got {value}")]
    NonPositive { field: &'static str, value: f32 },

    #[error("{field} must be within [{min}, {max}], got {value}")]
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },

    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },

    #[error("failed to parse simulation config: {0}")]
    Parse(#[from] serde_json::Error),
}

pub(crate) fn require_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

fn require_range(field: &'static str, value: f32, min: f32, max: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= min && value <= max {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, value, min, max })
    }
}

/// Параметры CharacterMotor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Reflect)]
#[serde(default)]
pub struct MotorConfig {
    /// Горизонтальная скорость при move_axis = ±1 (units/sec)
    pub base_speed: f32,
    /// Импульс прыжка (Δv = impulse / mass)
    pub jump_impulse: f32,
    /// Множитель скорости в crouch (1.0 = 100%)
    pub crouch_speed_factor: f32,
    /// Time constant сглаживания горизонтальной скорости (sec)
    pub movement_smoothing: f32,
    /// Управление в воздухе
    pub air_control: bool,

    /// Точка ground check относительно центра актора
    pub ground_check_offset: Vec2,
    pub ground_check_radius: f32,
    /// Точка ceiling check (над головой)
    pub ceiling_check_offset: Vec2,
    pub ceiling_check_radius: f32,
    /// Слои, считающиеся землёй/потолком
    pub ground_mask: u32,

    pub dash_distance: f32,
    pub dash_speed: f32,
    /// Скорость после окончания dash (carry)
    pub after_dash_speed: f32,
    /// Пауза после dash до следующего (sec)
    pub dash_cooldown: f32,

    /// Импульс отталкивания при приземлении на врага
    pub nudge_impulse: f32,
}

impl Default for MotorConfig {
    fn default() -> Self {
        Self {
            base_speed: 8.0,
            jump_impulse: 10.0,
            crouch_speed_factor: 0.36,
            movement_smoothing: 0.05,
            air_control: true,
            ground_check_offset: Vec2::new(0.0, -0.5),
            ground_check_radius: 0.2,
            ceiling_check_offset: Vec2::new(0.0, 1.0),
            ceiling_check_radius: 0.2,
            ground_mask: LAYER_GROUND,
            dash_distance: 10.0,
            dash_speed: 40.0,
            after_dash_speed: 10.0,
            dash_cooldown: 0.25,
            nudge_impulse: 5.0,
        }
    }
}

impl MotorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("base_speed", self.base_speed)?;
        require_positive("jump_impulse", self.jump_impulse)?;
        require_range("crouch_speed_factor", self.crouch_speed_factor, 0.0, 1.0)?;
        require_range("movement_smoothing", self.movement_smoothing, 0.0, 0.3)?;
        require_positive("ground_check_radius", self.ground_check_radius)?;
        require_positive("ceiling_check_radius", self.ceiling_check_radius)?;
        require_positive("dash_distance", self.dash_distance)?;
        require_positive("dash_speed", self.dash_speed)?;
        require_range("after_dash_speed", self.after_dash_speed, 0.0, self.dash_speed)?;
        require_range("dash_cooldown", self.dash_cooldown, 0.0, f32::MAX)?;
        require_range("nudge_impulse", self.nudge_impulse, 0.0, f32::MAX)?;
        if self.ground_mask == 0 {
            return Err(ConfigError::Zero { field: "ground_mask" });
        }
        Ok(())
    }
}

/// Параметры CombatResolver (basic melee attack)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Reflect)]
#[serde(default)]
pub struct CombatConfig {
    /// Радиус overlap вокруг attack point
    pub attack_range: f32,
    pub basic_attack_damage: u32,
    /// Атак в секунду (cooldown = 1 / rate)
    pub attack_rate: f32,
    /// Attack point относительно актора (x зеркалится по facing)
    pub attack_point_offset: Vec2,
    /// Слои целей
    pub enemy_mask: u32,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            attack_range: 0.5,
            basic_attack_damage: 20,
            attack_rate: 1.0,
            attack_point_offset: Vec2::new(0.6, 0.0),
            enemy_mask: LAYER_ENEMIES,
        }
    }
}

impl CombatConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("attack_range", self.attack_range)?;
        require_positive("attack_rate", self.attack_rate)?;
        if self.enemy_mask == 0 {
            return Err(ConfigError::Zero { field: "enemy_mask" });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Reflect)]
#[serde(default)]
pub struct HealthConfig {
    pub player_max_health: u32,
    pub enemy_max_health: u32,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            player_max_health: 100,
            enemy_max_health: 100,
        }
    }
}

impl HealthConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.player_max_health == 0 {
            return Err(ConfigError::Zero { field: "player_max_health" });
        }
        if self.enemy_max_health == 0 {
            return Err(ConfigError::Zero { field: "enemy_max_health" });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Reflect)]
#[serde(default)]
pub struct PickupConfig {
    /// Сколько HP восстанавливает health potion
    pub potion_heal: u32,
}

impl Default for PickupConfig {
    fn default() -> Self {
        Self { potion_heal: 20 }
    }
}

/// Полный конфиг симуляции (Resource)
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize, Reflect)]
#[reflect(Resource)]
#[serde(default)]
pub struct SimulationConfig {
    /// Частота FixedUpdate (Hz)
    pub fixed_hz: f32,
    /// Гравитация (units/sec²), умножается на Body2D::gravity_scale
    pub gravity: Vec2,
    pub motor: MotorConfig,
    pub combat: CombatConfig,
    pub health: HealthConfig,
    pub pickups: PickupConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            fixed_hz: 64.0,
            gravity: Vec2::new(0.0, -9.81),
            motor: MotorConfig::default(),
            combat: CombatConfig::default(),
            health: HealthConfig::default(),
            pickups: PickupConfig::default(),
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("fixed_hz", self.fixed_hz)?;
        if !self.gravity.is_finite() {
            return Err(ConfigError::NonPositive {
                field: "gravity",
                value: self.gravity.y,
            });
        }
        self.motor.validate()?;
        self.combat.validate()?;
        self.health.validate()
    }

    /// Парсит JSON overrides (недостающие поля = defaults) и валидирует
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: SimulationConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Шаг FixedUpdate
    pub fn fixed_timestep(&self) -> std::time::Duration {
        std::time::Duration::from_secs_f64(1.0 / self.fixed_hz as f64)
    }
}
