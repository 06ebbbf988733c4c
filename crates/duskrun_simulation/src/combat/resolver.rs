//! CombatResolver - basic melee attack
//!
//! try_attack:
//! 1. Cooldown gate (`now >= next_allowed_time`), иначе AttackOutcome::None
//! 2. overlap_circle(attack point, attack_range, enemy_mask)
//! 3. Каждому hit с Health capability - basic_attack_damage
//!
//! Анимация/звук атаки - забота ECS слоя (по AttackOutcome::Performed).

use bevy::prelude::*;

use crate::components::HealthChange;
use crate::config::{CombatConfig, ConfigError};
use crate::physics::PhysicsQuery;

use super::cooldown::AttackCooldown;
use super::damage::HealthTargets;

/// Результат попадания по одной цели
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitReport {
    pub target: Entity,
    pub damage: u32,
    pub change: HealthChange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttackOutcome {
    /// Cooldown ещё идёт - ни query, ни урона
    None,
    /// Атака состоялась (hits может быть пустым - промах)
    Performed { hits: Vec<HitReport> },
}

impl AttackOutcome {
    pub fn is_performed(&self) -> bool {
        matches!(self, AttackOutcome::Performed { .. })
    }

    pub fn hit_count(&self) -> usize {
        match self {
            AttackOutcome::None => 0,
            AttackOutcome::Performed { hits } => hits.len(),
        }
    }
}

/// Melee атакующий (игрок)
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct CombatResolver {
    config: CombatConfig,
    cooldown: AttackCooldown,
}

impl Default for CombatResolver {
    fn default() -> Self {
        Self {
            config: CombatConfig::default(),
            cooldown: AttackCooldown::default(),
        }
    }
}

impl CombatResolver {
    pub fn new(config: CombatConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let cooldown = AttackCooldown::new(config.attack_rate)?;
        Ok(Self { config, cooldown })
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    pub fn cooldown(&self) -> &AttackCooldown {
        &self.cooldown
    }

    /// Attack point: позиция + offset, x зеркалится по facing
    pub fn attack_origin(&self, position: Vec2, facing_right: bool) -> Vec2 {
        let mut offset = self.config.attack_point_offset;
        if !facing_right {
            offset.x = -offset.x;
        }
        position + offset
    }

    pub fn try_attack(
        &mut self,
        now: f32,
        origin: Vec2,
        physics: &dyn PhysicsQuery,
        targets: &mut dyn HealthTargets,
    ) -> AttackOutcome {
        if !self.cooldown.try_consume(now) {
            return AttackOutcome::None;
        }

        let damage = self.config.basic_attack_damage;
        let hits = physics
            .overlap_circle(origin, self.config.attack_range, self.config.enemy_mask)
            .into_iter()
            .filter_map(|target| {
                // Нет Health - просто пропускаем
                let health = targets.as_health_target(target)?;
                Some(HitReport {
                    target,
                    damage,
                    change: health.take_damage(damage),
                })
            })
            .collect();

        AttackOutcome::Performed { hits }
    }
}
