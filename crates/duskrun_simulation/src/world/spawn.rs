//! Spawn helpers: игрок, враги, платформы, pickups, trigger zones
//!
//! Конфиг motor/combat/health валидируется здесь (fail fast при spawn).

use bevy::prelude::*;

use crate::combat::CombatResolver;
use crate::components::{Enemy, Health, Player};
use crate::config::{ConfigError, SimulationConfig};
use crate::interaction::{Pickup, TriggerZone};
use crate::movement::CharacterMotor;
use crate::physics::layers::{LAYER_ENEMIES, LAYER_GROUND, LAYER_PICKUPS, LAYER_PLAYER, LAYER_TRIGGERS};
use crate::physics::{Body2D, Collider2D, SecondaryCollider};

/// Радиус основного (нижнего) collider'а актора
pub const ACTOR_RADIUS: f32 = 0.5;
/// Верхний collider игрока (выключается в crouch)
pub const PLAYER_UPPER_RADIUS: f32 = 0.4;
pub const PLAYER_UPPER_OFFSET: Vec2 = Vec2::new(0.0, 0.6);
const PICKUP_RADIUS: f32 = 0.25;

/// Spawn игрока с полным набором компонентов
///
/// Required Components (Player → Actor) добавят MotionState, intents,
/// ContactMemory; здесь - сконфигурированные motor/resolver/health/colliders.
pub fn spawn_player(
    commands: &mut Commands,
    config: &SimulationConfig,
    position: Vec2,
) -> Result<Entity, ConfigError> {
    let health = Health::try_new(config.health.player_max_health)?;
    let motor = CharacterMotor::new(config.motor.clone())?;
    let resolver = CombatResolver::new(config.combat.clone())?;

    let upper = Collider2D::circle(PLAYER_UPPER_RADIUS, LAYER_PLAYER).with_offset(PLAYER_UPPER_OFFSET);

    let entity = commands
        .spawn((
            Player,
            Transform::from_translation(position.extend(0.0)),
            health,
            Body2D::default(),
            motor,
            resolver,
            Collider2D::circle(ACTOR_RADIUS, LAYER_PLAYER),
            SecondaryCollider::new(upper),
        ))
        .id();

    crate::logger::log_info(&format!("Player spawned at {:?} ({:?})", position, entity));
    Ok(entity)
}

/// Spawn врага (цель атак, источник nudge)
pub fn spawn_enemy(
    commands: &mut Commands,
    config: &SimulationConfig,
    position: Vec2,
) -> Result<Entity, ConfigError> {
    let health = Health::try_new(config.health.enemy_max_health)?;

    let entity = commands
        .spawn((
            Enemy,
            Transform::from_translation(position.extend(0.0)),
            health,
            Body2D::default(),
            Collider2D::circle(ACTOR_RADIUS, LAYER_ENEMIES),
        ))
        .id();
    Ok(entity)
}

/// Spawn статичной платформы (AABB на LAYER_GROUND)
pub fn spawn_platform(commands: &mut Commands, center: Vec2, half_extents: Vec2) -> Entity {
    commands
        .spawn((
            Transform::from_translation(center.extend(0.0)),
            Collider2D::rect(half_extents, LAYER_GROUND),
        ))
        .id()
}

pub fn spawn_pickup(commands: &mut Commands, pickup: Pickup, position: Vec2) -> Entity {
    commands
        .spawn((
            pickup,
            Transform::from_translation(position.extend(0.0)),
            Collider2D::circle(PICKUP_RADIUS, LAYER_PICKUPS),
        ))
        .id()
}

/// Health potion с heal из конфига
pub fn spawn_health_potion(commands: &mut Commands, config: &SimulationConfig, position: Vec2) -> Entity {
    let heal = config.pickups.potion_heal;
    spawn_pickup(commands, Pickup::HealthPotion { heal }, position)
}

pub fn spawn_trigger_zone(
    commands: &mut Commands,
    zone: TriggerZone,
    center: Vec2,
    half_extents: Vec2,
) -> Entity {
    commands
        .spawn((
            zone,
            Transform::from_translation(center.extend(0.0)),
            Collider2D::rect(half_extents, LAYER_TRIGGERS),
        ))
        .id()
}
