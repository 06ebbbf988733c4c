//! Body2D + headless интеграция (gravity, velocity → Transform, ground resolution)
//!
//! Архитектура:
//! - Motor пишет только velocity (как rigid body в движке)
//! - Эти системы - минимальный host physics для headless симуляции:
//!   gravity → integrate → snap на платформы
//! - Детерминизм: fixed timestep, никаких random/realtime зависимостей

use bevy::prelude::*;

use crate::config::SimulationConfig;
use crate::physics::query::{Collider2D, PhysicsWorld};

/// Динамическое тело актора
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Body2D {
    pub velocity: Vec2,
    pub mass: f32,
    /// Множитель гравитации (0 = тело не падает)
    pub gravity_scale: f32,
}

impl Default for Body2D {
    fn default() -> Self {
        Self {
            velocity: Vec2::ZERO,
            mass: 1.0,
            gravity_scale: 3.0,
        }
    }
}

impl Body2D {
    /// Мгновенный импульс: Δv = impulse / mass
    pub fn apply_impulse(&mut self, impulse: Vec2) {
        if self.mass > 0.0 {
            self.velocity += impulse / self.mass;
        }
    }
}

/// System: гравитация
///
/// Мёртвые тела тоже падают: Dead выключает motor и combat, не физику.
pub fn apply_gravity(
    config: Res<SimulationConfig>,
    mut bodies: Query<&mut Body2D>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for mut body in bodies.iter_mut() {
        let scale = body.gravity_scale;
        body.velocity += config.gravity * scale * delta;
    }
}

/// System: velocity → Transform (position += velocity * dt)
pub fn integrate_velocity(mut bodies: Query<(&Body2D, &mut Transform)>, time: Res<Time<Fixed>>) {
    let delta = time.delta_secs();

    for (body, mut transform) in bodies.iter_mut() {
        transform.translation += (body.velocity * delta).extend(0.0);
    }
}

/// System: не проваливаться сквозь платформы
///
/// Если тело падает (vy <= 0) и нижняя грань collider'а ушла в платформу
/// (или центр пересёк её верх за этот шаг) - ставим на верхнюю грань
/// и гасим вертикальную скорость.
pub fn resolve_ground_contacts(
    config: Res<SimulationConfig>,
    world: Res<PhysicsWorld>,
    time: Res<Time<Fixed>>,
    mut bodies: Query<(Entity, &mut Body2D, &mut Transform, &Collider2D)>,
) {
    let mask = config.motor.ground_mask;
    let delta = time.delta_secs();

    for (entity, mut body, mut transform, collider) in bodies.iter_mut() {
        if body.velocity.y > 0.0 {
            continue;
        }

        let center = transform.translation.truncate() + collider.offset;
        // Позиция до integrate_velocity этого тика
        let previous = center - body.velocity * delta;
        let extent = collider.shape.bottom_extent();

        if let Some(top) = world.support_top(previous, center, extent, mask, entity) {
            let resting_y = top + extent - collider.offset.y;
            if transform.translation.y < resting_y {
                transform.translation.y = resting_y;
            }
            body.velocity.y = 0.0;
        }
    }
}
