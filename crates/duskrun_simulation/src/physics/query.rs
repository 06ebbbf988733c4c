//! PhysicsQuery - overlap queries для motor/combat/pickups
//!
//! Архитектура:
//! - Core логика видит физику только через trait `PhysicsQuery`
//!   (overlap circle + overlap test), не зависит от конкретного движка
//! - `PhysicsWorld` - встроенная реализация: snapshot всех ECS colliders,
//!   пересобирается один раз в начале каждого FixedUpdate тика
//! - Хост с настоящим physics engine реализует trait сам

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::combat::Dead;

/// Overlap queries (consumed, не реализуются motor/combat логикой)
///
/// `BodyRef` = `Entity` тела, которому принадлежит collider.
pub trait PhysicsQuery {
    /// Все тела с collider'ом на слоях `mask`, пересекающим круг.
    /// Каждое тело возвращается один раз.
    fn overlap_circle(&self, center: Vec2, radius: f32, mask: u32) -> Vec<Entity>;

    /// Есть ли хоть одно пересечение
    fn overlap_test(&self, center: Vec2, radius: f32, mask: u32) -> bool {
        !self.overlap_circle(center, radius, mask).is_empty()
    }
}

/// Форма collider'а
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Reflect)]
pub enum ColliderShape {
    Circle { radius: f32 },
    /// Axis-aligned прямоугольник (платформы, стены)
    Rect { half_extents: Vec2 },
}

impl ColliderShape {
    /// Пересекает ли форма (с центром `shape_center`) круг `center`/`radius`
    pub fn overlaps_circle(&self, shape_center: Vec2, center: Vec2, radius: f32) -> bool {
        match *self {
            ColliderShape::Circle { radius: own } => {
                let reach = own + radius;
                shape_center.distance_squared(center) <= reach * reach
            }
            ColliderShape::Rect { half_extents } => {
                let closest = center.clamp(shape_center - half_extents, shape_center + half_extents);
                closest.distance_squared(center) <= radius * radius
            }
        }
    }

    /// Радиус описанной окружности
    pub fn bounding_radius(&self) -> f32 {
        match *self {
            ColliderShape::Circle { radius } => radius,
            ColliderShape::Rect { half_extents } => half_extents.length(),
        }
    }

    /// Расстояние от центра до нижней грани (для ground resolution)
    pub fn bottom_extent(&self) -> f32 {
        match *self {
            ColliderShape::Circle { radius } => radius,
            ColliderShape::Rect { half_extents } => half_extents.y,
        }
    }
}

/// Collider тела (позиция = Transform + offset)
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Collider2D {
    pub shape: ColliderShape,
    pub offset: Vec2,
    /// Битовая маска слоя (см. `layers`)
    pub layers: u32,
}

impl Collider2D {
    pub fn circle(radius: f32, layers: u32) -> Self {
        Self {
            shape: ColliderShape::Circle { radius },
            offset: Vec2::ZERO,
            layers,
        }
    }

    pub fn rect(half_extents: Vec2, layers: u32) -> Self {
        Self {
            shape: ColliderShape::Rect { half_extents },
            offset: Vec2::ZERO,
            layers,
        }
    }

    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }
}

/// Второй collider актора (верхняя часть тела), выключается в crouch
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct SecondaryCollider {
    pub collider: Collider2D,
    pub enabled: bool,
}

impl SecondaryCollider {
    pub fn new(collider: Collider2D) -> Self {
        Self {
            collider,
            enabled: true,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct ColliderEntry {
    body: Entity,
    center: Vec2,
    shape: ColliderShape,
    layers: u32,
}

/// Snapshot colliders на текущий fixed тик
#[derive(Resource, Debug, Default)]
pub struct PhysicsWorld {
    entries: Vec<ColliderEntry>,
}

impl PhysicsWorld {
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Добавить collider тела `body`, стоящего в `position`
    pub fn insert(&mut self, body: Entity, position: Vec2, collider: &Collider2D) {
        self.entries.push(ColliderEntry {
            body,
            center: position + collider.offset,
            shape: collider.shape,
            layers: collider.layers,
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Верхняя грань самой высокой Rect-опоры под кругом.
    ///
    /// Опора засчитывается, если центр круга выше её верхней грани
    /// (стоим сверху, а не упёрлись сбоку), либо если за шаг
    /// `previous → center` центр пересёк верхнюю грань над платформой.
    /// Второе ловит быстрое падение, когда за тик тело проскакивает
    /// больше своего `radius`.
    pub fn support_top(
        &self,
        previous: Vec2,
        center: Vec2,
        radius: f32,
        mask: u32,
        ignore: Entity,
    ) -> Option<f32> {
        self.entries
            .iter()
            .filter(|entry| entry.layers & mask != 0 && entry.body != ignore)
            .filter_map(|entry| match entry.shape {
                ColliderShape::Rect { half_extents } => {
                    let top = entry.center.y + half_extents.y;
                    let supported = if center.y >= top {
                        entry.shape.overlaps_circle(entry.center, center, radius)
                    } else {
                        crossed_top(previous, center, top)
                            .is_some_and(|x| (x - entry.center.x).abs() <= half_extents.x)
                    };
                    supported.then_some(top)
                }
                ColliderShape::Circle { .. } => None,
            })
            .reduce(f32::max)
    }
}

/// X, на котором отрезок `previous → center` пересёк уровень `top` сверху вниз
fn crossed_top(previous: Vec2, center: Vec2, top: f32) -> Option<f32> {
    if previous.y < top || center.y >= top {
        return None;
    }

    let t = (previous.y - top) / (previous.y - center.y);
    Some(previous.x + (center.x - previous.x) * t)
}

impl PhysicsQuery for PhysicsWorld {
    fn overlap_circle(&self, center: Vec2, radius: f32, mask: u32) -> Vec<Entity> {
        let mut bodies: Vec<Entity> = Vec::new();
        for entry in &self.entries {
            if entry.layers & mask == 0 {
                continue;
            }
            if !entry.shape.overlaps_circle(entry.center, center, radius) {
                continue;
            }
            // Актор может иметь 2 collider'а - возвращаем тело один раз
            if !bodies.contains(&entry.body) {
                bodies.push(entry.body);
            }
        }
        bodies
    }

    fn overlap_test(&self, center: Vec2, radius: f32, mask: u32) -> bool {
        self.entries.iter().any(|entry| {
            entry.layers & mask != 0 && entry.shape.overlaps_circle(entry.center, center, radius)
        })
    }
}

/// System: пересобрать PhysicsWorld из ECS colliders
///
/// Мёртвые акторы из snapshot исключаются (по ним нельзя попасть/встать).
pub fn sync_physics_world(
    mut world: ResMut<PhysicsWorld>,
    colliders: Query<(Entity, &Transform, &Collider2D, Option<&SecondaryCollider>), Without<Dead>>,
) {
    world.clear();

    for (entity, transform, collider, secondary) in colliders.iter() {
        let position = transform.translation.truncate();
        world.insert(entity, position, collider);

        if let Some(secondary) = secondary.filter(|s| s.enabled) {
            world.insert(entity, position, &secondary.collider);
        }
    }
}
