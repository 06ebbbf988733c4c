//! ContactMemory - enter detection для overlap контактов
//!
//! PhysicsWorld отдаёт только "что касается сейчас". Enter callbacks
//! (collision/trigger enter) = разница с прошлым тиком.

use bevy::prelude::*;

/// Контакты актора на прошлом тике
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct ContactMemory {
    enemies: Vec<Entity>,
    zones: Vec<Entity>,
}

impl ContactMemory {
    /// Обновить контакты с врагами, вернуть новые (enter)
    pub fn enter_enemies(&mut self, touching: Vec<Entity>) -> Vec<Entity> {
        track_enter(&mut self.enemies, touching)
    }

    /// Обновить контакты с trigger zones, вернуть новые (enter)
    pub fn enter_zones(&mut self, touching: Vec<Entity>) -> Vec<Entity> {
        track_enter(&mut self.zones, touching)
    }

    pub fn touching_enemy(&self, enemy: Entity) -> bool {
        self.enemies.contains(&enemy)
    }

    pub fn inside_zone(&self, zone: Entity) -> bool {
        self.zones.contains(&zone)
    }
}

fn track_enter(previous: &mut Vec<Entity>, current: Vec<Entity>) -> Vec<Entity> {
    let entered = current
        .iter()
        .copied()
        .filter(|entity| !previous.contains(entity))
        .collect();
    *previous = current;
    entered
}
