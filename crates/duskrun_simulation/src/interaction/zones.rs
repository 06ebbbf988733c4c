//! Trigger zones: level portals и финальный portal

use bevy::prelude::*;

use crate::combat::Dead;
use crate::components::Player;
use crate::physics::layers::LAYER_TRIGGERS;
use crate::physics::{Collider2D, PhysicsQuery, PhysicsWorld};

use super::contacts::ContactMemory;

/// Trigger zone (collider на LAYER_TRIGGERS)
#[derive(Component, Debug, Clone, PartialEq, Eq, Reflect)]
#[reflect(Component)]
#[require(Transform)]
pub enum TriggerZone {
    /// Переход на следующий уровень
    LevelPortal { level: String },
    /// Конец игры: симуляция ставится на паузу
    GameEndPortal,
}

/// Event: запрос смены уровня (загрузка сцены - забота хоста)
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub enum LevelTransition {
    NextLevel { level: String },
    GameEnd,
}

/// System: вход игрока в trigger zone
///
/// GameEndPortal ставит `Time<Virtual>` на паузу - FixedUpdate перестаёт тикать.
pub fn enter_trigger_zones(
    physics: Res<PhysicsWorld>,
    mut virtual_time: ResMut<Time<Virtual>>,
    mut players: Query<(&Transform, &Collider2D, &mut ContactMemory), (With<Player>, Without<Dead>)>,
    zones: Query<&TriggerZone>,
    mut transitions: EventWriter<LevelTransition>,
) {
    for (transform, collider, mut contacts) in players.iter_mut() {
        let touching = physics.overlap_circle(
            transform.translation.truncate() + collider.offset,
            collider.shape.bounding_radius(),
            LAYER_TRIGGERS,
        );

        for zone in contacts.enter_zones(touching) {
            let Ok(zone) = zones.get(zone) else {
                continue;
            };

            match zone {
                TriggerZone::LevelPortal { level } => {
                    crate::logger::log_info(&format!("Level portal → {}", level));
                    transitions.write(LevelTransition::NextLevel {
                        level: level.clone(),
                    });
                }
                TriggerZone::GameEndPortal => {
                    crate::logger::log_info("Game end portal reached, pausing simulation");
                    transitions.write(LevelTransition::GameEnd);
                    virtual_time.pause();
                }
            }
        }
    }
}
