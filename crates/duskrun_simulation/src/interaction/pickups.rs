//! Pickups: coins и health potions
//!
//! Касание игрока → despawn pickup + эффект + позиционный звук.

use bevy::prelude::*;

use crate::combat::{Dead, HealthEventWriters};
use crate::components::{Health, Player};
use crate::physics::layers::LAYER_PICKUPS;
use crate::physics::{Collider2D, PhysicsQuery, PhysicsWorld};
use crate::signals::{SoundCue, SOUND_COLLECT_COIN, SOUND_COLLECT_POTION};

/// Подбираемый предмет (collider на LAYER_PICKUPS)
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
#[require(Transform)]
pub enum Pickup {
    Coin,
    HealthPotion { heal: u32 },
}

/// Счётчик собранных монет (CoinManager)
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Resource)]
pub struct CoinCounter {
    pub coins: u32,
}

/// System: подбор pickups живым игроком
pub fn collect_pickups(
    mut commands: Commands,
    physics: Res<PhysicsWorld>,
    mut coins: ResMut<CoinCounter>,
    players: Query<(Entity, &Transform, &Collider2D), (With<Player>, Without<Dead>)>,
    pickups: Query<&Pickup>,
    mut healths: Query<&mut Health>,
    mut health_events: HealthEventWriters,
    mut sounds: EventWriter<SoundCue>,
    mut collected: Local<Vec<Entity>>,
) {
    collected.clear();

    for (player, transform, collider) in players.iter() {
        let position = transform.translation.truncate();
        let touching = physics.overlap_circle(
            position + collider.offset,
            collider.shape.bounding_radius(),
            LAYER_PICKUPS,
        );

        for item in touching {
            // Despawn через Commands - второй игрок в этом тике не должен подобрать
            if collected.contains(&item) {
                continue;
            }
            let Ok(pickup) = pickups.get(item) else {
                continue;
            };

            match *pickup {
                Pickup::Coin => {
                    coins.coins += 1;
                    sounds.write(SoundCue::at(SOUND_COLLECT_COIN, position));
                    crate::logger::log(&format!("Coin collected (total: {})", coins.coins));
                }
                Pickup::HealthPotion { heal } => {
                    if let Ok(mut health) = healths.get_mut(player) {
                        let change = health.heal(heal);
                        health_events.report(player, None, change, &health);
                    }
                    sounds.write(SoundCue::at(SOUND_COLLECT_POTION, position));
                    crate::logger::log(&format!("Player replenished {} health", heal));
                }
            }

            collected.push(item);
            commands.entity(item).despawn();
        }
    }
}
