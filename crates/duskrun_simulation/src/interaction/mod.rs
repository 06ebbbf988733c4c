//! Interaction domain - касания игрока с миром
//!
//! Содержит:
//! - ContactMemory (enter detection поверх overlap queries)
//! - Pickups: Coin → CoinCounter, HealthPotion → heal
//! - Trigger zones: LevelPortal / GameEndPortal → LevelTransition
//!
//! Работает в SimulationSet::Interaction (после интеграции тел).

use bevy::prelude::*;

use crate::SimulationSet;

pub mod contacts;
pub mod pickups;
pub mod zones;

// Re-export
pub use contacts::ContactMemory;
pub use pickups::{collect_pickups, CoinCounter, Pickup};
pub use zones::{enter_trigger_zones, LevelTransition, TriggerZone};

/// Interaction Plugin
pub struct InteractionPlugin;

impl Plugin for InteractionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CoinCounter>()
            .add_event::<LevelTransition>();

        app.register_type::<Pickup>()
            .register_type::<TriggerZone>()
            .register_type::<CoinCounter>();

        app.add_systems(
            FixedUpdate,
            (collect_pickups, enter_trigger_zones)
                .chain()
                .in_set(SimulationSet::Interaction),
        );
    }
}
