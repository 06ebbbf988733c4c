//! Combat module
//!
//! ECS ответственность:
//! - Game state: Health, CombatResolver (cooldown), Dead
//! - Combat rules: cooldown gate, overlap hit detection, damage через capability
//! - Events: DamageDealt, EntityDied, HealthChanged
//!
//! Animation/audio - через signals (AnimationSignal, SoundCue).

use bevy::prelude::*;

use crate::SimulationSet;

pub mod cooldown;
pub mod damage;
pub mod resolver;
pub mod systems;


// Re-export основных типов
pub use cooldown::AttackCooldown;
pub use damage::{
    DamageDealt, DamageRequest, Dead, EntityDied, HealRequest, HealthChanged, HealthEventWriters,
    HealthTarget, HealthTargets,
};
pub use resolver::{AttackOutcome, CombatResolver, HitReport};
pub use systems::{apply_health_requests, handle_deaths, resolve_attacks};

/// Combat Plugin
///
/// Регистрирует combat системы в FixedUpdate (64Hz).
///
/// Порядок выполнения:
/// 1. resolve_attacks (Combat) - attack intent → hits → урон
/// 2. apply_health_requests (Health) - внешний урон/лечение
/// 3. handle_deaths (Health) - Dead marker, обнуление velocity/intents
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        // Регистрация событий
        app.add_event::<DamageDealt>()
            .add_event::<EntityDied>()
            .add_event::<HealthChanged>()
            .add_event::<DamageRequest>()
            .add_event::<HealRequest>();

        app.register_type::<Dead>()
            .register_type::<CombatResolver>()
            .register_type::<crate::components::Health>();

        app.add_systems(FixedUpdate, resolve_attacks.in_set(SimulationSet::Combat));

        app.add_systems(
            FixedUpdate,
            (apply_health_requests, handle_deaths)
                .chain()
                .in_set(SimulationSet::Health),
        );
    }
}
