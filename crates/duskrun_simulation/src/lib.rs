//! DUSKRUN Simulation Core
//!
//! ECS-симуляция 2D платформера на Bevy 0.16 (headless)
//!
//! Архитектура:
//! - Core логика (CharacterMotor, CombatResolver, Health) - чистые типы,
//!   физику видит только через trait PhysicsQuery
//! - ECS = host: components хранят state, системы в FixedUpdate (64Hz)
//!   вызывают core, Bevy Events - очередь к animation/audio/UI
//! - Input захватывается в PreUpdate, edges держатся до fixed тика

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod combat;
pub mod components;
pub mod config;
pub mod input;
pub mod interaction;
pub mod logger;
pub mod movement;
pub mod physics;
pub mod signals;
pub mod world;

// Re-export базовых типов для удобства
pub use combat::{
    AttackOutcome, CombatPlugin, CombatResolver, DamageDealt, DamageRequest, Dead, EntityDied,
    HealRequest, HealthChanged, HealthTarget, HealthTargets,
};
pub use components::*;
pub use config::{CombatConfig, ConfigError, HealthConfig, MotorConfig, PickupConfig, SimulationConfig};
pub use input::{
    AttackIntent, InputAction, InputFrame, InputPlugin, InputSource, MotorIntent, PlayerInput,
    ScriptedInput,
};
pub use interaction::{CoinCounter, InteractionPlugin, LevelTransition, Pickup, TriggerZone};
pub use logger::*;
pub use movement::{CancelDash, CharacterMotor, MotionEvent, MotionSignal, MovementPlugin};
pub use physics::{Body2D, Collider2D, PhysicsPlugin, PhysicsQuery, PhysicsWorld, SecondaryCollider};
pub use signals::{AnimValue, AnimationSignal, SignalsPlugin, SoundCue};

/// Фазы fixed тика (выполняются строго по порядку)
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Snapshot colliders → PhysicsWorld
    Snapshot,
    /// CharacterMotor: ground check, crouch, dash, jump, nudge
    Motor,
    /// CombatResolver: attacks
    Combat,
    /// Внешние мутации Health, смерть
    Health,
    /// Gravity → velocity integration → ground resolution
    Integrate,
    /// Pickups, trigger zones
    Interaction,
    /// MotionEvent/damage → AnimationSignal/SoundCue
    Presentation,
}

/// Главный plugin симуляции (объединяет все подсистемы)
///
/// Берёт SimulationConfig из World (если хост вставил свой) или default.
/// Невалидный конфиг заменяется default с ошибкой в лог.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        let mut config = app
            .world()
            .get_resource::<SimulationConfig>()
            .cloned()
            .unwrap_or_default();

        if let Err(err) = config.validate() {
            log_error(&format!("Invalid SimulationConfig ({}), falling back to defaults", err));
            config = SimulationConfig::default();
        }

        app.insert_resource(Time::<Fixed>::from_hz(config.fixed_hz as f64))
            .insert_resource(config)
            .register_type::<SimulationConfig>();

        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }

        app.configure_sets(
            FixedUpdate,
            (
                SimulationSet::Snapshot,
                SimulationSet::Motor,
                SimulationSet::Combat,
                SimulationSet::Health,
                SimulationSet::Integrate,
                SimulationSet::Interaction,
                SimulationSet::Presentation,
            )
                .chain(),
        );

        // Подсистемы
        app.add_plugins((
            PhysicsPlugin,
            InputPlugin,
            MovementPlugin,
            CombatPlugin,
            InteractionPlugin,
            SignalsPlugin,
        ));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed));

    app
}

/// Headless App, где каждый `app.update()` = ровно один fixed тик
///
/// Время продвигается вручную на `fixed_timestep()`. Первый update
/// только инициализирует часы (delta = 0), fixed тиков в нём нет.
pub fn create_stepped_app(seed: u64, config: SimulationConfig) -> Result<App, ConfigError> {
    config.validate()?;
    let step = config.fixed_timestep();

    let mut app = create_headless_app(seed);
    app.insert_resource(config)
        .insert_resource(TimeUpdateStrategy::ManualDuration(step))
        .add_plugins(SimulationPlugin);

    // Часы стартуют с delta = 0
    app.update();

    Ok(app)
}

/// Snapshot мира для сравнения детерминизма
///
/// Компоненты `T` всех entity, отсортированные по Entity index, через Debug.
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
