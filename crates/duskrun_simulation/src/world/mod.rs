//! World construction helpers (headless уровни, тесты, demo binary)

pub mod spawn;

pub use spawn::{
    spawn_enemy, spawn_health_potion, spawn_pickup, spawn_platform, spawn_player,
    spawn_trigger_zone, ACTOR_RADIUS, PLAYER_UPPER_OFFSET, PLAYER_UPPER_RADIUS,
};
