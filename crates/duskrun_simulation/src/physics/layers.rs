//! Collision layers (битовые маски)
//!
//! - **Layer:** на каком слое находится collider
//! - **Mask:** какие слои ищет overlap query
//!
//! ```rust
//! use duskrun_simulation::physics::layers::*;
//!
//! // Attack query ищет только врагов
//! let mask = LAYER_ENEMIES;
//! assert_eq!(mask & LAYER_PLAYER, 0);
//! ```

/// Layer 1: земля, платформы, потолки
pub const LAYER_GROUND: u32 = 0b1;

/// Layer 2: игрок
pub const LAYER_PLAYER: u32 = 0b10;

/// Layer 3: враги (цели basic attack, источник nudge)
pub const LAYER_ENEMIES: u32 = 0b100;

/// Layer 4: подбираемые предметы (coin, health potion)
pub const LAYER_PICKUPS: u32 = 0b1000;

/// Layer 5: trigger zones (portals)
pub const LAYER_TRIGGERS: u32 = 0b1_0000;

/// Все слои
pub const LAYER_ALL: u32 = u32::MAX;
