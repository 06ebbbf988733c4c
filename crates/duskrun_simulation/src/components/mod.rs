//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - actor: Actor/Player/Enemy markers, Health (HealthPool)
//! - motion: MotionState (grounded/crouching/dashing/facing)
//!
//! Domain-specific компоненты лежат в своих модулях:
//! physics (Body2D, Collider2D), movement (CharacterMotor),
//! combat (CombatResolver, Dead), input (MotorIntent), interaction (Pickup, TriggerZone).

pub mod actor;
pub mod motion;

// Re-exports для удобного импорта
pub use actor::*;
pub use motion::*;
