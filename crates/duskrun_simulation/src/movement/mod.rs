//! Movement domain - CharacterMotor2D
//!
//! Содержит:
//! - CharacterMotor: ground/ceiling checks, smoothed horizontal, jump/double jump,
//!   crouch, dash session, nudge от врага
//! - MotionEvent/CancelDash events
//! - ECS systems (FixedUpdate, SimulationSet::Motor)
//!
//! Motor пишет только velocity тела; интеграция - physics::body.

use bevy::prelude::*;

use crate::SimulationSet;

pub mod dash;
pub mod events;
pub mod motor;
pub mod smoothing;
pub mod systems;

#[cfg(test)]
mod motor_tests;

// Re-export
pub use dash::{DashSession, DashStep, DASH_DISTANCE_EPSILON};
pub use events::{CancelDash, MotionEvent, MotionSignal};
pub use motor::{CharacterMotor, ContactProbe};
pub use smoothing::{smooth_damp, smooth_damp_vec2};
pub use systems::{
    cancel_dashes, drive_character_motors, mirror_facing, nudge_on_enemy_contact,
    sync_crouch_collider,
};

/// Movement Plugin
///
/// Порядок в SimulationSet::Motor:
/// 1. cancel_dashes - внешние отмены dash (до тика)
/// 2. drive_character_motors - intent → velocity
/// 3. nudge_on_enemy_contact - импульс поверх управляемой скорости
/// 4. sync_crouch_collider / mirror_facing - производные от MotionState
pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<MotionEvent>().add_event::<CancelDash>();

        app.register_type::<crate::components::MotionState>();

        app.add_systems(
            FixedUpdate,
            (
                cancel_dashes,
                drive_character_motors,
                nudge_on_enemy_contact,
                sync_crouch_collider,
                mirror_facing,
            )
                .chain()
                .in_set(SimulationSet::Motor),
        );
    }
}
