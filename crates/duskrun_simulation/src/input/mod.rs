//! Input domain - InputIntentBuilder
//!
//! Содержит:
//! - InputSource / InputAction (внешний коллаборатор: устройства ввода)
//! - ScriptedInput (headless/test источник)
//! - IntentBuilder, MotorIntent, AttackIntent (snapshot для fixed тика)
//! - capture_player_intents (PreUpdate system)

use bevy::prelude::*;

pub mod intent;
pub mod source;
pub mod systems;

// Re-export
pub use intent::{AttackIntent, FrameIntent, IntentBuilder, MotorIntent};
pub use source::{InputAction, InputFrame, InputSource, PlayerInput, ScriptedInput};
pub use systems::capture_player_intents;

/// Input Plugin: capture в PreUpdate (раньше FixedUpdate в том же кадре)
pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PreUpdate, capture_player_intents);
    }
}
