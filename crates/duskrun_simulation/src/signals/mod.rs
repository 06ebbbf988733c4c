//! Presentation signals - очередь к animation/audio/UI коллабораторам
//!
//! Core не знает про animator и sound manager. Он пишет события:
//! - AnimationSignal { entity, parameter, Trigger | Bool | Float }
//! - SoundCue { name, position }
//!
//! Хост (движок, UI, тест) читает их через EventReader.

use bevy::prelude::*;

use crate::combat::{DamageDealt, EntityDied};
use crate::movement::{MotionEvent, MotionSignal};
use crate::SimulationSet;

// Animation parameters
pub const ANIM_BASIC_ATTACK: &str = "BasicAttack";
pub const ANIM_HURT: &str = "Hurt";
pub const ANIM_DASH: &str = "Dash";
pub const ANIM_IS_JUMPING: &str = "IsJumping";
pub const ANIM_IS_CROUCHING: &str = "IsCrouching";
pub const ANIM_IS_DASHING: &str = "IsDashing";
pub const ANIM_IS_DASH_ATTACKING: &str = "IsDashAttacking";
pub const ANIM_IS_DEAD: &str = "IsDead";
pub const ANIM_SPEED: &str = "Speed";

// Sound cues
pub const SOUND_ATTACK: &str = "Attack";
pub const SOUND_LANDING: &str = "Landing";
pub const SOUND_COLLECT_COIN: &str = "CollectCoin";
pub const SOUND_COLLECT_POTION: &str = "CollectPotion";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimValue {
    Trigger,
    Bool(bool),
    Float(f32),
}

/// Event: выставить параметр animator'а entity
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct AnimationSignal {
    pub entity: Entity,
    pub parameter: &'static str,
    pub value: AnimValue,
}

impl AnimationSignal {
    pub fn trigger(entity: Entity, parameter: &'static str) -> Self {
        Self {
            entity,
            parameter,
            value: AnimValue::Trigger,
        }
    }

    pub fn bool(entity: Entity, parameter: &'static str, value: bool) -> Self {
        Self {
            entity,
            parameter,
            value: AnimValue::Bool(value),
        }
    }

    pub fn float(entity: Entity, parameter: &'static str, value: f32) -> Self {
        Self {
            entity,
            parameter,
            value: AnimValue::Float(value),
        }
    }
}

/// Event: проиграть звук (`position` - для позиционного звука)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct SoundCue {
    pub name: &'static str,
    pub position: Option<Vec2>,
}

impl SoundCue {
    pub fn global(name: &'static str) -> Self {
        Self { name, position: None }
    }

    pub fn at(name: &'static str, position: Vec2) -> Self {
        Self {
            name,
            position: Some(position),
        }
    }
}

/// System: MotionEvent → animator параметры + Landing звук
pub fn present_motion_events(
    mut motion: EventReader<MotionEvent>,
    transforms: Query<&Transform>,
    mut animation: EventWriter<AnimationSignal>,
    mut sounds: EventWriter<SoundCue>,
) {
    for event in motion.read() {
        let entity = event.entity;
        match event.signal {
            MotionSignal::Landed => {
                animation.write(AnimationSignal::bool(entity, ANIM_IS_JUMPING, false));
                let position = transforms.get(entity).ok().map(|t| t.translation.truncate());
                sounds.write(SoundCue {
                    name: SOUND_LANDING,
                    position,
                });
            }
            MotionSignal::Jumped { .. } => {
                animation.write(AnimationSignal::bool(entity, ANIM_IS_JUMPING, true));
            }
            MotionSignal::CrouchChanged { crouching } => {
                animation.write(AnimationSignal::bool(entity, ANIM_IS_CROUCHING, crouching));
            }
            MotionSignal::DashStarted { .. } => {
                animation.write(AnimationSignal::trigger(entity, ANIM_DASH));
                animation.write(AnimationSignal::bool(entity, ANIM_IS_DASHING, true));
            }
            MotionSignal::DashEnded { .. } => {
                animation.write(AnimationSignal::bool(entity, ANIM_IS_DASHING, false));
                animation.write(AnimationSignal::bool(entity, ANIM_IS_DASH_ATTACKING, false));
            }
            // Визуально - только scale.x (mirror_facing), nudge без анимации
            MotionSignal::FacingChanged { .. } | MotionSignal::Nudged { .. } => {}
        }
    }
}

/// System: урон → Hurt, смерть → IsDead
pub fn present_health_events(
    mut damage: EventReader<DamageDealt>,
    mut deaths: EventReader<EntityDied>,
    mut animation: EventWriter<AnimationSignal>,
) {
    for event in damage.read() {
        animation.write(AnimationSignal::trigger(event.target, ANIM_HURT));
    }

    for event in deaths.read() {
        animation.write(AnimationSignal::bool(event.entity, ANIM_IS_DEAD, true));
    }
}

/// Signals Plugin: регистрирует presentation events и маппинг
pub struct SignalsPlugin;

impl Plugin for SignalsPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<AnimationSignal>().add_event::<SoundCue>();

        app.add_systems(
            FixedUpdate,
            (present_motion_events, present_health_events).in_set(SimulationSet::Presentation),
        );
    }
}
