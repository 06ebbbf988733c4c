//! CharacterMotor - intent → velocity + MotionState transitions
//!
//! Порядок внутри fixed тика:
//! 1. refresh_contacts - ground check (Landed)
//! 2. dash cooldown
//! 3. crouch (ceiling force crouch)
//! 4. dash start (если можно)
//! 5. dash step ИЛИ горизонтальное управление + facing
//! 6. jump / double jump
//!
//! Motor пишет только velocity тела. Гравитация и интеграция - у хоста.

use bevy::prelude::*;

use crate::components::MotionState;
use crate::config::{ConfigError, MotorConfig};
use crate::input::MotorIntent;
use crate::physics::{Body2D, PhysicsQuery};

use super::dash::{DashSession, DashStep};
use super::events::MotionSignal;
use super::smoothing::smooth_damp_vec2;

/// Выше этой vy тело считается взлетающим (ground contact не засчитывается)
const ASCENDING_VELOCITY: f32 = 0.01;

/// Окружение актора для physics queries
pub struct ContactProbe<'a> {
    pub physics: &'a dyn PhysicsQuery,
    /// Центр актора (Transform translation)
    pub position: Vec2,
    /// Тело самого актора - игнорируется в ground check
    pub body_entity: Entity,
}

/// Character controller актора
#[derive(Component, Debug, Clone)]
pub struct CharacterMotor {
    config: MotorConfig,
    dash: Option<DashSession>,
    /// Секунд до следующего доступного dash
    dash_cooldown: f32,
}

impl Default for CharacterMotor {
    fn default() -> Self {
        Self {
            config: MotorConfig::default(),
            dash: None,
            dash_cooldown: 0.0,
        }
    }
}

impl CharacterMotor {
    pub fn new(config: MotorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            ..default()
        })
    }

    pub fn config(&self) -> &MotorConfig {
        &self.config
    }

    pub fn dash_session(&self) -> Option<&DashSession> {
        self.dash.as_ref()
    }

    pub fn is_dashing(&self) -> bool {
        self.dash.is_some()
    }

    /// Dash доступен: не в dash и cooldown истёк
    pub fn dash_available(&self) -> bool {
        self.dash.is_none() && self.dash_cooldown <= 0.0
    }

    /// Полный fixed тик motor'а. Возвращает сигналы в порядке возникновения.
    pub fn fixed_tick(
        &mut self,
        intent: &MotorIntent,
        state: &mut MotionState,
        body: &mut Body2D,
        probe: &ContactProbe,
        dt: f32,
    ) -> Vec<MotionSignal> {
        let mut signals = Vec::new();

        self.refresh_contacts(state, body, probe, &mut signals);
        self.dash_cooldown = (self.dash_cooldown - dt).max(0.0);

        self.update_crouch(intent, state, probe, &mut signals);

        if intent.dash_pressed && !state.crouching && self.dash_available() {
            self.start_dash(state, &mut signals);
        }

        if self.dash.is_some() {
            self.advance_dash(state, body, dt, &mut signals);
        } else {
            self.apply_horizontal(intent, state, body, dt, &mut signals);
        }

        if intent.jump_pressed {
            self.apply_jump(state, body, &mut signals);
        }

        signals
    }

    /// Ground check: overlap circle под ногами, без собственного тела
    pub fn refresh_contacts(
        &mut self,
        state: &mut MotionState,
        body: &Body2D,
        probe: &ContactProbe,
        signals: &mut Vec<MotionSignal>,
    ) {
        let was_grounded = state.grounded;

        // Только что оттолкнулись от пола - не "приземляемся" обратно
        let ascending = body.velocity.y > ASCENDING_VELOCITY;
        let touching = !ascending
            && probe
                .physics
                .overlap_circle(
                    probe.position + self.config.ground_check_offset,
                    self.config.ground_check_radius,
                    self.config.ground_mask,
                )
                .into_iter()
                .any(|entity| entity != probe.body_entity);

        state.grounded = touching;

        if touching && !was_grounded {
            state.double_jump_used = false;
            signals.push(MotionSignal::Landed);
        }
    }

    /// Есть ли потолок над головой
    pub fn ceiling_blocked(&self, probe: &ContactProbe) -> bool {
        probe.physics.overlap_test(
            probe.position + self.config.ceiling_check_offset,
            self.config.ceiling_check_radius,
            self.config.ground_mask,
        )
    }

    fn update_crouch(
        &mut self,
        intent: &MotorIntent,
        state: &mut MotionState,
        probe: &ContactProbe,
        signals: &mut Vec<MotionSignal>,
    ) {
        // Во время dash crouch не вычисляется (dash и crouch взаимоисключающие)
        if self.dash.is_some() {
            return;
        }

        // Под потолком встать нельзя - crouch форсируется
        let crouch = intent.crouch_held || self.ceiling_blocked(probe);

        if crouch != state.crouching {
            state.crouching = crouch;
            signals.push(MotionSignal::CrouchChanged { crouching: crouch });
        }
    }

    fn apply_horizontal(
        &mut self,
        intent: &MotorIntent,
        state: &mut MotionState,
        body: &mut Body2D,
        dt: f32,
        signals: &mut Vec<MotionSignal>,
    ) {
        if !(state.grounded || self.config.air_control) {
            return;
        }

        let mut axis = if intent.move_axis.is_finite() {
            intent.move_axis.clamp(-1.0, 1.0)
        } else {
            0.0
        };
        if state.crouching {
            axis *= self.config.crouch_speed_factor;
        }

        let target = Vec2::new(axis * self.config.base_speed, body.velocity.y);
        body.velocity = smooth_damp_vec2(
            body.velocity,
            target,
            &mut state.smoothed_velocity,
            self.config.movement_smoothing,
            dt,
        );

        let flip = (axis > 0.0 && !state.facing_right) || (axis < 0.0 && state.facing_right);
        if flip {
            state.facing_right = !state.facing_right;
            signals.push(MotionSignal::FacingChanged {
                facing_right: state.facing_right,
            });
        }
    }

    fn apply_jump(&mut self, state: &mut MotionState, body: &mut Body2D, signals: &mut Vec<MotionSignal>) {
        let impulse = Vec2::new(0.0, self.config.jump_impulse);

        if state.grounded {
            state.grounded = false;
            state.double_jump_used = false;
            body.apply_impulse(impulse);
            signals.push(MotionSignal::Jumped { double_jump: false });
        } else if !state.double_jump_used {
            // Одинаковая высота double jump независимо от скорости падения
            body.velocity.y = 0.0;
            body.apply_impulse(impulse);
            state.double_jump_used = true;
            signals.push(MotionSignal::Jumped { double_jump: true });
        }
    }

    fn start_dash(&mut self, state: &mut MotionState, signals: &mut Vec<MotionSignal>) {
        let session = DashSession::new(state.facing_right, self.config.dash_distance);
        state.dashing = true;
        signals.push(MotionSignal::DashStarted {
            direction: session.direction,
        });
        self.dash = Some(session);

        crate::logger::log(&format!(
            "Dash started: direction {:?}, distance {}",
            session.direction, self.config.dash_distance
        ));
    }

    fn advance_dash(&mut self, state: &mut MotionState, body: &mut Body2D, dt: f32, signals: &mut Vec<MotionSignal>) {
        let Some(session) = self.dash.as_mut() else {
            return;
        };

        // Dash перекрывает только горизонталь; vy остаётся хосту (гравитация)
        body.velocity.x = session.direction.x * self.config.dash_speed;

        if session.advance(self.config.dash_speed, dt) == DashStep::Finished {
            self.finish_dash(state, body, false, signals);
        }
    }

    /// Прервать dash досрочно. `None` - dash не был активен.
    pub fn cancel_dash(&mut self, state: &mut MotionState, body: &mut Body2D) -> Option<MotionSignal> {
        if self.dash.is_none() {
            return None;
        }

        let mut signals = Vec::with_capacity(1);
        self.finish_dash(state, body, true, &mut signals);
        signals.pop()
    }

    fn finish_dash(
        &mut self,
        state: &mut MotionState,
        body: &mut Body2D,
        cancelled: bool,
        signals: &mut Vec<MotionSignal>,
    ) {
        let Some(session) = self.dash.take() else {
            return;
        };

        body.velocity.x = session.direction.x * self.config.after_dash_speed;
        state.dashing = false;
        self.dash_cooldown = self.config.dash_cooldown;
        signals.push(MotionSignal::DashEnded { cancelled });

        crate::logger::log(&format!("Dash ended (cancelled: {})", cancelled));
    }

    /// One-shot nudge при контакте с врагом сверху.
    ///
    /// Импульс вдоль normalize(self - enemy); `None`, если враг не снизу.
    pub fn nudge_from_enemy(&self, self_position: Vec2, enemy_position: Vec2, body: &mut Body2D) -> Option<MotionSignal> {
        if self_position.y <= enemy_position.y {
            return None;
        }

        let direction = (self_position - enemy_position).normalize_or_zero();
        let impulse = direction * self.config.nudge_impulse;
        body.apply_impulse(impulse);

        Some(MotionSignal::Nudged { impulse })
    }
}
