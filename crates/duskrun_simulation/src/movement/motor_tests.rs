//! Tests for CharacterMotor.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use crate::components::{MotionPhase, MotionState};
    use crate::config::{ConfigError, MotorConfig};
    use crate::input::MotorIntent;
    use crate::movement::{CharacterMotor, ContactProbe, MotionSignal};
    use crate::physics::{Body2D, PhysicsQuery};

    const GROUND: Entity = Entity::PLACEHOLDER;
    const DT: f32 = 1.0 / 64.0;

    /// Фейковая физика: актор в (0, 0), пол снизу и/или потолок сверху
    #[derive(Default)]
    struct StubPhysics {
        ground: bool,
        ceiling: bool,
    }

    impl PhysicsQuery for StubPhysics {
        fn overlap_circle(&self, center: Vec2, _radius: f32, _mask: u32) -> Vec<Entity> {
            let hit = (center.y < 0.0 && self.ground) || (center.y > 0.0 && self.ceiling);
            if hit {
                vec![GROUND]
            } else {
                Vec::new()
            }
        }
    }

    struct Rig {
        motor: CharacterMotor,
        state: MotionState,
        body: Body2D,
        physics: StubPhysics,
    }

    impl Rig {
        fn new(config: MotorConfig) -> Self {
            Self {
                motor: CharacterMotor::new(config).expect("valid motor config"),
                state: MotionState::default(),
                body: Body2D::default(),
                physics: StubPhysics::default(),
            }
        }

        fn grounded() -> Self {
            let mut rig = Self::new(MotorConfig::default());
            rig.physics.ground = true;
            rig.tick(MotorIntent::default());
            assert!(rig.state.grounded);
            rig
        }

        fn tick(&mut self, intent: MotorIntent) -> Vec<MotionSignal> {
            self.tick_dt(intent, DT)
        }

        fn tick_dt(&mut self, intent: MotorIntent, dt: f32) -> Vec<MotionSignal> {
            let probe = ContactProbe {
                physics: &self.physics,
                position: Vec2::ZERO,
                body_entity: Entity::from_raw(42),
            };
            self.motor
                .fixed_tick(&intent, &mut self.state, &mut self.body, &probe, dt)
        }
    }

    fn count_jumps(signals: &[MotionSignal]) -> usize {
        signals
            .iter()
            .filter(|s| matches!(s, MotionSignal::Jumped { .. }))
            .count()
    }

    #[test]
    fn test_landing_resets_double_jump_and_emits_once() {
        let mut rig = Rig::new(MotorConfig::default());
        rig.state.double_jump_used = true;

        // В воздухе
        assert!(rig.tick(MotorIntent::default()).is_empty());
        assert!(!rig.state.grounded);

        rig.physics.ground = true;
        let signals = rig.tick(MotorIntent::default());
        assert_eq!(signals, vec![MotionSignal::Landed]);
        assert!(!rig.state.double_jump_used);

        // Уже на земле - повторного Landed нет
        assert!(rig.tick(MotorIntent::default()).is_empty());
    }

    #[test]
    fn test_ground_check_ignores_own_body() {
        let mut rig = Rig::new(MotorConfig::default());
        rig.physics.ground = true;

        let probe = ContactProbe {
            physics: &rig.physics,
            position: Vec2::ZERO,
            body_entity: GROUND,
        };
        let mut signals = Vec::new();
        rig.motor
            .refresh_contacts(&mut rig.state, &rig.body, &probe, &mut signals);

        assert!(!rig.state.grounded);
        assert!(signals.is_empty());
    }

    #[test]
    fn test_double_jump_grants_exactly_two_impulses() {
        let mut rig = Rig::grounded();

        // Прыжок с земли
        let first = rig.tick(MotorIntent::jump());
        assert_eq!(first, vec![MotionSignal::Jumped { double_jump: false }]);
        assert_eq!(rig.body.velocity.y, 10.0);
        assert!(!rig.state.grounded);

        // Сразу же второй (в воздухе; пол ещё касается, но тело взлетает)
        let second = rig.tick(MotorIntent::jump());
        assert_eq!(second, vec![MotionSignal::Jumped { double_jump: true }]);
        assert!(rig.state.double_jump_used);

        // Третий - ничего
        rig.body.velocity.y = 3.0;
        let third = rig.tick(MotorIntent::jump());
        assert_eq!(count_jumps(&third), 0);
        assert_eq!(rig.body.velocity.y, 3.0);

        // Приземление сбрасывает флаг
        rig.body.velocity.y = 0.0;
        let landing = rig.tick(MotorIntent::default());
        assert_eq!(landing, vec![MotionSignal::Landed]);
        assert_eq!(count_jumps(&rig.tick(MotorIntent::jump())), 1);
    }

    #[test]
    fn test_double_jump_zeroes_fall_speed() {
        let mut rig = Rig::new(MotorConfig::default());
        rig.body.velocity.y = -25.0; // быстро падаем

        rig.tick(MotorIntent::jump());

        // vy = 0 + impulse, а не -25 + impulse
        assert_eq!(rig.body.velocity.y, 10.0);
    }

    #[test]
    fn test_dash_runs_fifteen_steps_and_carries_speed() {
        let config = MotorConfig {
            dash_distance: 10.0,
            dash_speed: 40.0,
            after_dash_speed: 10.0,
            ..default()
        };
        let mut rig = Rig::new(config);
        rig.physics.ground = true;
        let dt = 1.0 / 60.0;

        let first = rig.tick_dt(MotorIntent::dash(), dt);
        assert!(first.contains(&MotionSignal::DashStarted { direction: Vec2::X }));
        assert!(rig.state.dashing);
        assert_eq!(rig.body.velocity.x, 40.0);

        let mut steps = 1;
        loop {
            let signals = rig.tick_dt(MotorIntent::default(), dt);
            steps += 1;
            if signals.contains(&MotionSignal::DashEnded { cancelled: false }) {
                break;
            }
            assert_eq!(rig.body.velocity.x, 40.0, "dash перекрывает горизонталь");
            assert!(steps < 100, "dash never ended");
        }

        assert_eq!(steps, 15);
        assert!(!rig.state.dashing);
        assert!(rig.motor.dash_session().is_none());
        assert_eq!(rig.body.velocity.x, 10.0);
    }

    #[test]
    fn test_dash_follows_facing_left() {
        let mut rig = Rig::grounded();
        rig.tick(MotorIntent::moving(-1.0));
        assert!(!rig.state.facing_right);

        let signals = rig.tick(MotorIntent::dash());
        assert!(signals.contains(&MotionSignal::DashStarted { direction: Vec2::NEG_X }));
        assert!(rig.body.velocity.x < 0.0);
    }

    #[test]
    fn test_dash_preempts_horizontal_input() {
        let mut rig = Rig::grounded();
        rig.tick(MotorIntent::dash());

        // Input влево во время dash вправо: ни разворота, ни смены скорости
        let signals = rig.tick(MotorIntent::moving(-1.0));
        assert!(!signals
            .iter()
            .any(|s| matches!(s, MotionSignal::FacingChanged { .. })));
        assert!(rig.state.facing_right);
        assert_eq!(rig.body.velocity.x, 40.0);
    }

    #[test]
    fn test_dash_leaves_vertical_velocity_to_host() {
        let mut rig = Rig::new(MotorConfig::default());
        rig.body.velocity.y = -4.0;

        rig.tick(MotorIntent::dash());
        assert_eq!(rig.body.velocity.y, -4.0);
    }

    #[test]
    fn test_dash_ignored_while_crouching() {
        let mut rig = Rig::grounded();
        let intent = MotorIntent {
            crouch_held: true,
            dash_pressed: true,
            ..default()
        };

        let signals = rig.tick(intent);
        assert!(rig.state.crouching);
        assert!(!rig.state.dashing);
        assert!(!signals
            .iter()
            .any(|s| matches!(s, MotionSignal::DashStarted { .. })));
    }

    #[test]
    fn test_dash_requires_cooldown() {
        let config = MotorConfig {
            dash_distance: 1.0,
            dash_speed: 64.0, // 1 шаг при dt = 1/64
            dash_cooldown: 0.1,
            ..default()
        };
        let mut rig = Rig::new(config);

        let signals = rig.tick(MotorIntent::dash());
        assert!(signals.contains(&MotionSignal::DashEnded { cancelled: false }));
        assert!(!rig.motor.dash_available());

        // Сразу же - cooldown не истёк
        let again = rig.tick(MotorIntent::dash());
        assert!(!again
            .iter()
            .any(|s| matches!(s, MotionSignal::DashStarted { .. })));

        // 0.1 sec ≈ 7 тиков
        for _ in 0..8 {
            rig.tick(MotorIntent::default());
        }
        assert!(rig.motor.dash_available());
        let later = rig.tick(MotorIntent::dash());
        assert!(later
            .iter()
            .any(|s| matches!(s, MotionSignal::DashStarted { .. })));
    }

    #[test]
    fn test_crouch_held_during_dash_is_suspended() {
        let mut rig = Rig::grounded();
        rig.tick(MotorIntent::dash());

        let intent = MotorIntent {
            crouch_held: true,
            ..default()
        };
        rig.tick(intent);

        assert!(rig.state.dashing);
        assert!(!rig.state.crouching);
        assert_eq!(rig.state.phase(), MotionPhase::Dashing);
    }

    #[test]
    fn test_cancel_dash_ends_immediately() {
        let mut rig = Rig::grounded();
        rig.tick(MotorIntent::dash());

        let signal = rig.motor.cancel_dash(&mut rig.state, &mut rig.body);
        assert_eq!(signal, Some(MotionSignal::DashEnded { cancelled: true }));
        assert!(!rig.state.dashing);
        assert_eq!(rig.body.velocity.x, 10.0);

        // Второй cancel - no-op
        assert_eq!(rig.motor.cancel_dash(&mut rig.state, &mut rig.body), None);
    }

    #[test]
    fn test_ceiling_keeps_crouching_after_release() {
        let mut rig = Rig::grounded();

        let hold = MotorIntent {
            crouch_held: true,
            ..default()
        };
        assert_eq!(
            rig.tick(hold),
            vec![MotionSignal::CrouchChanged { crouching: true }]
        );

        // Потолок появился, отпускаем crouch
        rig.physics.ceiling = true;
        let signals = rig.tick(MotorIntent::default());
        assert!(signals.is_empty());
        assert!(rig.state.crouching);
        assert_eq!(rig.state.phase(), MotionPhase::Crouching);

        // Потолок ушёл - встаём
        rig.physics.ceiling = false;
        assert_eq!(
            rig.tick(MotorIntent::default()),
            vec![MotionSignal::CrouchChanged { crouching: false }]
        );
    }

    #[test]
    fn test_crouch_scales_speed() {
        let mut walking = Rig::grounded();
        let mut crouching = Rig::grounded();
        let crouch_walk = MotorIntent {
            move_axis: 1.0,
            crouch_held: true,
            ..default()
        };

        for _ in 0..128 {
            walking.tick(MotorIntent::moving(1.0));
            crouching.tick(crouch_walk);
        }

        assert!((walking.body.velocity.x - 8.0).abs() < 1e-3);
        assert!((crouching.body.velocity.x - 8.0 * 0.36).abs() < 1e-3);
    }

    #[test]
    fn test_horizontal_velocity_is_smoothed() {
        let mut rig = Rig::grounded();

        rig.tick(MotorIntent::moving(1.0));
        let first = rig.body.velocity.x;
        assert!(first > 0.0 && first < 8.0, "first = {}", first);

        rig.tick(MotorIntent::moving(1.0));
        assert!(rig.body.velocity.x > first);
    }

    #[test]
    fn test_facing_flips_on_direction_change() {
        let mut rig = Rig::grounded();

        let signals = rig.tick(MotorIntent::moving(-0.5));
        assert_eq!(
            signals,
            vec![MotionSignal::FacingChanged { facing_right: false }]
        );

        // Тот же знак - без повторного разворота
        assert!(rig.tick(MotorIntent::moving(-1.0)).is_empty());

        // Ноль не разворачивает
        assert!(rig.tick(MotorIntent::default()).is_empty());
        assert!(!rig.state.facing_right);
    }

    #[test]
    fn test_no_air_control() {
        let config = MotorConfig {
            air_control: false,
            ..default()
        };
        let mut rig = Rig::new(config);

        rig.tick(MotorIntent::moving(1.0));
        assert_eq!(rig.body.velocity.x, 0.0);
    }

    #[test]
    fn test_nudge_only_from_above() {
        let motor = CharacterMotor::default();
        let mut body = Body2D::default();

        // Сбоку/снизу - ничего
        assert_eq!(
            motor.nudge_from_enemy(Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), &mut body),
            None
        );
        assert_eq!(body.velocity, Vec2::ZERO);

        // Сверху - импульс от врага к себе
        let signal = motor.nudge_from_enemy(Vec2::new(0.0, 1.0), Vec2::new(0.0, 0.0), &mut body);
        assert_eq!(
            signal,
            Some(MotionSignal::Nudged {
                impulse: Vec2::new(0.0, 5.0)
            })
        );
        assert_eq!(body.velocity, Vec2::new(0.0, 5.0));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = MotorConfig {
            dash_speed: 0.0,
            ..default()
        };
        assert!(matches!(
            CharacterMotor::new(config),
            Err(ConfigError::NonPositive { field: "dash_speed", .. })
        ));
    }

    #[test]
    fn test_dash_and_crouch_never_overlap() {
        // Перебор input'ов: инвариант держится на любой последовательности
        let mut rig = Rig::grounded();
        for step in 0..400u32 {
            rig.physics.ceiling = step % 37 < 5;
            rig.physics.ground = step % 53 > 10;
            let intent = MotorIntent {
                move_axis: ((step % 5) as f32 - 2.0) / 2.0,
                crouch_held: step % 11 < 3,
                jump_pressed: step % 7 == 0,
                dash_pressed: step % 13 == 0,
            };
            rig.tick(intent);
            assert!(!(rig.state.dashing && rig.state.crouching), "step {}", step);
            assert_eq!(rig.state.dashing, rig.motor.is_dashing());
        }
    }
}
