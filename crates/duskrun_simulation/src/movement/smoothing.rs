//! Critically damped smoothing (smooth damp)
//!
//! Плавное приближение к target без overshoot: горизонтальная скорость
//! не прыгает мгновенно при смене направления (меньше jitter).

use bevy::prelude::*;

/// Один шаг smooth damp для скаляра.
///
/// `velocity` - внутреннее состояние сглаживания, хранится между вызовами.
pub fn smooth_damp(current: f32, target: f32, velocity: &mut f32, smooth_time: f32, dt: f32) -> f32 {
    if dt <= 0.0 {
        return current;
    }

    let smooth_time = smooth_time.max(1e-4);
    let omega = 2.0 / smooth_time;
    let x = omega * dt;
    // Аппроксимация exp(-x) полиномом
    let exp = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let change = current - target;
    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * exp;

    let mut output = target + (change + temp) * exp;

    // Не перелетаем target
    if (target - current > 0.0) == (output > target) {
        output = target;
        *velocity = 0.0;
    }

    output
}

/// Покомпонентный smooth damp для Vec2
pub fn smooth_damp_vec2(current: Vec2, target: Vec2, velocity: &mut Vec2, smooth_time: f32, dt: f32) -> Vec2 {
    Vec2::new(
        smooth_damp(current.x, target.x, &mut velocity.x, smooth_time, dt),
        smooth_damp(current.y, target.y, &mut velocity.y, smooth_time, dt),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_converges_without_overshoot() {
        let mut value = 0.0;
        let mut velocity = 0.0;

        for _ in 0..120 {
            value = smooth_damp(value, 8.0, &mut velocity, 0.05, 1.0 / 64.0);
            assert!(value <= 8.0, "overshoot: {}", value);
        }

        assert!((value - 8.0).abs() < 1e-3, "value = {}", value);
    }

    #[test]
    fn test_moves_toward_target_gradually() {
        let mut velocity = 0.0;
        let first = smooth_damp(0.0, 8.0, &mut velocity, 0.05, 1.0 / 64.0);

        assert!(first > 0.0 && first < 8.0, "first step = {}", first);
        assert!(velocity > 0.0);
    }

    #[test]
    fn test_equal_target_keeps_value_exactly() {
        let mut velocity = Vec2::ZERO;
        let out = smooth_damp_vec2(
            Vec2::new(0.0, -3.25),
            Vec2::new(5.0, -3.25),
            &mut velocity,
            0.05,
            1.0 / 64.0,
        );

        // Вертикальная компонента не трогается
        assert_eq!(out.y, -3.25);
        assert_eq!(velocity.y, 0.0);
    }

    #[test]
    fn test_zero_dt_is_noop() {
        let mut velocity = 1.0;
        assert_eq!(smooth_damp(2.0, 8.0, &mut velocity, 0.05, 0.0), 2.0);
        assert_eq!(velocity, 1.0);
    }
}
