//! Look input to body yaw and camera pitch.

use glam::Vec2;

use super::config::MovementConfig;

/// Result of one look step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LookStep {
    /// Yaw to add to the body (degrees).
    pub yaw_delta: f32,
    /// New camera pitch (degrees), already clamped.
    pub pitch: f32,
}

/// Fold an angle in degrees into (-180, 180].
pub fn signed_angle(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// Turn look input into a yaw change and a clamped pitch.
pub fn look_step(config: &MovementConfig, look_axis: Vec2, current_pitch: f32, delta_time: f32) -> LookStep {
    let yaw_delta = look_axis.x * config.horizontal_sensitivity * delta_time;

    let mut pitch_delta = look_axis.y * config.vertical_sensitivity * delta_time;
    if config.invert_look_y {
        pitch_delta = -pitch_delta;
    }

    let pitch = (signed_angle(current_pitch) - pitch_delta)
        .clamp(config.lower_look_limit, config.upper_look_limit);

    LookStep { yaw_delta, pitch }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 0.01;

    #[test]
    fn test_signed_angle() {
        assert_eq!(signed_angle(350.0), -10.0);
        assert_eq!(signed_angle(10.0), 10.0);
        assert_eq!(signed_angle(180.0), 180.0);
        assert_eq!(signed_angle(-370.0), -10.0);
    }

    #[test]
    fn test_yaw_and_pitch() {
        let config = MovementConfig::default();

        let step = look_step(&config, Vec2::new(2.0, 1.0), 0.0, DT);

        assert!((step.yaw_delta - 2.0).abs() < 1e-5);
        // Looking up (positive y) lowers the pitch
        assert!((step.pitch + 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_invert_y() {
        let config = MovementConfig {
            invert_look_y: true,
            ..Default::default()
        };

        let step = look_step(&config, Vec2::new(0.0, 1.0), 0.0, DT);
        assert!((step.pitch - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_pitch_clamped() {
        let config = MovementConfig::default();

        let up = look_step(&config, Vec2::new(0.0, 1000.0), 0.0, DT);
        assert_eq!(up.pitch, config.lower_look_limit);

        let down = look_step(&config, Vec2::new(0.0, -1000.0), 0.0, DT);
        assert_eq!(down.pitch, config.upper_look_limit);
    }

    #[test]
    fn test_wrapped_pitch_clamps_from_signed_side() {
        let config = MovementConfig::default();

        // 350 degrees is 10 degrees up, not past the lower limit
        let step = look_step(&config, Vec2::ZERO, 350.0, DT);
        assert!((step.pitch + 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_yaw_unbounded() {
        let config = MovementConfig::default();
        let step = look_step(&config, Vec2::new(500.0, 0.0), 0.0, DT);
        assert!((step.yaw_delta - 500.0).abs() < 1e-3);
    }
}
