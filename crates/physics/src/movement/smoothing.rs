//! Frame-rate independent exponential smoothing.
//!
//! A value approaching its target with time constant `duration` covers 99% of
//! the remaining gap after `duration` seconds, regardless of how that time is
//! sliced into ticks.

use glam::Vec3;

/// Fraction of the remaining gap to close this tick.
///
/// Durations of zero or less snap straight to the target.
#[inline]
pub fn blend_factor(delta_time: f32, duration: f32) -> f32 {
    if duration <= 0.0 {
        1.0
    } else {
        1.0 - 0.01_f32.powf(delta_time / duration)
    }
}

/// Move `current` toward `target`.
#[inline]
pub fn approach(current: f32, target: f32, delta_time: f32, duration: f32) -> f32 {
    current + (target - current) * blend_factor(delta_time, duration)
}

/// Move `current` toward `target`, per component.
#[inline]
pub fn approach_vec3(current: Vec3, target: Vec3, delta_time: f32, duration: f32) -> Vec3 {
    current.lerp(target, blend_factor(delta_time, duration))
}
