//! Kinematic integration: smoothed horizontal speed, gravity and jumps.

use glam::{Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::config::MovementConfig;
use super::jump::{JumpAttempt, JumpCooldown};
use super::smoothing::approach;
use super::state::{MovementState, MOVE_DEADZONE};

/// Vertical velocity held while standing on the ground, keeps the body pressed
/// onto the surface without gravity piling up.
pub const GROUNDED_VERTICAL_VELOCITY: f32 = -1.0;

/// Per-tick input to [`Kinematics::step`].
#[derive(Debug, Clone, Copy)]
pub struct StepInput {
    pub state: MovementState,
    pub move_axis: Vec2,
    pub yaw_degrees: f32,
    pub grounded: bool,
    pub jump_requested: bool,
    pub delta_time: f32,
}

/// What one integration step produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutput {
    /// Displacement to hand to the body this tick.
    pub displacement: Vec3,
    /// Whether a jump launched this tick.
    pub jumped: bool,
}

/// Velocity state carried between ticks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Kinematics {
    pub vertical_velocity: f32,
    /// Smoothed horizontal speed (meters/second).
    pub horizontal_speed: f32,
    pub jump: JumpCooldown,
}

/// World-space direction for a move input under a body yaw.
///
/// Forward is -Z at zero yaw, positive yaw turns right. Inputs inside the
/// deadzone give no direction.
pub fn move_direction(move_axis: Vec2, yaw_degrees: f32) -> Vec3 {
    if move_axis.length() < MOVE_DEADZONE {
        return Vec3::ZERO;
    }
    let local = Vec3::new(move_axis.x, 0.0, -move_axis.y);
    (Quat::from_rotation_y(-yaw_degrees.to_radians()) * local).normalize_or_zero()
}

impl Kinematics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Integrate one tick and return the displacement to apply.
    pub fn step(&mut self, config: &MovementConfig, input: StepInput) -> StepOutput {
        let dt = input.delta_time;

        let target_speed = config.target_speed(input.state);
        self.horizontal_speed = approach(
            self.horizontal_speed,
            target_speed,
            dt,
            config.speed_transition_duration,
        );
        let horizontal = move_direction(input.move_axis, input.yaw_degrees) * self.horizontal_speed;

        let jumped = self.jump.try_jump(
            JumpAttempt {
                enabled: config.features.jump_enabled,
                requested: input.jump_requested,
                grounded: input.grounded,
                crouching: input.state == MovementState::Crouching,
            },
            config.jump_cooldown,
        );
        if jumped {
            self.vertical_velocity = config.jump_velocity();
            log::debug!("jump launched at {:.2} m/s", self.vertical_velocity);
        }

        // Resting at exactly zero still takes one tick of gravity
        if input.grounded && self.vertical_velocity < 0.0 {
            self.vertical_velocity = GROUNDED_VERTICAL_VELOCITY;
        } else {
            self.vertical_velocity -= config.gravity * dt;
        }

        StepOutput {
            displacement: Vec3::new(horizontal.x, self.vertical_velocity, horizontal.z) * dt,
            jumped,
        }
    }
}
