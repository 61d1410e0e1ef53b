//! Movement configuration constants.
//!
//! All controller parameters are grouped here for easy tuning. Values are
//! metric (meters, seconds) and angles are in degrees.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::collision::ContentFlags;

use super::error::ControllerError;

/// Which controller features respond to input, and how sprint/crouch latch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureToggles {
    pub move_enabled: bool,
    pub look_enabled: bool,
    pub jump_enabled: bool,
    pub sprint_enabled: bool,
    pub crouch_enabled: bool,

    /// Sprint only while held. When false, each press flips sprint on or off.
    pub hold_to_sprint: bool,

    /// Crouch only while held. When false, each press flips crouch on or off.
    pub hold_to_crouch: bool,
}

impl Default for FeatureToggles {
    fn default() -> Self {
        Self {
            move_enabled: true,
            look_enabled: true,
            jump_enabled: true,
            sprint_enabled: true,
            crouch_enabled: true,
            hold_to_sprint: true,
            hold_to_crouch: true,
        }
    }
}

/// How the ground sensor decides the body is grounded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GroundCheckMode {
    /// Trust the contact flag reported by the body after its last move.
    BodyContact,

    /// Overlap a sphere at the body base against geometry matching `mask`.
    ProbeSphere { radius: f32, mask: ContentFlags },
}

impl Default for GroundCheckMode {
    fn default() -> Self {
        Self::BodyContact
    }
}

impl GroundCheckMode {
    /// Sphere check against brushes tagged as ground.
    pub fn tagged_ground() -> Self {
        Self::ProbeSphere {
            radius: 0.1,
            mask: ContentFlags::MASK_GROUND,
        }
    }
}

/// Configuration for the first-person controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovementConfig {
    pub features: FeatureToggles,

    // ========================================================================
    // Movement Speeds
    // ========================================================================
    /// Crouching speed (meters/second).
    pub crouch_speed: f32,

    /// Walking speed (meters/second).
    pub walk_speed: f32,

    /// Sprinting speed (meters/second).
    pub sprint_speed: f32,

    /// Time for the horizontal speed to get within 1% of its target (seconds).
    pub speed_transition_duration: f32,

    // ========================================================================
    // Look
    // ========================================================================
    /// Yaw rate per unit of look input (degrees/second).
    pub horizontal_sensitivity: f32,

    /// Pitch rate per unit of look input (degrees/second).
    pub vertical_sensitivity: f32,

    /// Lowest allowed camera pitch (degrees, negative looks up).
    pub lower_look_limit: f32,

    /// Highest allowed camera pitch (degrees, positive looks down).
    pub upper_look_limit: f32,

    pub invert_look_y: bool,

    // ========================================================================
    // Physics
    // ========================================================================
    /// Gravity acceleration (meters/second²).
    pub gravity: f32,

    /// Apex height of a jump from flat ground (meters).
    pub jump_height: f32,

    /// Minimum time between jumps (seconds).
    pub jump_cooldown: f32,

    pub ground_check: GroundCheckMode,

    // ========================================================================
    // Crouch
    // ========================================================================
    /// Collider height while crouched (meters).
    pub crouching_height: f32,

    /// Collider center while crouched, relative to the body base.
    pub crouching_center: Vec3,

    /// Camera height above the body base while crouched (meters).
    pub crouching_camera_y: f32,

    /// Time for stance changes to get within 1% of their target (seconds).
    pub crouch_transition_duration: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            features: FeatureToggles::default(),

            crouch_speed: 2.0,
            walk_speed: 4.0,
            sprint_speed: 7.0,
            speed_transition_duration: 0.25,

            horizontal_sensitivity: 100.0,
            vertical_sensitivity: 100.0,
            lower_look_limit: -60.0,
            upper_look_limit: 60.0,
            invert_look_y: false,

            gravity: 30.0,
            jump_height: 2.0,
            jump_cooldown: 0.2,
            ground_check: GroundCheckMode::default(),

            crouching_height: 1.0,
            crouching_center: Vec3::new(0.0, 0.5, 0.0),
            crouching_camera_y: 0.75,
            crouch_transition_duration: 0.2,
        }
    }
}

impl MovementConfig {
    /// Create a "fast arcade" config: quick speed changes, floaty jumps.
    pub fn arcade() -> Self {
        Self {
            crouch_speed: 3.0,
            walk_speed: 6.0,
            sprint_speed: 10.0,
            speed_transition_duration: 0.1,
            gravity: 20.0,
            jump_height: 2.5,
            jump_cooldown: 0.1,
            crouch_transition_duration: 0.1,
            ..Default::default()
        }
    }

    /// Create a "tactical" config: slower, heavier, wider look range.
    pub fn tactical() -> Self {
        Self {
            crouch_speed: 1.5,
            walk_speed: 3.5,
            sprint_speed: 5.5,
            speed_transition_duration: 0.4,
            lower_look_limit: -80.0,
            upper_look_limit: 80.0,
            gravity: 25.0,
            jump_height: 1.0,
            jump_cooldown: 0.4,
            crouch_transition_duration: 0.3,
            ..Default::default()
        }
    }

    /// Vertical launch speed that reaches `jump_height` under `gravity`.
    pub fn jump_velocity(&self) -> f32 {
        (2.0 * self.jump_height * self.gravity).sqrt()
    }

    /// Check the constants against a body whose resting collider is
    /// `standing_height` tall.
    ///
    /// Transition durations are not checked; non-positive ones mean "snap".
    pub fn validate(&self, standing_height: f32) -> Result<(), ControllerError> {
        let finite = [
            ("crouch_speed", self.crouch_speed),
            ("walk_speed", self.walk_speed),
            ("sprint_speed", self.sprint_speed),
            ("horizontal_sensitivity", self.horizontal_sensitivity),
            ("vertical_sensitivity", self.vertical_sensitivity),
            ("lower_look_limit", self.lower_look_limit),
            ("upper_look_limit", self.upper_look_limit),
            ("gravity", self.gravity),
            ("jump_height", self.jump_height),
            ("jump_cooldown", self.jump_cooldown),
            ("crouching_height", self.crouching_height),
            ("crouching_camera_y", self.crouching_camera_y),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(ControllerError::invalid(field, "must be finite"));
            }
        }
        if !self.crouching_center.is_finite() {
            return Err(ControllerError::invalid("crouching_center", "must be finite"));
        }

        for (field, value) in [
            ("crouch_speed", self.crouch_speed),
            ("walk_speed", self.walk_speed),
            ("sprint_speed", self.sprint_speed),
            ("jump_height", self.jump_height),
            ("jump_cooldown", self.jump_cooldown),
        ] {
            if value < 0.0 {
                return Err(ControllerError::invalid(field, "must not be negative"));
            }
        }

        if self.gravity <= 0.0 {
            return Err(ControllerError::invalid("gravity", "must be positive"));
        }
        if self.crouching_height <= 0.0 {
            return Err(ControllerError::invalid("crouching_height", "must be positive"));
        }
        if self.crouching_height > standing_height {
            return Err(ControllerError::invalid(
                "crouching_height",
                format!("must not exceed the standing height {standing_height}"),
            ));
        }
        if self.lower_look_limit > self.upper_look_limit {
            return Err(ControllerError::invalid(
                "lower_look_limit",
                "must not be above upper_look_limit",
            ));
        }
        if let GroundCheckMode::ProbeSphere { radius, .. } = self.ground_check {
            if !(radius > 0.0 && radius.is_finite()) {
                return Err(ControllerError::invalid(
                    "ground_check.radius",
                    "must be positive",
                ));
            }
        }

        Ok(())
    }

    /// Horizontal speed for a movement state.
    pub fn target_speed(&self, state: super::MovementState) -> f32 {
        use super::MovementState;

        match state {
            MovementState::Crouching => self.crouch_speed,
            MovementState::Sprinting => self.sprint_speed,
            _ => self.walk_speed,
        }
    }
}
