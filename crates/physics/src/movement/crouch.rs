//! Crouch/stand transitions with overhead clearance.
//!
//! Each tick the controller picks a target collider height, center and camera
//! height. Standing up is only allowed as far as the space above the body
//! permits; a partially blocked stand leaves the body in between and marks it
//! obstructed, which keeps it classified as crouching.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::config::MovementConfig;
use super::host::ColliderShape;
use super::smoothing::{approach, approach_vec3};
use super::state::MovementState;

/// Heights within this distance of standing count as standing (meters).
pub const NEAR_STANDING_TOLERANCE: f32 = 0.05;

/// Extra reach of the clearance probe above the standing height (meters).
pub const CLEARANCE_PROBE_MARGIN: f32 = 0.15;

/// Gap kept between the top of the collider and an obstruction (meters).
pub const HEAD_CLEARANCE: f32 = 0.1;

/// Collider dimensions plus camera height for one stance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StanceShape {
    pub height: f32,
    pub center: Vec3,
    pub camera_y: f32,
}

impl StanceShape {
    /// The collider part of this stance.
    pub fn collider(&self) -> ColliderShape {
        ColliderShape {
            height: self.height,
            center: self.center,
        }
    }
}

/// Standing and crouching extremes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrouchProfile {
    pub standing: StanceShape,
    pub crouching: StanceShape,
}

impl CrouchProfile {
    /// Take the standing stance from the body's resting collider and camera,
    /// and the crouching stance from configuration.
    pub fn capture(collider: ColliderShape, camera_y: f32, config: &MovementConfig) -> Self {
        Self {
            standing: StanceShape {
                height: collider.height,
                center: collider.center,
                camera_y,
            },
            crouching: StanceShape {
                height: config.crouching_height,
                center: config.crouching_center,
                camera_y: config.crouching_camera_y,
            },
        }
    }

    /// Stance at `ratio` of the way from crouching (0) to standing (1).
    pub fn blend(&self, ratio: f32) -> StanceShape {
        let r = ratio.clamp(0.0, 1.0);
        StanceShape {
            height: self.crouching.height + (self.standing.height - self.crouching.height) * r,
            center: self.crouching.center.lerp(self.standing.center, r),
            camera_y: self.crouching.camera_y + (self.standing.camera_y - self.crouching.camera_y) * r,
        }
    }

    /// Reach of the upward clearance probe from the body base.
    pub fn probe_distance(&self) -> f32 {
        self.standing.height + CLEARANCE_PROBE_MARGIN
    }

    /// Target stance when not crouching, given the distance to whatever is
    /// overhead. Returns the target and whether the stand is obstructed.
    pub fn stand_target(&self, clearance: Option<f32>) -> (StanceShape, bool) {
        let Some(distance) = clearance else {
            return (self.standing, false);
        };

        let standing = self.standing.height;
        let crouching = self.crouching.height;
        let max_height = (distance - HEAD_CLEARANCE).max(crouching);

        if max_height >= standing - NEAR_STANDING_TOLERANCE {
            return (self.standing, false);
        }

        let target_height = standing.min(max_height);
        let span = standing - crouching;
        let ratio = if span > 0.0 {
            ((target_height - crouching) / span).clamp(0.0, 1.0)
        } else {
            1.0
        };

        let mut target = self.blend(ratio);
        target.height = target_height;
        (target, true)
    }
}

/// Inputs to one crouch transition step.
#[derive(Debug, Clone, Copy)]
pub struct CrouchInput {
    pub crouch_intent: bool,
    pub state: MovementState,
    pub grounded: bool,
    pub delta_time: f32,
}

/// Result of one crouch transition step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrouchStep {
    /// Smoothed stance to apply this tick.
    pub current: StanceShape,
    /// Stance being approached.
    pub target: StanceShape,
    pub obstructed: bool,
}

/// Smoothly moves the body between stances.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrouchTransition {
    profile: CrouchProfile,
    current: StanceShape,
    obstructed: bool,
}

impl CrouchTransition {
    /// Start fully standing.
    pub fn new(profile: CrouchProfile) -> Self {
        Self {
            current: profile.standing,
            profile,
            obstructed: false,
        }
    }

    pub fn profile(&self) -> &CrouchProfile {
        &self.profile
    }

    /// The stance applied on the last step.
    pub fn current(&self) -> StanceShape {
        self.current
    }

    /// Whether the last step found the stand blocked overhead.
    pub fn obstructed(&self) -> bool {
        self.obstructed
    }

    /// Advance one tick.
    ///
    /// `clearance` is only called when standing is wanted. It receives the
    /// probe reach and returns the distance to the first obstruction above
    /// the body base.
    pub fn step(
        &mut self,
        input: CrouchInput,
        duration: f32,
        clearance: impl FnOnce(f32) -> Option<f32>,
    ) -> CrouchStep {
        let still_low =
            self.current.height < self.profile.standing.height - NEAR_STANDING_TOLERANCE;
        let should_crouch =
            (input.crouch_intent && !input.state.is_airborne()) || (!input.grounded && still_low);

        let (target, obstructed) = if should_crouch {
            (self.profile.crouching, false)
        } else {
            let hit = clearance(self.profile.probe_distance());
            let (target, obstructed) = self.profile.stand_target(hit);
            if obstructed && !self.obstructed {
                log::debug!(
                    "overhead obstruction, max allowed height {:.2}",
                    target.height
                );
            }
            (target, obstructed)
        };

        let dt = input.delta_time;
        self.current = StanceShape {
            height: approach(self.current.height, target.height, dt, duration),
            center: approach_vec3(self.current.center, target.center, dt, duration),
            camera_y: approach(self.current.camera_y, target.camera_y, dt, duration),
        };
        self.obstructed = obstructed;

        CrouchStep {
            current: self.current,
            target,
            obstructed,
        }
    }
}
