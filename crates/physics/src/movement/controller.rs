//! First-person character controller.
//!
//! This is the main entry point for character movement. Each tick it senses
//! the ground, classifies the movement state, integrates and applies the
//! displacement, then updates the crouch stance. Look runs separately in a
//! later phase so it always sees the body after it moved.

use glam::Vec3;

use super::config::MovementConfig;
use super::crouch::{CrouchInput, CrouchProfile, CrouchTransition, StanceShape};
use super::error::ControllerError;
use super::ground::{GroundSensor, GroundState};
use super::host::{CameraPivot, CharacterBody, WorldQuery};
use super::kinematic::{Kinematics, StepInput};
use super::look::{look_step, LookStep};
use super::state::{classify, ClassifyInput, InputIntent, MovementState};

/// What happened during one movement tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    pub state: MovementState,
    pub previous_state: MovementState,
    pub ground: GroundState,
    /// Displacement handed to the body.
    pub requested: Vec3,
    /// Displacement the body actually made.
    pub actual: Vec3,
    /// Stance applied to the collider and camera this tick.
    pub stance: StanceShape,
    pub obstructed: bool,
    pub jumped: bool,
}

/// Assembles a [`PlayerController`] from its collaborators.
///
/// # Example
///
/// ```ignore
/// let controller = ControllerBuilder::new(MovementConfig::default())
///     .body(body)
///     .camera_pivot(rig)
///     .build()?;
/// ```
#[derive(Debug)]
pub struct ControllerBuilder<B, P> {
    config: MovementConfig,
    body: Option<B>,
    pivot: Option<P>,
}

impl<B: CharacterBody, P: CameraPivot> ControllerBuilder<B, P> {
    pub fn new(config: MovementConfig) -> Self {
        Self {
            config,
            body: None,
            pivot: None,
        }
    }

    pub fn body(mut self, body: B) -> Self {
        self.body = Some(body);
        self
    }

    pub fn camera_pivot(mut self, pivot: P) -> Self {
        self.pivot = Some(pivot);
        self
    }

    /// Validate collaborators and configuration, and capture the standing
    /// stance from the body's current collider and camera height.
    pub fn build(self) -> Result<PlayerController<B, P>, ControllerError> {
        let body = self.body.ok_or(ControllerError::MissingBody)?;
        let pivot = self.pivot.ok_or(ControllerError::MissingCameraPivot)?;

        let collider = body.collider();
        self.config.validate(collider.height)?;

        let profile = CrouchProfile::capture(collider, pivot.local_height(), &self.config);

        Ok(PlayerController {
            sensor: GroundSensor::new(self.config.ground_check),
            kinematics: Kinematics::new(),
            crouch: CrouchTransition::new(profile),
            state: MovementState::Idle,
            config: self.config,
            body,
            pivot,
        })
    }
}

/// First-person character controller.
#[derive(Debug)]
pub struct PlayerController<B, P> {
    config: MovementConfig,
    body: B,
    pivot: P,
    sensor: GroundSensor,
    kinematics: Kinematics,
    crouch: CrouchTransition,
    state: MovementState,
}

impl<B: CharacterBody, P: CameraPivot> PlayerController<B, P> {
    pub fn config(&self) -> &MovementConfig {
        &self.config
    }

    pub fn body(&self) -> &B {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut B {
        &mut self.body
    }

    pub fn camera_pivot(&self) -> &P {
        &self.pivot
    }

    /// Movement state from the last tick.
    pub fn state(&self) -> MovementState {
        self.state
    }

    pub fn ground(&self) -> GroundState {
        self.sensor.state()
    }

    pub fn kinematics(&self) -> &Kinematics {
        &self.kinematics
    }

    pub fn crouch_profile(&self) -> &CrouchProfile {
        self.crouch.profile()
    }

    /// Current smoothed stance.
    pub fn stance(&self) -> StanceShape {
        self.crouch.current()
    }

    /// Whether standing up is currently blocked overhead.
    pub fn obstructed(&self) -> bool {
        self.crouch.obstructed()
    }

    /// Run the movement phase for one tick.
    ///
    /// Consumes `intent.jump_requested` whether or not a jump launched.
    /// Returns `None` when movement is disabled.
    pub fn tick<W>(&mut self, intent: &mut InputIntent, world: &W, delta_time: f32) -> Option<TickReport>
    where
        W: WorldQuery + ?Sized,
    {
        let jump_requested = std::mem::take(&mut intent.jump_requested);
        if !self.config.features.move_enabled {
            return None;
        }

        let features = self.config.features;
        let ground = self.sensor.sense(&self.body, world);
        self.kinematics.jump.tick(delta_time);

        let previous_state = self.state;
        self.state = classify(ClassifyInput {
            grounded: ground.is_grounded,
            vertical_velocity: self.kinematics.vertical_velocity,
            move_magnitude: intent.move_magnitude(),
            sprint: features.sprint_enabled && intent.sprint_held,
            crouch: features.crouch_enabled && intent.crouch_held,
            obstructed: self.crouch.obstructed(),
            previous: previous_state,
        });
        if self.state != previous_state {
            log::debug!("movement state {:?} -> {:?}", previous_state, self.state);
        }

        let step = self.kinematics.step(
            &self.config,
            StepInput {
                state: self.state,
                move_axis: intent.move_axis,
                yaw_degrees: self.body.yaw_degrees(),
                grounded: ground.is_grounded,
                jump_requested,
                delta_time,
            },
        );
        let actual = self.body.move_by(step.displacement);

        let base = self.body.position();
        let crouch = self.crouch.step(
            CrouchInput {
                crouch_intent: features.crouch_enabled && intent.crouch_held,
                state: self.state,
                grounded: ground.is_grounded,
                delta_time,
            },
            self.config.crouch_transition_duration,
            |max_distance| world.cast_upward(base, max_distance),
        );
        // A stand-up blocked this tick already counts as crouching
        if crouch.obstructed && ground.is_grounded && self.state != MovementState::Crouching {
            log::debug!("movement state {:?} -> Crouching (obstructed)", self.state);
            self.state = MovementState::Crouching;
        }
        self.body.set_collider(crouch.current.collider());
        self.pivot.set_local_height(crouch.current.camera_y);

        Some(TickReport {
            state: self.state,
            previous_state,
            ground,
            requested: step.displacement,
            actual,
            stance: crouch.current,
            obstructed: crouch.obstructed,
            jumped: step.jumped,
        })
    }

    /// Run the look phase for one tick.
    ///
    /// Returns `None` when look is disabled.
    pub fn late_tick(&mut self, intent: &InputIntent, delta_time: f32) -> Option<LookStep> {
        if !self.config.features.look_enabled {
            return None;
        }

        let step = look_step(&self.config, intent.look_axis, self.pivot.pitch_degrees(), delta_time);
        self.body.rotate_yaw(step.yaw_delta);
        self.pivot.set_pitch_degrees(step.pitch);
        Some(step)
    }
}
