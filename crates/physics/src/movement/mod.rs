//! First-person locomotion.
//!
//! This module turns per-tick player intent into body motion:
//!
//! - Movement state classification (idle, walking, sprinting, crouching, airborne)
//! - Smoothed horizontal speed, gravity and cooldown-gated jumps
//! - Crouch/stand transitions limited by overhead clearance
//! - Yaw and clamped pitch from look input
//! - Ground sensing with landing and take-off edges
//!
//! # Design
//!
//! The [`PlayerController`] drives a [`CharacterBody`] and a [`CameraPivot`]
//! and queries the world through [`WorldQuery`]. [`CapsuleBody`] and
//! [`CollisionWorld`](crate::CollisionWorld) are the bundled implementations;
//! hosts with their own physics implement the traits instead.

mod body;
mod config;
mod controller;
mod crouch;
mod error;
mod ground;
mod host;
mod jump;
mod kinematic;
mod look;
mod slide_move;
mod smoothing;
mod state;

pub use body::{BodySettings, CapsuleBody};
pub use config::{FeatureToggles, GroundCheckMode, MovementConfig};
pub use controller::{ControllerBuilder, PlayerController, TickReport};
pub use crouch::{CrouchProfile, CrouchStep, CrouchTransition, StanceShape};
pub use error::ControllerError;
pub use ground::{GroundSensor, GroundState};
pub use host::{CameraPivot, CharacterBody, ColliderShape, WorldQuery};
pub use jump::JumpCooldown;
pub use kinematic::{move_direction, Kinematics};
pub use look::{look_step, signed_angle, LookStep};
pub use slide_move::{clip_velocity, slide_move, SlideResult};
pub use smoothing::{approach, approach_vec3, blend_factor};
pub use state::{classify, ClassifyInput, InputIntent, MovementState, MOVE_DEADZONE};
