//! Strider Physics
//!
//! First-person character locomotion: a movement controller that turns player
//! intent into grounded and airborne motion, crouch transitions with overhead
//! clearance, and camera look, plus a small collision world to run it in.
//!
//! # Architecture
//!
//! - **Collision**: Box brushes with content flags; capsule sweeps, rays and sphere probes
//! - **Movement**: The controller and the collaborator traits it drives
//!
//! The controller is single-threaded and runs once per simulation tick. All
//! smoothing is frame-rate independent, so the same input over the same span
//! of time gives the same result at any tick rate.

pub mod collision;
pub mod movement;

// Re-export commonly used types
pub use collision::{CollisionWorld, ContentFlags, TraceResult, TraceShape};
pub use movement::{
    CameraPivot, CapsuleBody, CharacterBody, ColliderShape, ControllerBuilder, ControllerError,
    InputIntent, MovementConfig, MovementState, PlayerController, TickReport, WorldQuery,
};
