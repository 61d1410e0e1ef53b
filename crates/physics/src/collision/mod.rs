//! Collision detection for the character body.
//!
//! This module provides world collision testing using capsule, sphere and
//! point shapes against box brushes.
//!
//! # Key Types
//!
//! - [`CollisionWorld`]: The collision environment containing all geometry
//! - [`TraceResult`]: Output from a collision trace
//! - [`TraceShape`]: Shape used for tracing
//! - [`ContentFlags`]: Brush classification used to filter queries
//!
//! # Tracing Algorithm
//!
//! Traces sweep a shape through the world and return:
//! - How far the shape traveled (fraction 0.0-1.0)
//! - The final position
//! - Surface normal at impact (if any)
//! - Content flags of what was hit

mod flags;
mod trace;
mod world;

pub use flags::ContentFlags;
pub use trace::{TraceResult, TraceShape};
pub use world::{CollisionBrush, CollisionWorld};
