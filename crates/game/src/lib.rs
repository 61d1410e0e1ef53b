//! Strider Game Logic
//!
//! This crate hosts the movement controller in a small fixed-step game:
//!
//! - Input events and the dispatcher that delivers them
//! - Input latching (hold/toggle sprint and crouch) into per-tick intent
//! - The first-person camera rig the controller drives
//! - Level geometry and spawn points
//! - The player entity and the simulation loop
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                        Simulation tick                         │
//! │  ┌──────────┐   ┌───────────┐   ┌──────────┐   ┌────────────┐  │
//! │  │ Input    │──►│ Dispatcher│──►│ Latch    │──►│ Controller │  │
//! │  │ events   │   │           │   │ (intent) │   │ move, look │  │
//! │  └──────────┘   └───────────┘   └──────────┘   └────────────┘  │
//! └────────────────────────────────────────────────────────────────┘
//! ```

pub mod camera;
pub mod events;
pub mod input;
pub mod level;
pub mod player;
pub mod simulation;

// Re-export main types
pub use camera::CameraRig;
pub use events::{InputDispatcher, InputEvent, ListenerId};
pub use input::{InputBinding, InputLatch, PlayerInput};
pub use level::{Level, SpawnPoint};
pub use player::Player;
pub use simulation::{Simulation, SimulationConfig};

// Re-export physics types for convenience
pub use strider_physics::{
    CollisionWorld, ContentFlags, MovementConfig, MovementState, PlayerController, TickReport,
    TraceResult, TraceShape,
};
