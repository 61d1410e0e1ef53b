//! Movement state and input structures.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Move input below this magnitude counts as no input.
pub const MOVE_DEADZONE: f32 = 0.1;

/// The locomotion state. Exactly one is active per tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MovementState {
    #[default]
    Idle,
    Walking,
    Sprinting,
    Crouching,
    Jumping,
    Falling,
}

impl MovementState {
    /// Whether this state only occurs off the ground.
    #[inline]
    pub fn is_airborne(self) -> bool {
        matches!(self, Self::Jumping | Self::Falling)
    }
}

/// What the player is asking for this tick.
///
/// Written by the input boundary, read by the controller. `jump_requested`
/// is an edge: the controller clears it on the tick it is looked at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InputIntent {
    /// Planar move input, each axis in [-1, 1]. `y` is forward.
    pub move_axis: Vec2,

    /// Look input in device units, `x` yaw and `y` pitch.
    pub look_axis: Vec2,

    pub sprint_held: bool,
    pub crouch_held: bool,
    pub jump_requested: bool,
}

impl InputIntent {
    /// Magnitude of the move input.
    #[inline]
    pub fn move_magnitude(&self) -> f32 {
        self.move_axis.length()
    }
}

/// Everything the classifier looks at.
#[derive(Debug, Clone, Copy)]
pub struct ClassifyInput {
    pub grounded: bool,
    pub vertical_velocity: f32,
    pub move_magnitude: f32,
    pub sprint: bool,
    pub crouch: bool,
    pub obstructed: bool,
    pub previous: MovementState,
}

/// Derive this tick's movement state. The first matching rule wins.
pub fn classify(input: ClassifyInput) -> MovementState {
    if !input.grounded {
        return if input.vertical_velocity > 0.0 {
            MovementState::Jumping
        } else if input.vertical_velocity < 0.0 {
            MovementState::Falling
        } else {
            // Apex of an arc or a body that never got a velocity
            input.previous
        };
    }

    if input.crouch || input.obstructed {
        MovementState::Crouching
    } else if input.sprint && input.previous != MovementState::Crouching {
        MovementState::Sprinting
    } else if input.move_magnitude >= MOVE_DEADZONE {
        MovementState::Walking
    } else {
        MovementState::Idle
    }
}
