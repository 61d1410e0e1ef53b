//! Jump cooldown.
//!
//! A jump request is an edge: it is either consumed on the tick it arrives or
//! dropped. Nothing is queued, so a press during the cooldown never fires
//! later on its own.

use serde::{Deserialize, Serialize};

/// Tracks time since the last jump.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JumpCooldown {
    /// Time remaining before the next jump is allowed (seconds).
    remaining: f32,
}

/// Conditions for one jump attempt.
#[derive(Debug, Clone, Copy)]
pub struct JumpAttempt {
    pub enabled: bool,
    pub requested: bool,
    pub grounded: bool,
    pub crouching: bool,
}

impl JumpCooldown {
    /// Create a cooldown that allows a jump immediately.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the timer.
    pub fn tick(&mut self, delta_time: f32) {
        self.remaining = (self.remaining - delta_time).max(0.0);
    }

    /// Whether the cooldown has run out.
    #[inline]
    pub fn ready(&self) -> bool {
        self.remaining <= 0.0
    }

    /// Get remaining cooldown time in seconds.
    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    /// Decide whether `attempt` launches a jump. A launch restarts the cooldown.
    pub fn try_jump(&mut self, attempt: JumpAttempt, cooldown: f32) -> bool {
        let should_jump = attempt.enabled
            && attempt.requested
            && attempt.grounded
            && !attempt.crouching
            && self.ready();

        if should_jump {
            self.remaining = cooldown.max(0.0);
        }

        should_jump
    }
}
