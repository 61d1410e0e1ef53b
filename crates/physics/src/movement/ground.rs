//! Ground sensing with landing and take-off edges.

use serde::{Deserialize, Serialize};

use super::config::GroundCheckMode;
use super::host::{CharacterBody, WorldQuery};

/// Grounded flag with one tick of history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundState {
    pub is_grounded: bool,
    pub was_grounded_last_tick: bool,
}

impl GroundState {
    /// Grounded this tick but not the last.
    #[inline]
    pub fn just_landed(&self) -> bool {
        self.is_grounded && !self.was_grounded_last_tick
    }

    /// Grounded last tick but not this one.
    #[inline]
    pub fn just_left_ground(&self) -> bool {
        !self.is_grounded && self.was_grounded_last_tick
    }
}

/// Samples the grounded flag once per tick.
#[derive(Debug, Clone)]
pub struct GroundSensor {
    mode: GroundCheckMode,
    state: GroundState,
}

impl GroundSensor {
    pub fn new(mode: GroundCheckMode) -> Self {
        Self {
            mode,
            state: GroundState::default(),
        }
    }

    pub fn mode(&self) -> GroundCheckMode {
        self.mode
    }

    pub fn state(&self) -> GroundState {
        self.state
    }

    /// Sample the ground for this tick.
    pub fn sense<B, W>(&mut self, body: &B, world: &W) -> GroundState
    where
        B: CharacterBody + ?Sized,
        W: WorldQuery + ?Sized,
    {
        let grounded = match self.mode {
            GroundCheckMode::BodyContact => body.is_grounded(),
            GroundCheckMode::ProbeSphere { radius, mask } => {
                world.probe_sphere(body.position(), radius, mask)
            }
        };

        self.state = GroundState {
            is_grounded: grounded,
            was_grounded_last_tick: self.state.is_grounded,
        };

        if self.state.just_landed() {
            log::debug!("just landed at y={:.3}", body.position().y);
        } else if self.state.just_left_ground() {
            log::debug!("just left ground at y={:.3}", body.position().y);
        }

        self.state
    }
}
