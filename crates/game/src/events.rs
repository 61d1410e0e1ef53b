//! Input events and the dispatcher that delivers them.
//!
//! Hosts push [`InputEvent`]s into an [`InputDispatcher`]; listeners registered
//! on it receive every event synchronously, in registration order, before the
//! simulation runs its movement step.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A discrete input event from the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Move axis changed. `y` is forward.
    Move(Vec2),
    /// Look axis changed, `x` yaw and `y` pitch.
    Look(Vec2),
    JumpStarted,
    SprintStarted,
    SprintCanceled,
    CrouchStarted,
    CrouchCanceled,
    InteractStarted,
}

/// Handle returned by [`InputDispatcher::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListenerId(u32);

type Listener = Box<dyn FnMut(&InputEvent)>;

/// Typed event bus for input.
#[derive(Default)]
pub struct InputDispatcher {
    listeners: Vec<(ListenerId, Listener)>,
    next_id: u32,
}

impl std::fmt::Debug for InputDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputDispatcher")
            .field("listeners", &self.listeners.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}

impl InputDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. It stays registered until unsubscribed.
    pub fn subscribe(&mut self, listener: impl FnMut(&InputEvent) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    /// Deliver an event to every listener.
    pub fn dispatch(&mut self, event: &InputEvent) {
        for (_, listener) in &mut self.listeners {
            listener(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}
