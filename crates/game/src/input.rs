//! Player input handling.
//!
//! This module turns input events into the per-tick [`InputIntent`] the
//! controller reads, and converts raw polled key/mouse state into events for
//! hosts that do not produce events themselves.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use strider_physics::movement::FeatureToggles;
use strider_physics::InputIntent;

use crate::events::{InputDispatcher, InputEvent, ListenerId};

/// Applies input events to an [`InputIntent`].
///
/// Honours the feature toggles and the hold-vs-toggle modes: in toggle mode
/// each start event flips the latch and cancel events are ignored.
#[derive(Debug, Clone, Default)]
pub struct InputLatch {
    features: FeatureToggles,
    intent: InputIntent,
    interact_requested: bool,
}

impl InputLatch {
    pub fn new(features: FeatureToggles) -> Self {
        Self {
            features,
            intent: InputIntent::default(),
            interact_requested: false,
        }
    }

    pub fn intent(&self) -> &InputIntent {
        &self.intent
    }

    pub fn intent_mut(&mut self) -> &mut InputIntent {
        &mut self.intent
    }

    /// Take the pending interact request, if any.
    pub fn take_interact(&mut self) -> bool {
        std::mem::take(&mut self.interact_requested)
    }

    /// Update the intent from one event.
    pub fn apply(&mut self, event: &InputEvent) {
        let features = self.features;
        match *event {
            InputEvent::Move(axis) => {
                self.intent.move_axis = axis.clamp(Vec2::NEG_ONE, Vec2::ONE);
            }
            InputEvent::Look(axis) => {
                self.intent.look_axis = axis;
            }
            InputEvent::JumpStarted => {
                if features.jump_enabled && !self.intent.crouch_held {
                    self.intent.jump_requested = true;
                }
            }
            InputEvent::SprintStarted if features.sprint_enabled => {
                self.intent.sprint_held = features.hold_to_sprint || !self.intent.sprint_held;
            }
            InputEvent::SprintCanceled if features.sprint_enabled && features.hold_to_sprint => {
                self.intent.sprint_held = false;
            }
            InputEvent::CrouchStarted if features.crouch_enabled => {
                self.intent.crouch_held = features.hold_to_crouch || !self.intent.crouch_held;
            }
            InputEvent::CrouchCanceled if features.crouch_enabled && features.hold_to_crouch => {
                self.intent.crouch_held = false;
            }
            InputEvent::InteractStarted => {
                self.interact_requested = true;
            }
            _ => {}
        }
    }
}

/// Connects a shared [`InputLatch`] to an [`InputDispatcher`].
///
/// Activation subscribes one listener and deactivation removes it; repeated
/// calls in either direction are no-ops.
#[derive(Debug)]
pub struct InputBinding {
    latch: Rc<RefCell<InputLatch>>,
    listener: Option<ListenerId>,
}

impl InputBinding {
    pub fn new(latch: InputLatch) -> Self {
        Self {
            latch: Rc::new(RefCell::new(latch)),
            listener: None,
        }
    }

    /// The latch events are written into.
    pub fn latch(&self) -> &Rc<RefCell<InputLatch>> {
        &self.latch
    }

    pub fn is_active(&self) -> bool {
        self.listener.is_some()
    }

    pub fn activate(&mut self, dispatcher: &mut InputDispatcher) {
        if self.listener.is_some() {
            return;
        }
        let latch = Rc::clone(&self.latch);
        let id = dispatcher.subscribe(move |event| latch.borrow_mut().apply(event));
        self.listener = Some(id);
        log::debug!("input binding activated ({id:?})");
    }

    pub fn deactivate(&mut self, dispatcher: &mut InputDispatcher) {
        if let Some(id) = self.listener.take() {
            dispatcher.unsubscribe(id);
            log::debug!("input binding deactivated ({id:?})");
        }
    }
}

/// Raw player input for a single frame.
///
/// For hosts that poll devices. [`PlayerInput::to_events`] diffs two frames
/// into the events the dispatcher expects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerInput {
    /// Movement keys pressed.
    pub movement: MovementInput,

    /// Mouse delta this frame (pixels, screen space with y down).
    pub mouse_delta: (f32, f32),

    /// Action buttons pressed.
    pub actions: ActionInput,

    /// Frame number this input was generated.
    pub frame: u32,
}

/// Movement key states.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementInput {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

/// Action button states.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionInput {
    pub jump: bool,
    pub crouch: bool,
    pub sprint: bool,
    pub interact: bool,
}

impl PlayerInput {
    /// Move axis from the movement keys, `y` forward.
    pub fn move_axis(&self) -> Vec2 {
        let mut axis = Vec2::ZERO;
        if self.movement.forward {
            axis.y += 1.0;
        }
        if self.movement.backward {
            axis.y -= 1.0;
        }
        if self.movement.right {
            axis.x += 1.0;
        }
        if self.movement.left {
            axis.x -= 1.0;
        }
        axis
    }

    /// Check if any movement input is active.
    pub fn has_movement(&self) -> bool {
        self.move_axis() != Vec2::ZERO
    }

    /// Events for this frame given the previous frame's state.
    ///
    /// Axis events are always emitted. Buttons emit on their press and release
    /// edges only. Mouse up becomes positive look `y`.
    pub fn to_events(&self, previous: &PlayerInput, mouse_sensitivity: f32) -> Vec<InputEvent> {
        let mut events = vec![
            InputEvent::Move(self.move_axis()),
            InputEvent::Look(Vec2::new(
                self.mouse_delta.0 * mouse_sensitivity,
                -self.mouse_delta.1 * mouse_sensitivity,
            )),
        ];

        let now = self.actions;
        let before = previous.actions;

        if now.jump && !before.jump {
            events.push(InputEvent::JumpStarted);
        }
        match (before.sprint, now.sprint) {
            (false, true) => events.push(InputEvent::SprintStarted),
            (true, false) => events.push(InputEvent::SprintCanceled),
            _ => {}
        }
        match (before.crouch, now.crouch) {
            (false, true) => events.push(InputEvent::CrouchStarted),
            (true, false) => events.push(InputEvent::CrouchCanceled),
            _ => {}
        }
        if now.interact && !before.interact {
            events.push(InputEvent::InteractStarted);
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toggles() -> FeatureToggles {
        FeatureToggles {
            hold_to_sprint: false,
            hold_to_crouch: false,
            ..Default::default()
        }
    }

    #[test]
    fn test_move_axis_clamped() {
        let mut latch = InputLatch::new(FeatureToggles::default());
        latch.apply(&InputEvent::Move(Vec2::new(3.0, -0.5)));
        assert_eq!(latch.intent().move_axis, Vec2::new(1.0, -0.5));
    }

    #[test]
    fn test_hold_mode() {
        let mut latch = InputLatch::new(FeatureToggles::default());

        latch.apply(&InputEvent::SprintStarted);
        assert!(latch.intent().sprint_held);
        latch.apply(&InputEvent::SprintStarted);
        assert!(latch.intent().sprint_held);
        latch.apply(&InputEvent::SprintCanceled);
        assert!(!latch.intent().sprint_held);

        latch.apply(&InputEvent::CrouchStarted);
        assert!(latch.intent().crouch_held);
        latch.apply(&InputEvent::CrouchCanceled);
        assert!(!latch.intent().crouch_held);
    }

    #[test]
    fn test_toggle_mode_ignores_cancel() {
        let mut latch = InputLatch::new(toggles());

        latch.apply(&InputEvent::CrouchStarted);
        latch.apply(&InputEvent::CrouchCanceled);
        assert!(latch.intent().crouch_held);

        latch.apply(&InputEvent::CrouchStarted);
        assert!(!latch.intent().crouch_held);

        latch.apply(&InputEvent::SprintStarted);
        latch.apply(&InputEvent::SprintCanceled);
        assert!(latch.intent().sprint_held);
        latch.apply(&InputEvent::SprintStarted);
        assert!(!latch.intent().sprint_held);
    }

    #[test]
    fn test_disabled_features_ignored() {
        let mut latch = InputLatch::new(FeatureToggles {
            jump_enabled: false,
            sprint_enabled: false,
            crouch_enabled: false,
            ..Default::default()
        });

        latch.apply(&InputEvent::JumpStarted);
        latch.apply(&InputEvent::SprintStarted);
        latch.apply(&InputEvent::CrouchStarted);

        assert_eq!(*latch.intent(), InputIntent::default());
    }

    #[test]
    fn test_jump_dropped_while_crouch_held() {
        let mut latch = InputLatch::new(FeatureToggles::default());
        latch.apply(&InputEvent::CrouchStarted);
        latch.apply(&InputEvent::JumpStarted);
        assert!(!latch.intent().jump_requested);

        latch.apply(&InputEvent::CrouchCanceled);
        latch.apply(&InputEvent::JumpStarted);
        assert!(latch.intent().jump_requested);
    }

    #[test]
    fn test_interact_taken_once() {
        let mut latch = InputLatch::new(FeatureToggles::default());
        latch.apply(&InputEvent::InteractStarted);
        assert!(latch.take_interact());
        assert!(!latch.take_interact());
    }

    #[test]
    fn test_binding_activation_cycles_do_not_leak() {
        let mut dispatcher = InputDispatcher::new();
        let mut binding = InputBinding::new(InputLatch::new(FeatureToggles::default()));

        for _ in 0..5 {
            binding.activate(&mut dispatcher);
            binding.activate(&mut dispatcher);
            assert_eq!(dispatcher.listener_count(), 1);
            assert!(binding.is_active());

            binding.deactivate(&mut dispatcher);
            binding.deactivate(&mut dispatcher);
            assert_eq!(dispatcher.listener_count(), 0);
            assert!(!binding.is_active());
        }
    }

    #[test]
    fn test_binding_routes_events_only_while_active() {
        let mut dispatcher = InputDispatcher::new();
        let mut binding = InputBinding::new(InputLatch::new(FeatureToggles::default()));

        dispatcher.dispatch(&InputEvent::SprintStarted);
        assert!(!binding.latch().borrow().intent().sprint_held);

        binding.activate(&mut dispatcher);
        dispatcher.dispatch(&InputEvent::SprintStarted);
        assert!(binding.latch().borrow().intent().sprint_held);

        binding.deactivate(&mut dispatcher);
        dispatcher.dispatch(&InputEvent::SprintCanceled);
        assert!(binding.latch().borrow().intent().sprint_held);
    }

    #[test]
    fn test_raw_input_to_events() {
        let previous = PlayerInput::default();
        let mut input = PlayerInput::default();
        input.movement.forward = true;
        input.movement.right = true;
        input.mouse_delta = (4.0, 2.0);
        input.actions.jump = true;
        input.actions.sprint = true;

        let events = input.to_events(&previous, 0.5);

        assert_eq!(events[0], InputEvent::Move(Vec2::new(1.0, 1.0)));
        assert_eq!(events[1], InputEvent::Look(Vec2::new(2.0, -1.0)));
        assert!(events.contains(&InputEvent::JumpStarted));
        assert!(events.contains(&InputEvent::SprintStarted));

        // Held buttons do not repeat, released ones cancel
        let mut next = input.clone();
        next.actions.sprint = false;
        let events = next.to_events(&input, 0.5);
        assert!(!events.contains(&InputEvent::JumpStarted));
        assert!(events.contains(&InputEvent::SprintCanceled));
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let mut input = PlayerInput::default();
        input.movement.left = true;
        input.movement.right = true;
        assert!(!input.has_movement());
    }
}
