//! Player entity: a controller bound to an input latch.

use glam::Vec3;
use strider_physics::movement::{BodySettings, LookStep};
use strider_physics::{
    CapsuleBody, CharacterBody, ColliderShape, CollisionWorld, ControllerBuilder, MovementConfig,
    MovementState, PlayerController, TickReport,
};

use crate::camera::CameraRig;
use crate::events::InputDispatcher;
use crate::input::{InputBinding, InputLatch};
use crate::level::{Level, SpawnPoint};

/// Unique identifier for entities.
pub type EntityId = u32;

/// Standing collider height for spawned players (meters).
pub const STANDING_HEIGHT: f32 = 2.0;

/// Standing eye height above the body base (meters).
pub const STANDING_EYE_HEIGHT: f32 = 1.6;

/// The controller type players drive.
pub type Controller = PlayerController<CapsuleBody, CameraRig>;

/// A player in the game.
#[derive(Debug)]
pub struct Player {
    /// Unique player ID.
    pub id: EntityId,

    /// Player name/handle.
    pub name: String,

    /// Where the player spawned.
    pub spawn: SpawnPoint,

    /// `None` when the controller failed to build; the player is then inert.
    controller: Option<Controller>,

    binding: InputBinding,

    last_report: Option<TickReport>,
}

impl Player {
    /// Spawn a player at `spawn` in `level`.
    ///
    /// A configuration the controller rejects is logged and leaves the player
    /// inert rather than failing the caller.
    pub fn spawn(
        id: EntityId,
        name: &str,
        level: &Level,
        spawn: SpawnPoint,
        config: MovementConfig,
        settings: BodySettings,
    ) -> Self {
        let binding = InputBinding::new(InputLatch::new(config.features));

        let mut body = CapsuleBody::new(
            level.collision.clone(),
            spawn.position,
            ColliderShape::grounded(STANDING_HEIGHT),
            settings,
        );
        body.rotate_yaw(spawn.facing);

        let controller = match ControllerBuilder::new(config)
            .body(body)
            .camera_pivot(CameraRig::new(STANDING_EYE_HEIGHT))
            .build()
        {
            Ok(controller) => Some(controller),
            Err(err) => {
                log::error!("player {id} ({name}) has no working controller: {err}");
                None
            }
        };

        Self {
            id,
            name: name.to_string(),
            spawn,
            controller,
            binding,
            last_report: None,
        }
    }

    /// Whether the player has a working controller.
    pub fn is_active(&self) -> bool {
        self.controller.is_some()
    }

    pub fn controller(&self) -> Option<&Controller> {
        self.controller.as_ref()
    }

    pub fn binding(&self) -> &InputBinding {
        &self.binding
    }

    /// Start receiving input events.
    pub fn enable_input(&mut self, dispatcher: &mut InputDispatcher) {
        self.binding.activate(dispatcher);
    }

    /// Stop receiving input events.
    pub fn disable_input(&mut self, dispatcher: &mut InputDispatcher) {
        self.binding.deactivate(dispatcher);
    }

    /// Run the movement phase.
    pub fn update(&mut self, world: &CollisionWorld, delta_time: f32) -> Option<TickReport> {
        let controller = self.controller.as_mut()?;
        let mut latch = self.binding.latch().borrow_mut();

        if latch.take_interact() {
            log::debug!("player {} interact at {:?}", self.id, controller.body().position());
        }

        let report = controller.tick(latch.intent_mut(), world, delta_time);
        self.last_report = report;
        report
    }

    /// Run the look phase. Call after every player has moved.
    pub fn late_update(&mut self, delta_time: f32) -> Option<LookStep> {
        let controller = self.controller.as_mut()?;
        let latch = self.binding.latch().borrow();
        controller.late_tick(latch.intent(), delta_time)
    }

    /// Report from the last movement phase.
    pub fn last_report(&self) -> Option<TickReport> {
        self.last_report
    }

    /// Body base position, or the spawn position for an inert player.
    pub fn position(&self) -> Vec3 {
        self.controller
            .as_ref()
            .map_or(self.spawn.position, |c| c.body().position())
    }

    /// Eye position (for camera).
    pub fn eye_position(&self) -> Vec3 {
        match &self.controller {
            Some(c) => c.camera_pivot().eye_position(c.body().position()),
            None => self.spawn.position + Vec3::Y * STANDING_EYE_HEIGHT,
        }
    }

    /// Direction the player is looking.
    pub fn look_direction(&self) -> Vec3 {
        match &self.controller {
            Some(c) => c.camera_pivot().look_direction(c.body().yaw_degrees()),
            None => CameraRig::default().look_direction(self.spawn.facing),
        }
    }

    pub fn state(&self) -> MovementState {
        self.controller
            .as_ref()
            .map_or(MovementState::Idle, |c| c.state())
    }
}
