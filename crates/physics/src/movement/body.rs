//! Capsule character body moving through a [`CollisionWorld`].

use std::sync::Arc;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::collision::{CollisionWorld, ContentFlags, TraceShape};

use super::host::{CharacterBody, ColliderShape};
use super::slide_move::slide_move;

/// Tuning for [`CapsuleBody`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodySettings {
    /// Capsule radius (meters).
    pub radius: f32,

    /// Minimum surface normal Y to be considered ground (cos of max slope angle).
    /// 0.7 ≈ 45 degrees
    pub min_ground_normal: f32,

    /// How far below the capsule to look for ground after a move (meters).
    pub ground_probe_distance: f32,
}

impl Default for BodySettings {
    fn default() -> Self {
        Self {
            radius: 0.5,
            min_ground_normal: 0.7,
            ground_probe_distance: 0.05,
        }
    }
}

/// A vertical capsule swept through a shared collision world.
///
/// The position is the base of the capsule. Moves use the clip-plane slide
/// move, and the body counts as grounded when a short downward probe after a
/// non-ascending move finds a walkable surface.
#[derive(Debug, Clone)]
pub struct CapsuleBody {
    world: Arc<CollisionWorld>,
    position: Vec3,
    yaw_degrees: f32,
    collider: ColliderShape,
    settings: BodySettings,
    grounded: bool,
    ground_normal: Option<Vec3>,
}

impl CapsuleBody {
    /// Create a body with its base at `position`.
    pub fn new(
        world: Arc<CollisionWorld>,
        position: Vec3,
        collider: ColliderShape,
        settings: BodySettings,
    ) -> Self {
        Self {
            world,
            position,
            yaw_degrees: 0.0,
            collider,
            settings,
            grounded: false,
            ground_normal: None,
        }
    }

    /// A two meter tall body with default settings.
    pub fn standing(world: Arc<CollisionWorld>, position: Vec3) -> Self {
        Self::new(
            world,
            position,
            ColliderShape::grounded(2.0),
            BodySettings::default(),
        )
    }

    /// Body settings.
    pub fn settings(&self) -> &BodySettings {
        &self.settings
    }

    /// Normal of the surface found under the body by the last move.
    pub fn ground_normal(&self) -> Option<Vec3> {
        self.ground_normal
    }

    /// Teleport the body without collision.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.grounded = false;
        self.ground_normal = None;
    }

    /// World-space collider center.
    pub fn center(&self) -> Vec3 {
        self.position + self.collider.center
    }

    fn trace_shape(&self) -> TraceShape {
        TraceShape::Capsule {
            radius: self.settings.radius,
            height: self.collider.height,
        }
    }

    fn probe_ground(&self, center: Vec3, shape: TraceShape) -> Option<Vec3> {
        let below = center - Vec3::Y * self.settings.ground_probe_distance;
        let trace = self
            .world
            .trace(center, below, shape, ContentFlags::MASK_PLAYER_SOLID);
        if trace.hit_something() {
            trace.hit_normal
        } else {
            None
        }
    }
}

impl CharacterBody for CapsuleBody {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn move_by(&mut self, displacement: Vec3) -> Vec3 {
        let start = self.position;
        let shape = self.trace_shape();
        let mut center = self.center();

        if self
            .world
            .point_in_solid(center, shape, ContentFlags::MASK_PLAYER_SOLID)
        {
            center = self
                .world
                .resolve_penetration(center, shape, ContentFlags::MASK_PLAYER_SOLID);
        }

        slide_move(&self.world, &mut center, displacement, shape);
        self.position = center - self.collider.center;

        // Rising bodies are never grounded, even when brushing a ledge
        self.ground_normal = if displacement.y > 0.0 {
            None
        } else {
            self.probe_ground(center, shape)
        };
        self.grounded = self
            .ground_normal
            .is_some_and(|normal| normal.y >= self.settings.min_ground_normal);

        self.position - start
    }

    fn is_grounded(&self) -> bool {
        self.grounded
    }

    fn yaw_degrees(&self) -> f32 {
        self.yaw_degrees
    }

    fn rotate_yaw(&mut self, delta_degrees: f32) {
        self.yaw_degrees = (self.yaw_degrees + delta_degrees).rem_euclid(360.0);
    }

    fn collider(&self) -> ColliderShape {
        self.collider
    }

    fn set_collider(&mut self, shape: ColliderShape) {
        self.collider = shape;
    }
}
