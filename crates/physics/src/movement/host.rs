//! Collaborators the controller drives.
//!
//! The controller never touches a physics engine or camera directly. The host
//! hands it a body, a camera pivot and a world query object, and the controller
//! only speaks through these traits.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::collision::ContentFlags;

/// Vertical collider dimensions, relative to the body's base position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColliderShape {
    /// Total collider height (meters).
    pub height: f32,
    /// Collider center offset from the body base.
    pub center: Vec3,
}

impl ColliderShape {
    /// A collider of `height` whose base sits on the body origin.
    pub fn grounded(height: f32) -> Self {
        Self {
            height,
            center: Vec3::new(0.0, height * 0.5, 0.0),
        }
    }
}

/// The moving character body.
pub trait CharacterBody {
    /// Base (feet) position in world space.
    fn position(&self) -> Vec3;

    /// Move by `displacement`, resolving collisions.
    ///
    /// Returns the displacement that was actually applied, which may be
    /// shorter than requested or deflected along surfaces.
    fn move_by(&mut self, displacement: Vec3) -> Vec3;

    /// Whether the last move left the body standing on walkable ground.
    fn is_grounded(&self) -> bool;

    /// Body yaw in degrees. Positive turns right.
    fn yaw_degrees(&self) -> f32;

    /// Rotate the body about the vertical axis.
    fn rotate_yaw(&mut self, delta_degrees: f32);

    /// Current collider dimensions.
    fn collider(&self) -> ColliderShape;

    /// Resize the collider.
    fn set_collider(&mut self, shape: ColliderShape);
}

/// The camera mount attached to the body.
pub trait CameraPivot {
    /// Camera height above the body base.
    fn local_height(&self) -> f32;

    fn set_local_height(&mut self, height: f32);

    /// Camera pitch in degrees, positive looks down.
    fn pitch_degrees(&self) -> f32;

    fn set_pitch_degrees(&mut self, pitch: f32);
}

/// Spatial queries against the world the body lives in.
pub trait WorldQuery {
    /// Distance to the first obstruction straight above `origin`, if any lies
    /// within `max_distance`. The controlled body itself is never reported.
    fn cast_upward(&self, origin: Vec3, max_distance: f32) -> Option<f32>;

    /// Whether a sphere at `origin` overlaps geometry classified by `mask`.
    fn probe_sphere(&self, origin: Vec3, radius: f32, mask: ContentFlags) -> bool;
}

impl<W: WorldQuery + ?Sized> WorldQuery for &W {
    fn cast_upward(&self, origin: Vec3, max_distance: f32) -> Option<f32> {
        (**self).cast_upward(origin, max_distance)
    }

    fn probe_sphere(&self, origin: Vec3, radius: f32, mask: ContentFlags) -> bool {
        (**self).probe_sphere(origin, radius, mask)
    }
}

impl<W: WorldQuery + ?Sized> WorldQuery for std::sync::Arc<W> {
    fn cast_upward(&self, origin: Vec3, max_distance: f32) -> Option<f32> {
        (**self).cast_upward(origin, max_distance)
    }

    fn probe_sphere(&self, origin: Vec3, radius: f32, mask: ContentFlags) -> bool {
        (**self).probe_sphere(origin, radius, mask)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grounded_collider_sits_on_base() {
        let shape = ColliderShape::grounded(2.0);
        assert_eq!(shape.center, Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(shape.height, 2.0);
    }
}
