//! Trace results and shapes for collision queries.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::flags::ContentFlags;

/// Result of sweeping a shape through the world.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceResult {
    /// How far along the trace path we got before hitting something.
    ///
    /// - `1.0` = traveled the full distance (no collision)
    /// - `0.0` = hit something immediately at start
    pub fraction: f32,

    /// Final shape center after the trace.
    ///
    /// If `fraction < 1.0`, this is the last sampled position that was
    /// still clear of solid geometry.
    pub end_position: Vec3,

    /// Surface normal at the impact point, pointing away from the surface.
    /// `None` if nothing was hit.
    pub hit_normal: Option<Vec3>,

    /// Content flags of what was hit.
    pub hit_contents: ContentFlags,

    /// Whether the trace started inside solid geometry.
    pub started_in_solid: bool,

    /// Whether the trace started in solid and could not move at all.
    pub all_solid: bool,
}

impl Default for TraceResult {
    fn default() -> Self {
        Self::no_hit(Vec3::ZERO)
    }
}

impl TraceResult {
    /// Create a trace result indicating no collision occurred.
    pub fn no_hit(end_position: Vec3) -> Self {
        Self {
            fraction: 1.0,
            end_position,
            hit_normal: None,
            hit_contents: ContentFlags::EMPTY,
            started_in_solid: false,
            all_solid: false,
        }
    }

    /// Create a trace result indicating a collision occurred.
    pub fn hit(fraction: f32, end_position: Vec3, normal: Vec3) -> Self {
        Self {
            fraction,
            end_position,
            hit_normal: Some(normal),
            hit_contents: ContentFlags::SOLID,
            started_in_solid: false,
            all_solid: false,
        }
    }

    /// Check if this trace hit something.
    #[inline]
    pub fn hit_something(&self) -> bool {
        self.fraction < 1.0
    }

    /// Get the hit normal, defaulting to up if none.
    #[inline]
    pub fn normal_or_up(&self) -> Vec3 {
        self.hit_normal.unwrap_or(Vec3::Y)
    }
}

/// Shape used for collision traces. Traces place the shape by its center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TraceShape {
    /// A vertical capsule (pill shape).
    Capsule {
        /// Radius of the capsule cylinder and end caps.
        radius: f32,
        /// Total height from bottom of lower cap to top of upper cap.
        height: f32,
    },

    /// A sphere, used by overlap probes.
    Sphere {
        /// Sphere radius.
        radius: f32,
    },

    /// A single point (infinitely small).
    Point,
}

impl TraceShape {
    /// Get the effective horizontal radius of this shape.
    pub fn radius(&self) -> f32 {
        match self {
            Self::Capsule { radius, .. } | Self::Sphere { radius } => *radius,
            Self::Point => 0.0,
        }
    }

    /// Get the vertical extent of this shape.
    pub fn height(&self) -> f32 {
        match self {
            Self::Capsule { radius, height } => height.max(radius * 2.0),
            Self::Sphere { radius } => radius * 2.0,
            Self::Point => 0.0,
        }
    }

    /// Get a bounding box, relative to the shape center, that fully contains this shape.
    pub fn bounding_box(&self) -> (Vec3, Vec3) {
        let radius = self.radius();
        let half_height = self.height() / 2.0;
        (
            Vec3::new(-radius, -half_height, -radius),
            Vec3::new(radius, half_height, radius),
        )
    }
}
