//! Slide move algorithm for collision response.
//!
//! Sweeps a shape along a displacement and, on impact, clips the remaining
//! displacement against every plane touched so far so the body glides along
//! walls and into corners instead of stopping dead.

use glam::Vec3;

use crate::collision::{CollisionWorld, ContentFlags, TraceShape};

/// Maximum number of collision planes to track during a slide move.
pub const MAX_CLIP_PLANES: usize = 5;

/// Overbounce applied when clipping, keeps the body from re-touching a plane.
pub const OVERBOUNCE: f32 = 1.001;

/// Outcome of a slide move.
#[derive(Debug, Clone, Copy, Default)]
pub struct SlideResult {
    /// Whether any surface was touched.
    pub blocked: bool,
    /// The most upward-facing normal touched, if any.
    pub floor_normal: Option<Vec3>,
}

/// Clip a motion vector against a surface normal.
///
/// Removes the component going into the surface, scaled by `overbounce`.
pub fn clip_velocity(velocity: Vec3, normal: Vec3, overbounce: f32) -> Vec3 {
    let backoff = velocity.dot(normal);

    let adjusted_backoff = if backoff < 0.0 {
        backoff * overbounce
    } else {
        backoff / overbounce
    };

    velocity - normal * adjusted_backoff
}

/// Move a shape centered at `center` by `displacement` through the world.
pub fn slide_move(
    world: &CollisionWorld,
    center: &mut Vec3,
    displacement: Vec3,
    shape: TraceShape,
) -> SlideResult {
    let mut remaining = displacement;
    let mut planes = [Vec3::ZERO; MAX_CLIP_PLANES];
    let mut num_planes = 0;
    let mut result = SlideResult::default();

    for _ in 0..MAX_CLIP_PLANES {
        if remaining.length_squared() < 1e-10 {
            break;
        }

        let trace = world.trace(*center, *center + remaining, shape, ContentFlags::MASK_PLAYER_SOLID);

        if trace.all_solid {
            break;
        }

        *center = trace.end_position;

        if !trace.hit_something() {
            break;
        }

        result.blocked = true;
        let normal = trace.normal_or_up();
        if result.floor_normal.map_or(true, |floor| normal.y > floor.y) {
            result.floor_normal = Some(normal);
        }

        remaining *= 1.0 - trace.fraction;

        if num_planes < MAX_CLIP_PLANES {
            planes[num_planes] = normal;
            num_planes += 1;
        }

        // Find a clip that leaves no plane being pushed into
        let mut resolved = None;
        for i in 0..num_planes {
            let clipped = clip_velocity(remaining, planes[i], OVERBOUNCE);
            let valid = (0..num_planes)
                .filter(|&j| j != i)
                .all(|j| clipped.dot(planes[j]) >= -0.001);
            if valid {
                resolved = Some(clipped);
                break;
            }
        }

        remaining = match resolved {
            Some(clipped) => clipped,
            None if num_planes >= 2 => {
                // Slide along the crease between the first two planes
                let crease = planes[0].cross(planes[1]).normalize_or_zero();
                crease * remaining.dot(crease)
            }
            None => break,
        };
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHAPE: TraceShape = TraceShape::Capsule {
        radius: 0.5,
        height: 2.0,
    };

    #[test]
    fn test_clip_velocity_wall() {
        let velocity = Vec3::new(10.0, 0.0, 5.0);
        let wall_normal = Vec3::new(-1.0, 0.0, 0.0);

        let clipped = clip_velocity(velocity, wall_normal, 1.0);

        assert!(clipped.x.abs() < 0.01);
        assert!((clipped.z - 5.0).abs() < 0.01);
    }

    #[test]
    fn test_clip_velocity_floor_removes_fall() {
        let clipped = clip_velocity(Vec3::new(3.0, -1.0, 0.0), Vec3::Y, 1.0);
        assert!(clipped.y.abs() < 1e-6);
        assert!((clipped.x - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_slide_move_no_collision() {
        let world = CollisionWorld::new();
        let mut center = Vec3::new(0.0, 1.0, 0.0);

        let result = slide_move(&world, &mut center, Vec3::new(5.0, 0.0, 0.0), SHAPE);

        assert!(!result.blocked);
        assert!((center.x - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_slide_move_along_wall() {
        let mut world = CollisionWorld::new();
        world.add_box(
            Vec3::new(5.5, 2.0, 0.0),
            Vec3::new(0.5, 2.0, 10.0),
            ContentFlags::SOLID,
        );

        let mut center = Vec3::new(0.0, 1.0, 0.0);
        let result = slide_move(&world, &mut center, Vec3::new(10.0, 0.0, 5.0), SHAPE);

        assert!(result.blocked);
        // Stopped by the wall face at x=5 minus the radius
        assert!(center.x < 4.51, "x={}", center.x);
        // Kept sliding sideways
        assert!(center.z > 2.0, "z={}", center.z);
    }

    #[test]
    fn test_slide_move_lands_on_floor() {
        let mut world = CollisionWorld::new();
        world.add_box(
            Vec3::new(0.0, -0.5, 0.0),
            Vec3::new(50.0, 0.5, 50.0),
            ContentFlags::SOLID | ContentFlags::GROUND,
        );

        let mut center = Vec3::new(0.0, 1.2, 0.0);
        let result = slide_move(&world, &mut center, Vec3::new(1.0, -0.5, 0.0), SHAPE);

        assert!(result.blocked);
        assert!(result.floor_normal.unwrap().y > 0.9);
        assert!(center.y >= 1.0 && center.y < 1.01, "y={}", center.y);
        assert!((center.x - 1.0).abs() < 0.01, "x={}", center.x);
    }
}
