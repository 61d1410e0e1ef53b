//! Collision world containing all static geometry.
//!
//! The collision world stores box brushes tagged with [`ContentFlags`] and
//! answers the queries the character needs: capsule sweeps, upward clearance
//! rays and sphere overlap probes.

use glam::{Quat, Vec3};
use parry3d::math::{Isometry, Point, Real, Vector};
use parry3d::query::{PointQuery, Ray, RayCast};
use parry3d::shape::{Shape, SharedShape};

use super::flags::ContentFlags;
use super::trace::{TraceResult, TraceShape};
use crate::movement::WorldQuery;

/// A piece of collision geometry in the world.
#[derive(Clone)]
pub struct CollisionBrush {
    /// Unique identifier for this brush.
    pub id: u32,
    /// The collision shape.
    pub shape: SharedShape,
    /// Position and orientation in world space.
    pub transform: Isometry<Real>,
    /// Content flags used for query filtering.
    pub contents: ContentFlags,
    /// World-space bounds, used to skip distant brushes.
    pub bounds: (Vec3, Vec3),
}

impl std::fmt::Debug for CollisionBrush {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollisionBrush")
            .field("id", &self.id)
            .field("contents", &self.contents)
            .finish_non_exhaustive()
    }
}

/// The collision world containing all geometry.
///
/// Immutable once the level is built, so it can be shared behind an `Arc`
/// by every body that moves through it.
#[derive(Debug, Default)]
pub struct CollisionWorld {
    brushes: Vec<CollisionBrush>,
    next_id: u32,
}

impl CollisionWorld {
    /// Create an empty collision world.
    pub fn new() -> Self {
        Self {
            brushes: Vec::new(),
            next_id: 0,
        }
    }

    /// Add an axis-aligned box to the world.
    ///
    /// # Arguments
    ///
    /// * `center` - Center position of the box in world space
    /// * `half_extents` - Half-size in each axis (x, y, z)
    /// * `contents` - Content flags for collision filtering
    pub fn add_box(&mut self, center: Vec3, half_extents: Vec3, contents: ContentFlags) -> u32 {
        self.add_oriented_box(center, half_extents, Quat::IDENTITY, contents)
    }

    /// Add a rotated box to the world. Used for ramps.
    pub fn add_oriented_box(
        &mut self,
        center: Vec3,
        half_extents: Vec3,
        rotation: Quat,
        contents: ContentFlags,
    ) -> u32 {
        let id = self.next_id;
        self.next_id += 1;

        let axis_angle = rotation.to_scaled_axis();
        let transform = Isometry::new(
            Vector::new(center.x, center.y, center.z),
            Vector::new(axis_angle.x, axis_angle.y, axis_angle.z),
        );

        let shape = SharedShape::cuboid(half_extents.x, half_extents.y, half_extents.z);
        let aabb = shape.compute_aabb(&transform);
        let bounds = (
            Vec3::new(aabb.mins.x, aabb.mins.y, aabb.mins.z),
            Vec3::new(aabb.maxs.x, aabb.maxs.y, aabb.maxs.z),
        );

        self.brushes.push(CollisionBrush {
            id,
            shape,
            transform,
            contents,
            bounds,
        });

        id
    }

    /// Remove all collision geometry.
    pub fn clear(&mut self) {
        self.brushes.clear();
    }

    /// Get the number of collision brushes.
    pub fn brush_count(&self) -> usize {
        self.brushes.len()
    }

    /// Sweep a shape through the world.
    ///
    /// `start` and `end` are shape centers. Only brushes whose contents
    /// intersect `mask` are considered.
    pub fn trace(&self, start: Vec3, end: Vec3, shape: TraceShape, mask: ContentFlags) -> TraceResult {
        let delta = end - start;
        let distance = delta.length();

        // No movement - just check if position is valid
        if distance < 0.0001 {
            return if self.point_in_solid(start, shape, mask) {
                TraceResult {
                    fraction: 0.0,
                    end_position: start,
                    hit_normal: Some(Vec3::Y),
                    hit_contents: ContentFlags::SOLID,
                    started_in_solid: true,
                    all_solid: true,
                }
            } else {
                TraceResult::no_hit(start)
            };
        }

        self.trace_binary_search(start, end, shape, mask, delta / distance)
    }

    /// Cast a ray through the world.
    ///
    /// Brushes that already contain `origin` are skipped, so a ray fired
    /// from inside a volume reports the next surface rather than distance zero.
    pub fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        mask: ContentFlags,
    ) -> TraceResult {
        let dir = direction.normalize_or_zero();
        if dir.length_squared() < 0.5 || max_distance <= 0.0 {
            return TraceResult::no_hit(origin);
        }

        let origin_point = Point::new(origin.x, origin.y, origin.z);
        let ray = Ray::new(origin_point, Vector::new(dir.x, dir.y, dir.z));

        let mut closest: Option<(f32, Vec3, ContentFlags)> = None;

        for brush in &self.brushes {
            if !mask.intersects(brush.contents) {
                continue;
            }
            if brush.shape.contains_point(&brush.transform, &origin_point) {
                continue;
            }

            let Some(toi) = brush.shape.cast_ray(&brush.transform, &ray, max_distance, true) else {
                continue;
            };

            let is_closer = closest.as_ref().map_or(true, |(dist, _, _)| toi < *dist);
            if is_closer {
                let normal = Self::compute_hit_normal(&ray, toi, brush);
                closest = Some((toi, normal, brush.contents));
            }
        }

        match closest {
            Some((distance, normal, contents)) => TraceResult {
                fraction: distance / max_distance,
                end_position: origin + dir * distance,
                hit_normal: Some(normal),
                hit_contents: contents,
                started_in_solid: false,
                all_solid: false,
            },
            None => TraceResult::no_hit(origin + dir * max_distance),
        }
    }

    /// Check whether a shape centered at `position` overlaps masked geometry.
    ///
    /// Touching a surface does not count as overlapping.
    pub fn point_in_solid(&self, position: Vec3, shape: TraceShape, mask: ContentFlags) -> bool {
        self.nearby_brushes(position, shape, mask)
            .any(|brush| Self::separation(brush, position, shape).0 < 0.0)
    }

    /// Push a shape out of any geometry it penetrates.
    ///
    /// Returns the corrected center position.
    pub fn resolve_penetration(&self, position: Vec3, shape: TraceShape, mask: ContentFlags) -> Vec3 {
        let mut correction = Vec3::ZERO;

        for brush in self.nearby_brushes(position, shape, mask) {
            // Touching counts so a resting shape gets lifted clear
            let (gap, normal) = Self::separation(brush, position, shape);
            if gap <= 0.0 {
                correction += normal * (0.001 - gap);
            }
        }

        position + correction
    }

    /// Brushes matching `mask` whose bounds come near a shape at `center`.
    fn nearby_brushes(
        &self,
        center: Vec3,
        shape: TraceShape,
        mask: ContentFlags,
    ) -> impl Iterator<Item = &CollisionBrush> {
        const MARGIN: f32 = 0.01;
        let (lo, hi) = shape.bounding_box();
        let (lo, hi) = (center + lo - Vec3::splat(MARGIN), center + hi + Vec3::splat(MARGIN));

        self.brushes.iter().filter(move |brush| {
            let (min, max) = brush.bounds;
            mask.intersects(brush.contents)
                && lo.x <= max.x
                && hi.x >= min.x
                && lo.y <= max.y
                && hi.y >= min.y
                && lo.z <= max.z
                && hi.z >= min.z
        })
    }

    /// Signed distance from `point` to the brush surface (negative inside),
    /// and the direction that moves the point away from the brush.
    fn signed_distance(brush: &CollisionBrush, point: Vec3) -> (f32, Vec3) {
        let query = Point::new(point.x, point.y, point.z);
        let projection = brush.shape.project_point(&brush.transform, &query, false);
        let surface = Vec3::new(projection.point.x, projection.point.y, projection.point.z);

        let offset = point - surface;
        let distance = offset.length();
        if distance <= 1e-6 {
            // On the surface, direction unknown
            return (0.0, Vec3::Y);
        }

        let outward = offset / distance;
        if projection.is_inside {
            (-distance, -outward)
        } else {
            (distance, outward)
        }
    }

    /// Gap between a shape centered at `center` and a brush (negative when
    /// they overlap), with the direction that separates them.
    ///
    /// Shapes are a vertical core segment swept by a radius. Brushes are
    /// convex, so the signed distance along the segment is convex too and a
    /// ternary search finds its minimum.
    fn separation(brush: &CollisionBrush, center: Vec3, shape: TraceShape) -> (f32, Vec3) {
        let radius = shape.radius();
        let half_segment = match shape {
            TraceShape::Capsule { radius, height } => (height - 2.0 * radius).max(0.0) / 2.0,
            TraceShape::Sphere { .. } | TraceShape::Point => 0.0,
        };

        if half_segment <= 0.0 {
            let (distance, normal) = Self::signed_distance(brush, center);
            return (distance - radius, normal);
        }

        let bottom = center - Vec3::Y * half_segment;
        let span = Vec3::Y * (2.0 * half_segment);
        let at = |t: f32| Self::signed_distance(brush, bottom + span * t).0;

        let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
        for _ in 0..24 {
            let a = lo + (hi - lo) / 3.0;
            let b = hi - (hi - lo) / 3.0;
            if at(a) <= at(b) {
                hi = b;
            } else {
                lo = a;
            }
        }

        // The minimum can sit exactly on an end of the segment
        let best = [0.0, (lo + hi) * 0.5, 1.0]
            .into_iter()
            .map(|t| (t, at(t)))
            .fold((0.0, f32::INFINITY), |best, candidate| {
                if candidate.1 < best.1 {
                    candidate
                } else {
                    best
                }
            })
            .0;

        let (distance, normal) = Self::signed_distance(brush, bottom + span * best);
        (distance - radius, normal)
    }

    fn trace_binary_search(
        &self,
        start: Vec3,
        end: Vec3,
        shape: TraceShape,
        mask: ContentFlags,
        direction: Vec3,
    ) -> TraceResult {
        let start_in_solid = self.point_in_solid(start, shape, mask);
        let delta = end - start;

        // March in steps no longer than half the shape radius so thin brushes
        // cannot be skipped, then refine the first blocked step.
        let step = (shape.radius() * 0.5).max(0.05);
        let samples = (delta.length() / step).ceil().max(1.0) as u32;

        let mut lo = 0.0_f32;
        let mut blocked_at = None;
        for i in 1..=samples {
            let t = i as f32 / samples as f32;
            if self.point_in_solid(start + delta * t, shape, mask) {
                blocked_at = Some(t);
                break;
            }
            lo = t;
        }

        let Some(mut hi) = blocked_at else {
            return TraceResult {
                started_in_solid: start_in_solid,
                ..TraceResult::no_hit(end)
            };
        };

        // 12 iterations gives ~0.025% precision within the blocked step
        for _ in 0..12 {
            let mid = (lo + hi) * 0.5;
            if self.point_in_solid(start + delta * mid, shape, mask) {
                hi = mid;
            } else {
                lo = mid;
            }
        }

        let fraction = lo;
        let end_position = start + delta * fraction;

        let penetrating = start + delta * hi;
        let push = self.resolve_penetration(penetrating, shape, mask) - penetrating;
        let hit_normal = if push.length_squared() > 1e-8 {
            push.normalize()
        } else {
            let horizontal = Vec3::new(-direction.x, 0.0, -direction.z);
            if horizontal.length_squared() > 0.1 {
                horizontal.normalize()
            } else {
                Vec3::Y
            }
        };

        TraceResult {
            fraction,
            end_position,
            hit_normal: Some(hit_normal),
            hit_contents: ContentFlags::SOLID,
            started_in_solid: start_in_solid,
            all_solid: start_in_solid && fraction < 0.001,
        }
    }

    fn compute_hit_normal(ray: &Ray, toi: f32, brush: &CollisionBrush) -> Vec3 {
        match brush
            .shape
            .cast_ray_and_get_normal(&brush.transform, ray, toi + 0.01, true)
        {
            Some(intersection) => Vec3::new(
                intersection.normal.x,
                intersection.normal.y,
                intersection.normal.z,
            ),
            None => -Vec3::new(ray.dir.x, ray.dir.y, ray.dir.z).normalize_or_zero(),
        }
    }
}

impl WorldQuery for CollisionWorld {
    fn cast_upward(&self, origin: Vec3, max_distance: f32) -> Option<f32> {
        // Start just above the feet so the floor under the body is never reported
        const LIFT: f32 = 0.01;
        let range = (max_distance - LIFT).max(0.0);
        let result = self.raycast(
            origin + Vec3::Y * LIFT,
            Vec3::Y,
            range,
            ContentFlags::MASK_PLAYER_SOLID,
        );
        result
            .hit_something()
            .then(|| result.fraction * range + LIFT)
    }

    fn probe_sphere(&self, origin: Vec3, radius: f32, mask: ContentFlags) -> bool {
        self.point_in_solid(origin, TraceShape::Sphere { radius }, mask)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_world() -> CollisionWorld {
        let mut world = CollisionWorld::new();

        // Floor with its top face at y=0
        world.add_box(
            Vec3::new(0.0, -0.5, 0.0),
            Vec3::new(50.0, 0.5, 50.0),
            ContentFlags::SOLID | ContentFlags::GROUND,
        );

        // Wall at x=10
        world.add_box(
            Vec3::new(10.0, 2.5, 0.0),
            Vec3::new(0.5, 2.5, 10.0),
            ContentFlags::SOLID,
        );

        // Ceiling slab with its underside at y=1.5 over x in [-2, 2]
        world.add_box(
            Vec3::new(0.0, 1.75, -20.0),
            Vec3::new(2.0, 0.25, 2.0),
            ContentFlags::SOLID,
        );

        world
    }

    #[test]
    fn test_raycast_hit() {
        let world = create_test_world();

        let result = world.raycast(Vec3::new(0.0, 1.0, 0.0), Vec3::X, 100.0, ContentFlags::SOLID);

        assert!(result.hit_something());
        // Should hit wall at approximately x=9.5
        assert!((result.end_position.x - 9.5).abs() < 0.01);
        assert!(result.hit_normal.unwrap().x < -0.9);
    }

    #[test]
    fn test_raycast_miss() {
        let world = create_test_world();

        let result = world.raycast(Vec3::new(0.0, 1.0, 0.0), -Vec3::X, 100.0, ContentFlags::SOLID);

        assert!(!result.hit_something());
        assert_eq!(result.fraction, 1.0);
    }

    #[test]
    fn test_raycast_skips_brush_containing_origin() {
        let world = create_test_world();

        // Origin inside the floor, looking up: nothing above except open sky
        let result = world.raycast(Vec3::new(0.0, -0.1, 0.0), Vec3::Y, 10.0, ContentFlags::SOLID);

        assert!(!result.hit_something());
    }

    #[test]
    fn test_trace_capsule_stops_at_wall() {
        let world = create_test_world();

        let shape = TraceShape::Capsule {
            radius: 0.4,
            height: 1.8,
        };

        let result = world.trace(
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(15.0, 1.0, 0.0),
            shape,
            ContentFlags::SOLID,
        );

        assert!(result.hit_something());
        assert!(result.end_position.x < 9.5 - 0.4 + 0.01);
        assert!(result.end_position.x > 9.0);
        assert!(result.normal_or_up().x < -0.9);
    }

    #[test]
    fn test_point_in_solid() {
        let world = create_test_world();

        assert!(world.point_in_solid(Vec3::new(0.0, -0.25, 0.0), TraceShape::Point, ContentFlags::SOLID));
        assert!(!world.point_in_solid(Vec3::new(0.0, 1.0, 0.0), TraceShape::Point, ContentFlags::SOLID));
    }

    #[test]
    fn test_resolve_penetration_pushes_up_out_of_floor() {
        let world = create_test_world();
        let shape = TraceShape::Sphere { radius: 0.5 };

        let resolved = world.resolve_penetration(Vec3::new(0.0, 0.3, 0.0), shape, ContentFlags::SOLID);

        assert!((resolved.y - 0.5).abs() < 0.01);
        assert!(!world.point_in_solid(resolved, shape, ContentFlags::SOLID));
    }

    #[test]
    fn test_capsule_sunk_into_large_floor_is_solid() {
        let world = create_test_world();
        let shape = TraceShape::Capsule {
            radius: 0.5,
            height: 2.0,
        };

        // Bottom of the capsule half a meter into the floor
        assert!(world.point_in_solid(Vec3::new(0.0, 0.5, 0.0), shape, ContentFlags::SOLID));

        let resolved = world.resolve_penetration(Vec3::new(0.0, 0.5, 0.0), shape, ContentFlags::SOLID);
        assert!((resolved.y - 1.0).abs() < 0.01, "y={}", resolved.y);
        assert!(resolved.x.abs() < 1e-4 && resolved.z.abs() < 1e-4);
        assert!(!world.point_in_solid(resolved, shape, ContentFlags::SOLID));
    }

    #[test]
    fn test_resting_capsule_touches_without_overlap() {
        let world = create_test_world();
        let shape = TraceShape::Capsule {
            radius: 0.5,
            height: 2.0,
        };

        assert!(!world.point_in_solid(Vec3::new(0.0, 1.0, 0.0), shape, ContentFlags::SOLID));
        assert!(world.point_in_solid(Vec3::new(0.0, 0.99, 0.0), shape, ContentFlags::SOLID));
    }

    #[test]
    fn test_capsule_trace_stops_on_floor() {
        let world = create_test_world();
        let shape = TraceShape::Capsule {
            radius: 0.5,
            height: 2.0,
        };

        let result = world.trace(
            Vec3::new(0.0, 2.0, 0.0),
            Vec3::new(0.0, 0.5, 0.0),
            shape,
            ContentFlags::SOLID,
        );

        assert!(result.hit_something());
        assert!((result.end_position.y - 1.0).abs() < 0.01, "y={}", result.end_position.y);
        assert!(result.normal_or_up().y > 0.99);
    }

    #[test]
    fn test_content_mask_filtering() {
        let mut world = CollisionWorld::new();

        world.add_box(
            Vec3::new(5.0, 1.0, 0.0),
            Vec3::new(0.5, 1.0, 5.0),
            ContentFlags::SOLID,
        );
        world.add_box(
            Vec3::new(3.0, 1.0, 0.0),
            Vec3::new(0.5, 1.0, 5.0),
            ContentFlags::TRIGGER,
        );

        let result = world.raycast(Vec3::new(0.0, 1.0, 0.0), Vec3::X, 100.0, ContentFlags::SOLID);

        assert!(result.hit_something());
        // Should hit wall at x=4.5, not trigger at x=2.5
        assert!((result.end_position.x - 4.5).abs() < 0.01);
    }

    #[test]
    fn test_cast_upward_reports_ceiling_distance() {
        let world = create_test_world();

        assert_eq!(world.cast_upward(Vec3::new(0.0, 0.0, 0.0), 2.15), None);

        let distance = world
            .cast_upward(Vec3::new(0.0, 0.0, -20.0), 2.15)
            .expect("ceiling above");
        assert!((distance - 1.5).abs() < 0.001);
    }

    #[test]
    fn test_probe_sphere_respects_mask() {
        let world = create_test_world();
        let origin = Vec3::new(0.0, 0.05, 0.0);

        assert!(world.probe_sphere(origin, 0.1, ContentFlags::MASK_GROUND));
        assert!(!world.probe_sphere(origin, 0.1, ContentFlags::TRIGGER));
        assert!(!world.probe_sphere(Vec3::new(0.0, 0.5, 0.0), 0.1, ContentFlags::MASK_GROUND));
    }

    #[test]
    fn test_oriented_box_ramp_is_sloped() {
        let mut world = CollisionWorld::new();
        world.add_oriented_box(
            Vec3::ZERO,
            Vec3::new(2.0, 0.1, 2.0),
            Quat::from_rotation_x(30_f32.to_radians()),
            ContentFlags::SOLID,
        );

        let result = world.raycast(Vec3::new(0.0, 3.0, 0.0), -Vec3::Y, 10.0, ContentFlags::SOLID);
        let normal = result.hit_normal.expect("ramp below");
        assert!((normal.y - 30_f32.to_radians().cos()).abs() < 0.01);
    }
}
