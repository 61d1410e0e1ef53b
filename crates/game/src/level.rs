//! Level geometry and spawn points.

use std::sync::Arc;

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use strider_physics::{CollisionWorld, ContentFlags};

/// Height of the underside of the crawl tunnel ceiling in the test arena.
pub const TUNNEL_CEILING: f32 = 1.5;

/// A level: shared collision geometry plus where players appear.
#[derive(Debug, Clone)]
pub struct Level {
    /// Level identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Collision world shared with the bodies moving through it.
    pub collision: Arc<CollisionWorld>,

    /// Player spawn points.
    pub spawn_points: Vec<SpawnPoint>,
}

/// Where a player appears.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SpawnPoint {
    /// Body base position in world space.
    pub position: Vec3,

    /// Initial yaw in degrees.
    pub facing: f32,
}

impl Level {
    /// Create a level from prebuilt geometry.
    pub fn new(id: &str, name: &str, collision: CollisionWorld) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            collision: Arc::new(collision),
            spawn_points: Vec::new(),
        }
    }

    /// Create a simple test level for development.
    ///
    /// Flat walled floor, a crawl tunnel straight ahead of the spawn (its
    /// mouth 3 m down -Z), a walkable ramp and a too-steep ramp.
    pub fn test_arena() -> Self {
        let mut world = CollisionWorld::new();
        let ground = ContentFlags::SOLID | ContentFlags::GROUND;

        // Floor, top at y = 0
        world.add_box(Vec3::new(0.0, -0.5, 0.0), Vec3::new(50.0, 0.5, 50.0), ground);

        // Perimeter
        let wall_height = 5.0;
        let wall_thickness = 0.5;
        let arena_size = 50.0;
        for (center, half) in [
            (Vec3::new(0.0, 0.0, -arena_size), Vec3::new(arena_size, 0.0, wall_thickness)),
            (Vec3::new(0.0, 0.0, arena_size), Vec3::new(arena_size, 0.0, wall_thickness)),
            (Vec3::new(arena_size, 0.0, 0.0), Vec3::new(wall_thickness, 0.0, arena_size)),
            (Vec3::new(-arena_size, 0.0, 0.0), Vec3::new(wall_thickness, 0.0, arena_size)),
        ] {
            world.add_box(
                center + Vec3::Y * wall_height / 2.0,
                half + Vec3::Y * wall_height / 2.0,
                ContentFlags::SOLID,
            );
        }

        // Crawl tunnel from z = -3 to z = -9, its roof can be stood on
        world.add_box(
            Vec3::new(0.0, TUNNEL_CEILING + 0.25, -6.0),
            Vec3::new(2.5, 0.25, 3.0),
            ground,
        );
        for x in [-2.25, 2.25] {
            world.add_box(
                Vec3::new(x, TUNNEL_CEILING / 2.0, -6.0),
                Vec3::new(0.25, TUNNEL_CEILING / 2.0, 3.0),
                ContentFlags::SOLID,
            );
        }

        // Ramps rising toward +X
        world.add_oriented_box(
            Vec3::new(15.0, 0.0, 10.0),
            Vec3::new(4.0, 0.5, 2.0),
            Quat::from_rotation_z(20f32.to_radians()),
            ground,
        );
        world.add_oriented_box(
            Vec3::new(15.0, 0.0, -10.0),
            Vec3::new(4.0, 0.5, 2.0),
            Quat::from_rotation_z(60f32.to_radians()),
            ground,
        );

        // Cover crates
        world.add_box(Vec3::new(-15.0, 1.0, 10.0), Vec3::new(1.5, 1.0, 1.5), ground);
        world.add_box(Vec3::new(-15.0, 1.0, -10.0), Vec3::new(1.5, 1.0, 1.5), ground);

        let mut level = Self::new("test_arena", "Test Arena", world);
        level.spawn_points.push(SpawnPoint {
            position: Vec3::new(0.0, 0.05, 0.0),
            facing: 0.0,
        });
        level.spawn_points.push(SpawnPoint {
            position: Vec3::new(0.0, 0.05, 20.0),
            facing: 180.0,
        });
        level
    }

    /// Get a player spawn point, wrapping around the list.
    pub fn player_spawn(&self, index: usize) -> Option<SpawnPoint> {
        if self.spawn_points.is_empty() {
            return None;
        }
        self.spawn_points
            .get(index % self.spawn_points.len())
            .copied()
    }
}
