//! Content classification for collision filtering.
//!
//! Every brush in the world carries a set of content flags. Queries take a
//! mask and only consider brushes whose contents intersect it, which is how
//! the ground sensor restricts its sphere probe to walkable geometry.

use serde::{Deserialize, Serialize};

/// Content flags describe what kind of volume a brush is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ContentFlags(pub u32);

impl ContentFlags {
    /// Empty space - nothing here.
    pub const EMPTY: Self = Self(0);

    /// Solid world geometry - walls, ceilings, props.
    pub const SOLID: Self = Self(1 << 0);

    /// Walkable ground. Solid for movement, and the classification the
    /// sphere ground probe looks for.
    pub const GROUND: Self = Self(1 << 1);

    /// Player clip - blocks the character but nothing else.
    pub const PLAYER_CLIP: Self = Self(1 << 2);

    /// Trigger volume - never blocks movement.
    pub const TRIGGER: Self = Self(1 << 3);

    /// The controlled character itself. Queries issued on its behalf leave
    /// this bit out of their mask so the body never hits its own collider.
    pub const PLAYER_BODY: Self = Self(1 << 4);

    /// Everything the character collides with while moving.
    pub const MASK_PLAYER_SOLID: Self =
        Self(Self::SOLID.0 | Self::GROUND.0 | Self::PLAYER_CLIP.0);

    /// Geometry that counts as ground for the sphere probe.
    pub const MASK_GROUND: Self = Self::GROUND;

    /// Check if these flags contain a specific flag.
    #[inline]
    pub fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Check if any of the given flags are set.
    #[inline]
    pub fn intersects(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }

    /// Remove flags from this set.
    #[inline]
    pub fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }
}

impl std::ops::BitOr for ContentFlags {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitAnd for ContentFlags {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}
