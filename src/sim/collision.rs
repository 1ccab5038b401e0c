//! Collision feed and reference detector
//!
//! The simulation never resolves collisions itself. Each frame it is handed a
//! [`CollisionFeed`] describing what the physics layer saw, and only reacts to
//! it. [`detect_contacts`] is a small AABB version of that layer for the
//! headless runner and tests.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collectibles::CollectibleId;
use super::state::GameState;

/// Axis-aligned box, `min` is the top-left corner (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Strict overlap: boxes that only share an edge do not count
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    pub fn overlaps_x(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x && self.max.x > other.min.x
    }

    pub fn top(&self) -> f32 {
        self.min.y
    }

    pub fn bottom(&self) -> f32 {
        self.max.y
    }
}

/// Anything the collision layer can see: a center position and an extent
pub trait Body {
    fn position(&self) -> Vec2;
    fn extent(&self) -> Vec2;

    fn aabb(&self) -> Aabb {
        Aabb::from_center(self.position(), self.extent())
    }
}

/// What the physics layer reports for the player this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CollisionFeed {
    /// Player is resting on a platform from above
    pub touching_down: bool,
    /// Carrot the player overlaps, if any
    pub collectible: Option<CollectibleId>,
}

impl CollisionFeed {
    pub fn landing() -> Self {
        Self {
            touching_down: true,
            collectible: None,
        }
    }

    pub fn overlapping(id: CollectibleId) -> Self {
        Self {
            touching_down: false,
            collectible: Some(id),
        }
    }
}

/// Compute a feed from current positions.
///
/// Platforms are one-way: only checked against the player's feet while it is
/// falling, and only within the top half of the platform. Carrots are checked
/// against the full player box; the first active overlap wins.
pub fn detect_contacts(state: &GameState) -> CollisionFeed {
    let player = &state.player.player;
    let player_box = player.aabb();

    let touching_down = player.vel.y >= 0.0
        && state.platforms.platforms().iter().any(|platform| {
            let platform_box = platform.aabb();
            let band = platform.size.y * 0.5;
            player_box.overlaps_x(&platform_box)
                && player_box.bottom() >= platform_box.top()
                && player_box.bottom() <= platform_box.top() + band
        });

    let collectible = state
        .carrots
        .active()
        .find(|(_, carrot)| carrot.aabb().overlaps(&player_box))
        .map(|(id, _)| id);

    CollisionFeed {
        touching_down,
        collectible,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_overlap() {
        let a = Aabb::from_center(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Aabb::from_center(Vec2::new(8.0, 8.0), Vec2::new(10.0, 10.0));
        let c = Aabb::from_center(Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0));
        assert!(a.overlaps(&b));
        // Touching edges only
        assert!(!a.overlaps(&c));
        assert_eq!(a.top(), -5.0);
        assert_eq!(a.bottom(), 5.0);
    }

    #[test]
    fn test_detects_landing() {
        let mut state = GameState::new(crate::Settings::basic()).unwrap();
        let platform = state.platforms.platforms()[0].clone();
        let player = &mut state.player.player;

        // Feet just inside the platform's top edge, falling
        player.pos = Vec2::new(
            platform.pos.x,
            platform.aabb().top() - player.size.y * 0.5 + 2.0,
        );
        player.vel = Vec2::new(0.0, 50.0);
        assert!(detect_contacts(&state).touching_down);

        // Rising through the platform does not count
        state.player.player.vel.y = -300.0;
        assert!(!detect_contacts(&state).touching_down);
    }

    #[test]
    fn test_far_platforms_ignored() {
        let mut state = GameState::new(crate::Settings::basic()).unwrap();
        state.player.player.pos = Vec2::new(-500.0, -5000.0);
        state.player.player.vel = Vec2::new(0.0, 100.0);
        assert_eq!(detect_contacts(&state), CollisionFeed::default());
    }
}
