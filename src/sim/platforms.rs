//! Platform pool and recycling
//!
//! A fixed set of platforms is created once. When one scrolls far enough below
//! the camera it is moved to a fresh spot just above the view instead of being
//! destroyed, so the pool never grows or shrinks.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collectibles::CollectibleId;
use super::collision::Body;
use super::rng::RangeSampler;
use crate::consts::{INITIAL_PLATFORM_SPACING, PLATFORM_SCALE};
use crate::settings::Settings;

/// A platform entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    /// Slot index in the pool, stable for the whole run
    pub id: usize,
    pub pos: Vec2,
    /// Horizontal spawn bounds (inclusive)
    pub x_range: (i32, i32),
    pub scale: f32,
    /// Display size (already scaled), also the collision extent
    pub size: Vec2,
    /// Carrot last spawned above this platform. Weak: the carrot may have
    /// been collected or reused since.
    pub carrot: Option<CollectibleId>,
}

impl Body for Platform {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn extent(&self) -> Vec2 {
        self.size
    }
}

/// Emitted once per platform moved by [`PlatformPool::tick`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecycleEvent {
    pub platform: usize,
}

/// Fixed-size platform collection
#[derive(Debug, Clone)]
pub struct PlatformPool {
    platforms: Vec<Platform>,
    gap: (i32, i32),
    margin: f32,
}

impl PlatformPool {
    /// Stack `platform_count` platforms 150 units apart, starting at y = 0,
    /// each at a random x. Settings must already be validated.
    pub fn new(settings: &Settings, rng: &mut impl RangeSampler) -> Self {
        let x_range = (settings.platform_x_min, settings.platform_x_max);
        let size = Vec2::new(settings.platform_width, settings.platform_height);

        let platforms = (0..settings.platform_count)
            .map(|id| {
                let x = rng.between(x_range.0, x_range.1) as f32;
                let y = INITIAL_PLATFORM_SPACING * id as f32;
                Platform {
                    id,
                    pos: Vec2::new(x, y),
                    x_range,
                    scale: PLATFORM_SCALE,
                    size,
                    carrot: None,
                }
            })
            .collect();

        Self {
            platforms,
            gap: (settings.gap_min, settings.gap_max),
            margin: settings.recycle_margin,
        }
    }

    /// Recycle every platform at or below `scroll_y + margin`
    pub fn tick(&mut self, scroll_y: f32, rng: &mut impl RangeSampler) -> Vec<RecycleEvent> {
        let threshold = self.recycle_threshold(scroll_y);
        let mut recycled = Vec::new();

        for platform in &mut self.platforms {
            if platform.pos.y < threshold {
                continue;
            }
            let (x_min, x_max) = platform.x_range;
            platform.pos.x = rng.between(x_min, x_max) as f32;
            platform.pos.y = scroll_y - rng.between(self.gap.0, self.gap.1) as f32;
            log::debug!(
                "Recycled platform {} to ({}, {})",
                platform.id,
                platform.pos.x,
                platform.pos.y
            );
            recycled.push(RecycleEvent {
                platform: platform.id,
            });
        }

        recycled
    }

    /// Anything at or below this y is off-screen and due for reuse
    pub fn recycle_threshold(&self, scroll_y: f32) -> f32 {
        scroll_y + self.margin
    }

    /// The lowest platform on screen (greatest y). The first one found wins
    /// an exact tie.
    pub fn bottom_most(&self) -> &Platform {
        let mut bottom = &self.platforms[0];
        for platform in &self.platforms[1..] {
            if platform.pos.y > bottom.pos.y {
                bottom = platform;
            }
        }
        bottom
    }

    pub fn platforms(&self) -> &[Platform] {
        &self.platforms
    }

    pub fn get(&self, id: usize) -> Option<&Platform> {
        self.platforms.get(id)
    }

    pub fn get_mut(&mut self, id: usize) -> Option<&mut Platform> {
        self.platforms.get_mut(id)
    }

    /// The platform a [`RecycleEvent`] from this pool refers to. Events only
    /// carry slot ids the pool issued, and slots are never removed.
    pub fn recycled_mut(&mut self, event: RecycleEvent) -> &mut Platform {
        &mut self.platforms[event.platform]
    }

    pub fn len(&self) -> usize {
        self.platforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn set_heights(&mut self, ys: &[f32]) {
        for (platform, &y) in self.platforms.iter_mut().zip(ys) {
            platform.pos.y = y;
        }
    }
}
