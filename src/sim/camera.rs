//! Camera rig
//!
//! Hard vertical follow, horizontal deadzone. `scroll_*` is the top-left of the
//! visible window in world space.

use serde::{Deserialize, Serialize};

use super::collision::Body;
use crate::settings::Viewport;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraRig {
    scroll_x: f32,
    scroll_y: f32,
    viewport: Viewport,
    deadzone_width: f32,
}

impl CameraRig {
    /// Camera pinned at x = 0, vertically centered on `target`
    pub fn new(viewport: Viewport, deadzone_width: f32, target: &impl Body) -> Self {
        let mut camera = Self {
            scroll_x: 0.0,
            scroll_y: 0.0,
            viewport,
            deadzone_width,
        };
        camera.follow(target);
        camera
    }

    pub fn follow(&mut self, target: &impl Body) {
        let pos = target.position();
        self.scroll_y = pos.y - self.viewport.height * 0.5;

        let center_x = self.scroll_x + self.viewport.width * 0.5;
        let half_zone = self.deadzone_width * 0.5;
        if pos.x < center_x - half_zone {
            self.scroll_x = pos.x + half_zone - self.viewport.width * 0.5;
        } else if pos.x > center_x + half_zone {
            self.scroll_x = pos.x - half_zone - self.viewport.width * 0.5;
        }
    }

    pub fn scroll_x(&self) -> f32 {
        self.scroll_x
    }

    pub fn scroll_y(&self) -> f32 {
        self.scroll_y
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn deadzone_width(&self) -> f32 {
        self.deadzone_width
    }
}
