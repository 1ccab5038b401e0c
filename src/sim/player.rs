//! Player controller
//!
//! There is no jump button: touching a platform from above bounces the bunny
//! straight back up, and the arrow keys only steer while it is in the air.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collectibles::CollectibleSpawner;
use super::collision::{Body, CollisionFeed};
use super::state::{Entity, GameEvent, SoundEffect};
use crate::consts::{PLAYER_SPAWN_X, PLAYER_SPAWN_Y};
use crate::settings::Settings;

/// Which texture the renderer should show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VisualState {
    /// Idle / falling pose
    #[default]
    Standing,
    /// Take-off pose, shown from a landing until the bunny starts falling
    Jumping,
}

/// Held directions for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSnapshot {
    pub left: bool,
    pub right: bool,
}

/// The player entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Display size
    pub size: Vec2,
    pub visual: VisualState,
    /// True only while airborne
    pub control_enabled: bool,
}

impl Body for Player {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn extent(&self) -> Vec2 {
        self.size
    }
}

/// Mutable run state the controller needs but does not own
pub struct FrameContext<'a> {
    pub carrots: &'a mut CollectibleSpawner,
    pub score: &'a mut u64,
    pub events: &'a mut Vec<GameEvent>,
}

/// What happened to the player this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerTick {
    pub landed: bool,
    pub collected: bool,
}

#[derive(Debug, Clone)]
pub struct PlayerController {
    pub player: Player,
    /// Previous frame's touch flag, for landing edge detection
    was_touching: bool,
    bounce_velocity: f32,
    steer_speed: f32,
}

impl PlayerController {
    pub fn new(settings: &Settings) -> Self {
        Self {
            player: Player {
                pos: Vec2::new(PLAYER_SPAWN_X, PLAYER_SPAWN_Y),
                vel: Vec2::ZERO,
                size: Vec2::new(settings.player_width, settings.player_height),
                visual: VisualState::Standing,
                control_enabled: true,
            },
            was_touching: false,
            bounce_velocity: settings.bounce_velocity,
            steer_speed: settings.steer_speed,
        }
    }

    /// React to this frame's collision feed and input
    pub fn tick(
        &mut self,
        input: &InputSnapshot,
        feed: &CollisionFeed,
        ctx: FrameContext<'_>,
    ) -> PlayerTick {
        let touching = feed.touching_down;
        let landed = touching && !self.was_touching;
        self.was_touching = touching;

        let player = &mut self.player;

        if landed {
            player.vel.y = self.bounce_velocity;
            player.visual = VisualState::Jumping;
            ctx.events.push(GameEvent::SetVisualState(
                Entity::Player,
                VisualState::Jumping,
            ));
            ctx.events.push(GameEvent::PlaySound(SoundEffect::Jump));
            log::trace!("Bounce at ({}, {})", player.pos.x, player.pos.y);
        }

        // No steering on a contact frame
        player.control_enabled = !touching;

        if player.vel.y > 0.0 && player.visual != VisualState::Standing {
            player.visual = VisualState::Standing;
            ctx.events.push(GameEvent::SetVisualState(
                Entity::Player,
                VisualState::Standing,
            ));
        }

        player.vel.x = if player.control_enabled && input.left {
            -self.steer_speed
        } else if player.control_enabled && input.right {
            self.steer_speed
        } else {
            0.0
        };

        let mut collected = false;
        if let Some(id) = feed.collectible {
            if ctx.carrots.release(id, ctx.events) {
                *ctx.score += 1;
                ctx.events.push(GameEvent::PlaySound(SoundEffect::Collect));
                log::debug!("Carrot {:?} collected, score {}", id, *ctx.score);
                collected = true;
            } else {
                log::warn!("Ignoring overlap with inactive carrot {:?}", id);
            }
        }

        PlayerTick { landed, collected }
    }

    /// Stand-in for the physics step: gravity, then velocity
    pub fn integrate(&mut self, gravity: f32, dt: f32) {
        let player = &mut self.player;
        player.vel.y += gravity * dt;
        player.pos += player.vel * dt;
    }

    /// Wrap the player across the left/right edges of a `game_width` view
    pub fn wrap_horizontal(&mut self, game_width: f32) {
        let half_width = self.player.size.x * 0.5;
        self.player.pos.x = wrap_x(self.player.pos.x, half_width, game_width);
    }
}

/// Leaving past one edge re-enters at the other, so x lives on a cycle of
/// width `game_width + 2 * half_width`
pub fn wrap_x(x: f32, half_width: f32, game_width: f32) -> f32 {
    if x < -half_width {
        game_width + half_width
    } else if x > game_width + half_width {
        -half_width
    } else {
        x
    }
}
