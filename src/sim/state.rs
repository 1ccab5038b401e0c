//! Run state and the events it emits
//!
//! `GameState` owns every entity of a run. Nothing outside the frame loop
//! mutates it; the host only reads snapshots and drains events.

use glam::Vec2;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::camera::CameraRig;
use super::collectibles::{CollectibleId, CollectibleSpawner};
use super::player::{PlayerController, VisualState};
use super::platforms::PlatformPool;
use super::rng::RngState;
use crate::settings::{ConfigError, Settings};

/// Outcome of a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    Continue,
    /// Terminal: the run never resumes
    GameOver,
}

/// Sounds the host should play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Bounce off a platform
    Jump,
    /// Carrot eaten
    Collect,
}

impl SoundEffect {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundEffect::Jump => "jump",
            SoundEffect::Collect => "collect",
        }
    }
}

/// Target of a visual-state request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Entity {
    Player,
}

/// Fire-and-forget requests for the host, in emission order
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PlaySound(SoundEffect),
    /// Swap an entity's texture
    SetVisualState(Entity, VisualState),
    /// Register a carrot body with the collision system
    BodyEnabled(CollectibleId),
    /// Remove a carrot body from the collision system
    BodyDisabled(CollectibleId),
    /// Emitted once, on the frame the run ends
    RunEnded { score: u64 },
}

/// Read-only view for rendering
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub frame: u64,
    pub score: u64,
    pub status: RunStatus,
    pub player: Vec2,
    pub player_visual: VisualState,
    pub scroll_y: f32,
    pub platforms: Vec<Vec2>,
    pub carrots: Vec<Vec2>,
}

/// Complete state of one run
#[derive(Debug, Clone)]
pub struct GameState {
    pub settings: Settings,
    pub rng_state: RngState,
    pub(crate) rng: Pcg32,
    pub platforms: PlatformPool,
    pub carrots: CollectibleSpawner,
    pub player: PlayerController,
    pub camera: CameraRig,
    /// Carrots eaten this run
    pub score: u64,
    pub status: RunStatus,
    /// Ticks processed
    pub frame: u64,
    /// Pending side effects, drained by the host
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Validate `settings` and lay out a fresh run
    pub fn new(settings: Settings) -> Result<Self, ConfigError> {
        settings.validate()?;

        let rng_state = RngState::new(settings.seed);
        let mut rng = rng_state.to_rng();
        let platforms = PlatformPool::new(&settings, &mut rng);
        let carrot_slots = if settings.carrots_enabled {
            settings.carrot_pool_size
        } else {
            0
        };
        let carrots = CollectibleSpawner::new(
            carrot_slots,
            Vec2::new(settings.carrot_width, settings.carrot_height),
        );
        let player = PlayerController::new(&settings);
        let camera = CameraRig::new(settings.viewport, settings.deadzone_width, &player.player);

        log::info!(
            "New run: seed {:#x}, {} platforms, carrots {}",
            settings.seed,
            platforms.len(),
            if settings.carrots_enabled { "on" } else { "off" }
        );

        Ok(Self {
            settings,
            rng_state,
            rng,
            platforms,
            carrots,
            player,
            camera,
            score: 0,
            status: RunStatus::Continue,
            frame: 0,
            events: Vec::new(),
        })
    }

    /// Physics stand-in: move the player by gravity and velocity over `dt`.
    /// Hosts call this before computing the next collision feed.
    pub fn advance(&mut self, dt: f32) {
        if self.status == RunStatus::GameOver {
            return;
        }
        self.player.integrate(self.settings.gravity, dt);
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_over(&self) -> bool {
        self.status == RunStatus::GameOver
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            frame: self.frame,
            score: self.score,
            status: self.status,
            player: self.player.player.pos,
            player_visual: self.player.player.visual,
            scroll_y: self.camera.scroll_y(),
            platforms: self.platforms.platforms().iter().map(|p| p.pos).collect(),
            carrots: self.carrots.active().map(|(_, c)| c.pos).collect(),
        }
    }
}
