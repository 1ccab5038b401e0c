//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (by slot index)
//! - No rendering, audio or input-device dependencies
//! - No allocation of entities after a run starts

pub mod camera;
pub mod collectibles;
pub mod collision;
pub mod error;
pub mod platforms;
pub mod player;
pub mod rng;
pub mod state;
pub mod tick;

pub use camera::CameraRig;
pub use collectibles::{Collectible, CollectibleId, CollectibleSpawner};
pub use collision::{Aabb, Body, CollisionFeed, detect_contacts};
pub use error::SimError;
pub use platforms::{Platform, PlatformPool, RecycleEvent};
pub use player::{FrameContext, InputSnapshot, Player, PlayerController, VisualState, wrap_x};
pub use rng::{RangeSampler, RngState};
pub use state::{Entity, GameEvent, GameState, RunStatus, Snapshot, SoundEffect};
pub use tick::{TickInput, is_game_over, tick};
