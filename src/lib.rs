//! Bunny Jump - An endless vertical bouncing platformer
//!
//! Core modules:
//! - `sim`: Deterministic per-frame simulation (platforms, player, carrots, camera)
//! - `settings`: Validated, serializable run configuration
//!
//! Rendering, audio playback and input polling live outside this crate. The
//! simulation consumes an input snapshot plus a collision feed each frame and
//! queues fire-and-forget [`sim::GameEvent`]s for the host.

pub mod settings;
pub mod sim;

pub use settings::{ConfigError, Settings, Viewport};

/// Game configuration constants
pub mod consts {
    /// Default frame timestep for hosts that integrate motion themselves
    pub const FRAME_DT: f32 = 1.0 / 60.0;

    /// Viewport dimensions (portrait phone-ish layout)
    pub const VIEWPORT_WIDTH: f32 = 480.0;
    pub const VIEWPORT_HEIGHT: f32 = 640.0;

    /// Number of platforms alive for the whole run
    pub const PLATFORM_COUNT: usize = 5;
    /// Vertical spacing of the initial platform stack
    pub const INITIAL_PLATFORM_SPACING: f32 = 150.0;
    /// Horizontal spawn bounds for platforms
    pub const PLATFORM_X_MIN: i32 = 80;
    pub const PLATFORM_X_MAX: i32 = 400;
    /// A platform this far below the top of the view gets recycled
    pub const RECYCLE_MARGIN: f32 = 700.0;
    /// Gap range above the view for recycled platforms (basic variant)
    pub const GAP_MIN: i32 = 50;
    pub const GAP_MAX: i32 = 100;
    /// Tighter gap range when carrots are in play, so jumps stay reachable
    pub const CARROT_GAP_MAX: i32 = 75;

    /// Platform art is 380x94, drawn at half scale
    pub const PLATFORM_SCALE: f32 = 0.5;
    pub const PLATFORM_TEXTURE_WIDTH: f32 = 380.0;
    pub const PLATFORM_TEXTURE_HEIGHT: f32 = 94.0;

    /// Player spawn point
    pub const PLAYER_SPAWN_X: f32 = 240.0;
    pub const PLAYER_SPAWN_Y: f32 = 320.0;
    /// Bunny art is 120x191, drawn at half scale
    pub const PLAYER_WIDTH: f32 = 60.0;
    pub const PLAYER_HEIGHT: f32 = 95.5;

    /// Upward impulse applied on every landing (negative y is up)
    pub const BOUNCE_VELOCITY: f32 = -300.0;
    /// Air steering speed
    pub const STEER_SPEED: f32 = 200.0;
    /// Downward acceleration, world units/s²
    pub const GRAVITY: f32 = 200.0;

    /// Carrot display (and collision) extent
    pub const CARROT_WIDTH: f32 = 48.0;
    pub const CARROT_HEIGHT: f32 = 50.0;

    /// Falling this far below the lowest platform ends the run
    pub const FALL_LIMIT: f32 = 200.0;

    /// Horizontal camera deadzone as a multiple of the viewport width
    pub const DEADZONE_FACTOR: f32 = 1.5;
}
