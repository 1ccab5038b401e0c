//! Run settings
//!
//! Everything tunable about a run, validated up front so a bad configuration
//! is rejected before any entity exists.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Configuration errors, reported by [`Settings::validate`]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("gap range is inverted: min {min} > max {max}")]
    InvalidGapRange { min: i32, max: i32 },
    #[error("gap range must be positive, got min {0}")]
    NonPositiveGap(i32),
    #[error("platform x range is inverted: min {min} > max {max}")]
    InvalidSpawnRange { min: i32, max: i32 },
    #[error("platform pool must hold at least one platform")]
    EmptyPlatformPool,
    #[error("carrot pool holds {pool} slots but {platforms} platforms can spawn carrots")]
    CarrotPoolTooSmall { pool: usize, platforms: usize },
    #[error("viewport must be positive, got {width}x{height}")]
    InvalidViewport { width: f32, height: f32 },
    #[error("deadzone width {deadzone} is narrower than the viewport ({viewport})")]
    DeadzoneTooNarrow { deadzone: f32, viewport: f32 },
    #[error("{0} size must be positive")]
    InvalidSize(&'static str),
    #[error("{0} must be a finite number")]
    NonFinite(&'static str),
    #[error("recycle margin {margin} would recycle platforms still on screen (view height {height})")]
    MarginTooSmall { margin: f32, height: f32 },
    #[error("fall limit must not be negative, got {0}")]
    NegativeFallLimit(f32),
    #[error("bounce velocity must point up (negative), got {0}")]
    BounceNotUpward(f32),
    #[error("steer speed must not be negative, got {0}")]
    NegativeSteerSpeed(f32),
    #[error("malformed settings: {0}")]
    Parse(String),
    #[error("could not encode settings: {0}")]
    Encode(String),
}

/// Visible window size in world units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: VIEWPORT_WIDTH,
            height: VIEWPORT_HEIGHT,
        }
    }
}

/// Run configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// RNG seed for platform layout
    pub seed: u64,
    pub viewport: Viewport,
    /// Horizontal camera deadzone; at least the viewport width
    pub deadzone_width: f32,

    // === Platforms ===
    pub platform_count: usize,
    pub platform_x_min: i32,
    pub platform_x_max: i32,
    pub gap_min: i32,
    pub gap_max: i32,
    pub recycle_margin: f32,
    /// Platform display size after scaling
    pub platform_width: f32,
    pub platform_height: f32,

    // === Carrots ===
    pub carrots_enabled: bool,
    pub carrot_pool_size: usize,
    pub carrot_width: f32,
    pub carrot_height: f32,

    // === Player ===
    pub player_width: f32,
    pub player_height: f32,
    pub bounce_velocity: f32,
    pub steer_speed: f32,
    pub gravity: f32,
    pub fall_limit: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 0x5eed_b0b0,
            viewport: Viewport::default(),
            deadzone_width: VIEWPORT_WIDTH * DEADZONE_FACTOR,

            platform_count: PLATFORM_COUNT,
            platform_x_min: PLATFORM_X_MIN,
            platform_x_max: PLATFORM_X_MAX,
            gap_min: GAP_MIN,
            gap_max: CARROT_GAP_MAX,
            recycle_margin: RECYCLE_MARGIN,
            platform_width: PLATFORM_TEXTURE_WIDTH * PLATFORM_SCALE,
            platform_height: PLATFORM_TEXTURE_HEIGHT * PLATFORM_SCALE,

            carrots_enabled: true,
            carrot_pool_size: PLATFORM_COUNT,
            carrot_width: CARROT_WIDTH,
            carrot_height: CARROT_HEIGHT,

            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            bounce_velocity: BOUNCE_VELOCITY,
            steer_speed: STEER_SPEED,
            gravity: GRAVITY,
            fall_limit: FALL_LIMIT,
        }
    }
}

impl Settings {
    /// Platforms only, with the wider gap range
    pub fn basic() -> Self {
        Self {
            carrots_enabled: false,
            gap_max: GAP_MAX,
            ..Self::default()
        }
    }

    /// Same settings with another seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check every invariant the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.gap_min > self.gap_max {
            return Err(ConfigError::InvalidGapRange {
                min: self.gap_min,
                max: self.gap_max,
            });
        }
        if self.gap_min <= 0 {
            return Err(ConfigError::NonPositiveGap(self.gap_min));
        }
        if self.platform_x_min > self.platform_x_max {
            return Err(ConfigError::InvalidSpawnRange {
                min: self.platform_x_min,
                max: self.platform_x_max,
            });
        }
        if self.platform_count == 0 {
            return Err(ConfigError::EmptyPlatformPool);
        }
        if self.carrots_enabled && self.carrot_pool_size < self.platform_count {
            return Err(ConfigError::CarrotPoolTooSmall {
                pool: self.carrot_pool_size,
                platforms: self.platform_count,
            });
        }
        for (name, value) in [
            ("viewport width", self.viewport.width),
            ("viewport height", self.viewport.height),
            ("deadzone width", self.deadzone_width),
            ("recycle margin", self.recycle_margin),
            ("fall limit", self.fall_limit),
            ("gravity", self.gravity),
            ("bounce velocity", self.bounce_velocity),
            ("steer speed", self.steer_speed),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite(name));
            }
        }
        let Viewport { width, height } = self.viewport;
        if !(width > 0.0 && height > 0.0) {
            return Err(ConfigError::InvalidViewport { width, height });
        }
        if self.deadzone_width < width {
            return Err(ConfigError::DeadzoneTooNarrow {
                deadzone: self.deadzone_width,
                viewport: width,
            });
        }
        if self.recycle_margin <= height {
            return Err(ConfigError::MarginTooSmall {
                margin: self.recycle_margin,
                height,
            });
        }
        if self.fall_limit < 0.0 {
            return Err(ConfigError::NegativeFallLimit(self.fall_limit));
        }
        if self.bounce_velocity >= 0.0 {
            return Err(ConfigError::BounceNotUpward(self.bounce_velocity));
        }
        if self.steer_speed < 0.0 {
            return Err(ConfigError::NegativeSteerSpeed(self.steer_speed));
        }
        for (name, w, h) in [
            ("platform", self.platform_width, self.platform_height),
            ("player", self.player_width, self.player_height),
            ("carrot", self.carrot_width, self.carrot_height),
        ] {
            if !(w > 0.0 && h > 0.0) {
                return Err(ConfigError::InvalidSize(name));
            }
        }
        Ok(())
    }

    /// Parse and validate settings from JSON (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        settings.validate()?;
        log::info!("Loaded settings (seed {:#x})", settings.seed);
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Encode(e.to_string()))
    }
}
