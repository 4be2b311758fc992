//! Game settings and match tuning
//!
//! Loaded from a JSON file on native builds; every field has a default so a
//! partial file only overrides what it names.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Ball tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BallTuning {
    pub radius: f32,
    /// Serve speed
    pub initial_speed: f32,
    pub speed_limit: f32,
    /// Magnitude of the self-steering force
    pub steering_accel: f32,
}

impl Default for BallTuning {
    fn default() -> Self {
        Self {
            radius: BALL_RADIUS,
            initial_speed: BALL_INITIAL_SPEED,
            speed_limit: BALL_SPEED_LIMIT,
            steering_accel: BALL_STEERING_ACCEL,
        }
    }
}

/// Paddle tuning (shared by both sides)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PaddleTuning {
    pub width: f32,
    pub height: f32,
    /// Distance of the paddle centre from its own side wall
    pub inset: f32,
    pub speed_limit: f32,
    pub shift_multiplier: f32,
    /// Share of the paddle's tangential velocity handed to the ball on contact
    pub friction: f32,
    pub force_transfer: f32,
    /// Scale the normal push by `force_transfer` (off: the push is added unscaled)
    pub scale_normal_transfer: bool,
}

impl Default for PaddleTuning {
    fn default() -> Self {
        Self {
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
            inset: PADDLE_INSET,
            speed_limit: PADDLE_SPEED_LIMIT,
            shift_multiplier: PADDLE_SHIFT_MULTIPLIER,
            friction: PADDLE_FRICTION,
            force_transfer: PADDLE_FORCE_TRANSFER,
            scale_normal_transfer: false,
        }
    }
}

/// Powerup scheduler tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerTuning {
    pub enabled: bool,
    /// Average ticks between a powerup ending and the next spawn
    pub average_interval: u32,
    /// Interval jitter (ticks, either side)
    pub interval_variation: u32,
    /// Multiplier applied to a powerup's spawn probability each time it is picked
    pub probability_decay: f32,
    /// Spawn box as fractions of the field, min corner
    pub spawn_min: Vec2,
    /// Spawn box as fractions of the field, max corner
    pub spawn_max: Vec2,
    pub powerup_radius: f32,
}

impl Default for SchedulerTuning {
    fn default() -> Self {
        Self {
            enabled: true,
            average_interval: POWERUP_INTERVAL,
            interval_variation: POWERUP_INTERVAL_VARIATION,
            probability_decay: PROBABILITY_DECAY,
            spawn_min: Vec2::new(1.0 / 5.0, 1.0 / 10.0),
            spawn_max: Vec2::new(4.0 / 5.0, 9.0 / 10.0),
            powerup_radius: POWERUP_RADIUS,
        }
    }
}

/// Everything needed to set up a match
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub field_width: f32,
    pub field_height: f32,
    pub winning_score: u32,
    /// Serve heading jitter in degrees
    pub serve_jitter: f32,
    /// RNG seed (0 = derive from the clock)
    pub seed: u64,
    pub ball: BallTuning,
    pub paddle: PaddleTuning,
    pub powerups: SchedulerTuning,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            winning_score: WINNING_SCORE,
            serve_jitter: SERVE_JITTER,
            seed: 0,
            ball: BallTuning::default(),
            paddle: PaddleTuning::default(),
            powerups: SchedulerTuning::default(),
        }
    }
}

impl MatchConfig {
    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.field_width > 0.0 && self.field_height > 0.0) {
            return Err(ConfigError::invalid(
                "field_width/field_height",
                format!("must be positive, got {}x{}", self.field_width, self.field_height),
            ));
        }
        if !(self.ball.radius > 0.0) {
            return Err(ConfigError::invalid(
                "ball.radius",
                format!("must be positive, got {}", self.ball.radius),
            ));
        }
        if self.winning_score == 0 {
            return Err(ConfigError::invalid("winning_score", "must be at least 1"));
        }
        let decay = self.powerups.probability_decay;
        if !(decay > 0.0 && decay < 1.0) {
            return Err(ConfigError::invalid(
                "powerups.probability_decay",
                format!("must be in (0, 1), got {decay}"),
            ));
        }
        if self.powerups.interval_variation > self.powerups.average_interval {
            return Err(ConfigError::invalid(
                "powerups.interval_variation",
                "must not exceed average_interval",
            ));
        }
        Ok(())
    }

    /// Field centre
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.field_width / 2.0, self.field_height / 2.0)
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,

    // === Match ===
    #[serde(rename = "match")]
    pub match_config: MatchConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
            match_config: MatchConfig::default(),
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.clamp_volumes();
        settings.match_config.validate()?;
        Ok(settings)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults when the file is missing or bad
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Using default settings ({e})");
                Self::default()
            }
        }
    }

    /// Write settings to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        std::fs::write(path.as_ref(), self.to_json()?)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }

    fn clamp_volumes(&mut self) {
        for (name, vol) in [
            ("master_volume", &mut self.master_volume),
            ("sfx_volume", &mut self.sfx_volume),
            ("music_volume", &mut self.music_volume),
        ] {
            if !(0.0..=1.0).contains(&*vol) {
                log::warn!("{name} {vol} out of range, clamping");
                *vol = vol.clamp(0.0, 1.0);
            }
        }
    }
}
