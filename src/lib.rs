//! Power Pong - two-player Pong with powerups
//!
//! Core modules:
//! - `sim`: Simulation (ball physics, continuous collision, powerups, match flow)
//! - `audio`: Sound cue selection and volume mixing over a pluggable sink
//! - `renderer`: Drawing the match through a pluggable canvas
//! - `platform`: Input sources (keyboard, serial controller)
//! - `settings`: Data-driven match tuning and audio preferences

pub mod audio;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{ConfigError, InputError};
pub use settings::{MatchConfig, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Target simulation rate (ticks per second)
    pub const FRAME_RATE: u32 = 60;

    /// Default play-field dimensions
    pub const FIELD_WIDTH: f32 = 1280.0;
    pub const FIELD_HEIGHT: f32 = 720.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 20.0;
    pub const BALL_INITIAL_SPEED: f32 = 10.0;
    pub const BALL_SPEED_LIMIT: f32 = 25.0;
    pub const BALL_STEERING_ACCEL: f32 = 1.0;
    /// Headings within this many degrees of horizontal are left alone by steering
    pub const STEERING_ANGLE_LIMIT: f32 = 75.0;
    /// Degrees of rotation applied per tick while steering
    pub const STEERING_RATE: f32 = 1.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 20.0;
    pub const PADDLE_HEIGHT: f32 = 150.0;
    /// Distance of the paddle centre from its side wall
    pub const PADDLE_INSET: f32 = 75.0;
    pub const PADDLE_SHIFT_MULTIPLIER: f32 = 2.0;
    pub const PADDLE_SPEED_LIMIT: f32 = 8.0 * PADDLE_SHIFT_MULTIPLIER;
    pub const PADDLE_FRICTION: f32 = 0.5;
    pub const PADDLE_FORCE_TRANSFER: f32 = 0.8;

    /// Match rules
    pub const WINNING_SCORE: u32 = 11;
    /// Serve heading jitter (degrees, either side)
    pub const SERVE_JITTER: f32 = 30.0;

    /// Powerup scheduling
    pub const POWERUP_RADIUS: f32 = 30.0;
    pub const POWERUP_INTERVAL: u32 = 600;
    pub const POWERUP_INTERVAL_VARIATION: u32 = 120;
    pub const PROBABILITY_DECAY: f32 = 0.3;
    /// Ticks spent growing/shrinking for resize effects
    pub const RESIZE_TRANSITION: u32 = 60;

    /// Audio cue variants
    pub const BOUNCE_VARIANTS: u8 = 5;
    pub const VICTORY_THEMES: usize = 4;
    /// Chance of the special victory theme
    pub const SPECIAL_THEME_CHANCE: f32 = 0.05;

    /// Smallest mass a body can have (one rounding step)
    pub const MIN_MASS: f32 = 0.1;

    /// Upper bound on sub-steps per continuous-collision walk
    pub const MAX_WALK_STEPS: u32 = 256;
}

/// Normalize a heading in degrees to [0°, 180°), folding the lower half-plane up
#[inline]
pub fn normalize_heading(mut degrees: f32) -> f32 {
    if degrees < 0.0 {
        degrees += 180.0;
    }
    if degrees >= 180.0 {
        degrees -= 180.0;
    }
    degrees
}

/// Unit vector at `degrees`, scaled to `magnitude`
#[inline]
pub fn from_angle_deg(degrees: f32, magnitude: f32) -> Vec2 {
    Vec2::from_angle(degrees.to_radians()) * magnitude
}

/// Mass of a disc of the given radius, rounded to one decimal place.
/// Never below [`consts::MIN_MASS`], so tiny discs can still be pushed.
#[inline]
pub fn disc_mass(radius: f32) -> f32 {
    let mass = (radius * radius * std::f32::consts::PI / 100.0 * 10.0).round() / 10.0;
    mass.max(consts::MIN_MASS)
}
