//! Player paddles

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::vector::VecExt;
use crate::settings::PaddleTuning;

/// Which player a paddle (or point, or serve) belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Player number as shown to players (1 = left, 2 = right)
    pub fn number(self) -> u8 {
        match self {
            Side::Left => 1,
            Side::Right => 2,
        }
    }

    pub fn opponent(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Index into per-side arrays
    pub fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }
}

/// Directional state for one paddle, sampled once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaddleInput {
    pub up: bool,
    pub down: bool,
    /// Shift/boost modifier
    pub boost: bool,
}

impl PaddleInput {
    /// -1 for up, +1 for down, 0 when neither or both are held
    pub fn direction(&self) -> f32 {
        match (self.up, self.down) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

/// A player's paddle (axis-aligned rectangle, anchored at its centre)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub side: Side,
    pub pos: Vec2,
    pub vel: Vec2,
    pub width: f32,
    pub height: f32,
    /// Top speed; a negative value reverses the controls
    pub speed_limit: f32,
    pub shift_multiplier: f32,
    pub friction: f32,
    pub force_transfer: f32,
    pub scale_normal_transfer: bool,
    initial_pos: Vec2,
}

impl Paddle {
    /// Create a paddle on `side` of a `field` sized play area
    pub fn new(side: Side, tuning: &PaddleTuning, field: Vec2) -> Self {
        let x = match side {
            Side::Left => tuning.inset,
            Side::Right => field.x - tuning.inset,
        };
        let pos = Vec2::new(x, field.y / 2.0);
        Self {
            side,
            pos,
            vel: Vec2::ZERO,
            width: tuning.width,
            height: tuning.height,
            speed_limit: tuning.speed_limit,
            shift_multiplier: tuning.shift_multiplier,
            friction: tuning.friction,
            force_transfer: tuning.force_transfer,
            scale_normal_transfer: tuning.scale_normal_transfer,
            initial_pos: pos,
        }
    }

    /// Set velocity from input. Normal speed is `speed_limit / shift_multiplier`;
    /// boosting brings it up to the full limit.
    pub fn steer(&mut self, input: &PaddleInput) {
        let multiplier = if self.shift_multiplier > 0.0 {
            self.shift_multiplier
        } else {
            1.0
        };
        let mut speed = self.speed_limit / multiplier * input.direction();
        if input.boost {
            speed *= multiplier;
        }
        self.vel = Vec2::new(0.0, speed);
    }

    /// Advance one tick and keep the paddle inside the field
    pub fn update(&mut self, input: &PaddleInput, field: Vec2) {
        self.steer(input);
        self.vel = self.vel.limited(self.speed_limit);
        self.pos += self.vel;

        self.check_edges(field);
    }

    /// Clamp to the field, killing velocity on the blocked axis
    pub fn check_edges(&mut self, field: Vec2) {
        let half_w = self.width / 2.0;
        let half_h = self.height / 2.0;

        if self.pos.x - half_w < 0.0 {
            self.pos.x = half_w;
            self.vel.x = 0.0;
        } else if self.pos.x + half_w > field.x {
            self.pos.x = field.x - half_w;
            self.vel.x = 0.0;
        }

        if self.pos.y - half_h < 0.0 {
            self.pos.y = half_h;
            self.vel.y = 0.0;
        } else if self.pos.y + half_h > field.y {
            self.pos.y = field.y - half_h;
            self.vel.y = 0.0;
        }
    }

    /// Back to the starting position, at rest
    pub fn reset(&mut self) {
        self.pos = self.initial_pos;
        self.vel = Vec2::ZERO;
    }

    pub fn initial_pos(&self) -> Vec2 {
        self.initial_pos
    }
}
