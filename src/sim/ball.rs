//! The ball: a circular body that steers itself toward playable headings

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::paddle::Side;
use super::vector::VecExt;
use crate::consts::{MIN_MASS, STEERING_ANGLE_LIMIT, STEERING_RATE};
use crate::settings::BallTuning;
use crate::{disc_mass, from_angle_deg, normalize_heading};

/// Last paddle to touch the ball
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Owner {
    #[default]
    Neutral,
    Left,
    Right,
}

impl Owner {
    pub fn side(self) -> Option<Side> {
        match self {
            Owner::Neutral => None,
            Owner::Left => Some(Side::Left),
            Owner::Right => Some(Side::Right),
        }
    }

    /// The other player; neutral has no opponent
    pub fn opponent(self) -> Owner {
        match self {
            Owner::Neutral => Owner::Neutral,
            Owner::Left => Owner::Right,
            Owner::Right => Owner::Left,
        }
    }

    /// 0 = neutral, 1 = left, 2 = right
    pub fn number(self) -> u8 {
        self.side().map_or(0, Side::number)
    }
}

impl From<Side> for Owner {
    fn from(side: Side) -> Self {
        match side {
            Side::Left => Owner::Left,
            Side::Right => Owner::Right,
        }
    }
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub acc: Vec2,
    /// Changed temporarily by resize powerups
    pub radius: f32,
    /// Maximum speed
    pub speed_limit: f32,
    /// Magnitude of the self-steering force
    pub steering_accel: f32,
    /// Serve speed
    pub initial_speed: f32,
    pub mass: f32,
    pub owner: Owner,
}

impl Ball {
    /// New ball at `center`, heading left at serve speed
    pub fn new(tuning: &BallTuning, center: Vec2) -> Self {
        Self {
            pos: center,
            vel: Vec2::new(-tuning.initial_speed, 0.0),
            acc: Vec2::ZERO,
            radius: tuning.radius,
            speed_limit: tuning.speed_limit,
            steering_accel: tuning.steering_accel,
            initial_speed: tuning.initial_speed,
            mass: disc_mass(tuning.radius),
            owner: Owner::Neutral,
        }
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    pub fn apply_force(&mut self, force: Vec2) {
        self.acc += force / self.mass.max(MIN_MASS);
    }

    /// Nudge near-vertical headings back toward the horizontal bands, then
    /// accelerate along the heading until the speed limit is reached.
    pub fn steer(&mut self) {
        let angle = normalize_heading(self.vel.heading_deg());

        let rotation = if angle > STEERING_ANGLE_LIMIT && angle <= 90.0 {
            -STEERING_RATE
        } else if angle > 90.0 && angle < 180.0 - STEERING_ANGLE_LIMIT {
            STEERING_RATE
        } else {
            0.0
        };
        self.vel = self.vel.rotated_deg(rotation);

        let speed = self.speed();
        // A ball at rest has no heading to reinforce
        if speed > f32::EPSILON && speed < self.speed_limit {
            let force = from_angle_deg(self.vel.heading_deg(), self.steering_accel / speed);
            self.apply_force(force);
        }
    }

    /// Advance one tick: steer, integrate, clamp to the speed limit
    pub fn update(&mut self) {
        self.steer();

        self.vel += self.acc;
        self.vel = self.vel.limited(self.speed_limit);
        self.pos += self.vel;

        self.acc = Vec2::ZERO;
    }

    pub fn set_owner(&mut self, owner: Owner) {
        self.owner = owner;
    }

    /// Put the ball back at `center` and launch it at `heading` (degrees)
    pub fn serve(&mut self, center: Vec2, heading: f32) {
        self.pos = center;
        self.vel = from_angle_deg(heading, self.initial_speed);
        self.set_owner(Owner::Neutral);
    }
}
