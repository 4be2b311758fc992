//! Collision detection and response between the ball and flat geometry
//!
//! Everything resolves down to `collide_wall`: a rectangle side is a wall
//! through that side, a rectangle corner is a wall tangent to the ball at
//! the corner. The returned contact angle is the wall's angle in degrees,
//! which paddle contacts use to split the paddle's velocity into
//! tangential and normal parts.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::paddle::Paddle;
use super::state::GameEvent;
use super::vector::VecExt;

/// How a rectangle's four numbers are interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RectMode {
    /// (x, y) is the centre, (w, h) the full size
    #[default]
    Center,
    /// (x, y) is the top-left corner, (w, h) the full size
    Corner,
    /// (x, y) and (w, h) are opposite corners
    Corners,
    /// (x, y) is the centre, (w, h) the half size
    Radius,
}

impl RectMode {
    /// Parse a mode name; unknown names fall back to `Center`
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "center" | "centre" => RectMode::Center,
            "corner" => RectMode::Corner,
            "corners" => RectMode::Corners,
            "radius" => RectMode::Radius,
            _ => {
                log::warn!("{name} is not a valid rect mode, using center");
                RectMode::Center
            }
        }
    }
}

/// Axis-aligned rectangle in centre/half-extent form
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub center: Vec2,
    pub half: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32, mode: RectMode) -> Self {
        let (center, size) = match mode {
            RectMode::Center => (Vec2::new(x, y), Vec2::new(w, h)),
            RectMode::Corner => (Vec2::new(x + w / 2.0, y + h / 2.0), Vec2::new(w, h)),
            RectMode::Corners => {
                let size = Vec2::new(w - x, h - y);
                (Vec2::new(x, y) + size / 2.0, size)
            }
            RectMode::Radius => (Vec2::new(x, y), Vec2::new(w, h) * 2.0),
        };
        Self {
            center,
            half: size.abs() / 2.0,
        }
    }

    pub fn centered(center: Vec2, size: Vec2) -> Self {
        Self::new(center.x, center.y, size.x, size.y, RectMode::Center)
    }

    pub fn left(&self) -> f32 {
        self.center.x - self.half.x
    }

    pub fn right(&self) -> f32 {
        self.center.x + self.half.x
    }

    pub fn top(&self) -> f32 {
        self.center.y - self.half.y
    }

    pub fn bottom(&self) -> f32 {
        self.center.y + self.half.y
    }

    /// Corner on the same side as `point` on both axes
    pub fn nearest_corner(&self, point: Vec2) -> Vec2 {
        let rel = point - self.center;
        let x = if rel.x < 0.0 { self.left() } else { self.right() };
        let y = if rel.y < 0.0 { self.top() } else { self.bottom() };
        Vec2::new(x, y)
    }
}

/// Kind of overlap between the ball and a rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RectHit {
    None,
    /// Overlapping a face
    Side,
    /// Overlapping a corner region
    Corner,
}

/// Whether the ball is still in play after an edge check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeStatus {
    InBounds,
    /// Crossed the left or right boundary; the rally is over
    OutOfBounds,
}

fn is_vertical(angle: f32) -> bool {
    (angle.abs() - 90.0).abs() < 1e-4
}

impl Ball {
    /// Separating-axis overlap test against a rectangle
    pub fn check_collision_rect(&self, rect: &Rect) -> RectHit {
        let dist = (self.pos - rect.center).abs();

        // Definitely not colliding
        if dist.x >= rect.half.x + self.radius || dist.y >= rect.half.y + self.radius {
            return RectHit::None;
        }

        // Definitely colliding
        if dist.x < rect.half.x || dist.y < rect.half.y {
            return RectHit::Side;
        }

        // Possibly a corner
        let d = dist - rect.half;
        if d.length_squared() < self.radius * self.radius {
            RectHit::Corner
        } else {
            RectHit::None
        }
    }

    /// Overlap test against a circle (no response)
    pub fn check_collision_circle(&self, center: Vec2, radius: f32) -> bool {
        self.pos.distance(center) < self.radius + radius
    }

    /// Resolve a collision with a rectangle. Returns the contact angle, or
    /// `None` if the ball isn't touching it.
    pub fn collide_rect(&mut self, rect: &Rect, events: &mut Vec<GameEvent>) -> Option<f32> {
        let rel = self.pos - rect.center;

        match self.check_collision_rect(rect) {
            RectHit::None => None,
            RectHit::Side => {
                events.push(GameEvent::bounce(self));
                let angle = if rel.x.abs() < rect.half.x {
                    // Top or bottom face
                    let y = if rel.y < 0.0 { rect.top() } else { rect.bottom() };
                    self.collide_wall(Vec2::new(self.pos.x, y), 0.0)
                } else {
                    // Left or right face
                    let x = if rel.x < 0.0 { rect.left() } else { rect.right() };
                    self.collide_wall(Vec2::new(x, self.pos.y), 90.0)
                };
                Some(angle)
            }
            RectHit::Corner => {
                events.push(GameEvent::bounce(self));
                Some(self.collide_point(rect.nearest_corner(self.pos)))
            }
        }
    }

    /// Bounce off a single point, treated as a wall perpendicular to the
    /// line from the ball centre to the point
    pub fn collide_point(&mut self, point: Vec2) -> f32 {
        let d = point - self.pos;
        let angle = if d.y == 0.0 {
            90.0
        } else {
            (-d.x / d.y).atan().to_degrees()
        };
        self.collide_wall(point, angle)
    }

    /// Bounce off the infinite line through `point` at `angle` degrees:
    /// push the ball out to exactly one radius from the line and reflect
    /// its velocity about the line normal. Returns `angle`.
    pub fn collide_wall(&mut self, point: Vec2, angle: f32) -> f32 {
        let offset = if is_vertical(angle) {
            let depth = self.radius - (self.pos.x - point.x).abs();
            // On the line itself, push back the way the ball came from
            let left = self.pos.x < point.x || (self.pos.x == point.x && self.vel.x > 0.0);
            Vec2::new(if left { -depth } else { depth }, 0.0)
        } else {
            let m = angle.to_radians().tan();
            let n = point.y - m * point.x;
            let dist = (m * self.pos.x - self.pos.y + n).abs() / (m * m + 1.0).sqrt();
            let depth = self.radius - dist;

            let line_y = m * self.pos.x + n;
            let rel_y = self.pos.y - line_y;
            let above = rel_y < 0.0 || (rel_y == 0.0 && self.vel.y > 0.0);
            let rotation = if above { -90.0 } else { 90.0 };

            let normal_angle = (angle + rotation).to_radians();
            Vec2::new(depth * normal_angle.cos(), depth * normal_angle.sin())
        };

        self.pos += offset;
        self.vel = self.vel.reflected(offset);

        angle
    }

    /// Bounce off the top/bottom of the field; report leaving via left/right
    pub fn check_edges(&mut self, field: Vec2, events: &mut Vec<GameEvent>) -> EdgeStatus {
        let left = self.pos.x - self.radius;
        let right = self.pos.x + self.radius;
        let top = self.pos.y - self.radius;
        let bottom = self.pos.y + self.radius;

        if left < 0.0 || right > field.x {
            return EdgeStatus::OutOfBounds;
        }

        let normal = if top < 0.0 {
            events.push(GameEvent::bounce(self));
            self.pos.y = self.radius;
            Vec2::new(0.0, 1.0)
        } else if bottom > field.y {
            events.push(GameEvent::bounce(self));
            self.pos.y = field.y - self.radius;
            Vec2::new(0.0, -1.0)
        } else {
            Vec2::ZERO
        };

        self.vel = self.vel.reflected(normal);

        EdgeStatus::InBounds
    }

    /// Collide with a paddle in the paddle's frame of reference, then hand
    /// over some of the paddle's motion. Returns whether they touched.
    pub fn collide_paddle(&mut self, paddle: &Paddle, events: &mut Vec<GameEvent>) -> bool {
        let rect = Rect::centered(paddle.pos, Vec2::new(paddle.width, paddle.height));

        self.vel -= paddle.vel;
        let contact = self.collide_rect(&rect, events);
        self.vel += paddle.vel;

        let Some(angle) = contact else {
            return false;
        };

        self.set_owner(paddle.side.into());

        // Split paddle velocity into the contact frame: x along the surface, y along the normal
        let local = paddle.vel.rotated_deg(-angle);
        let parallel = Vec2::new(local.x, 0.0);
        let mut normal = Vec2::new(0.0, local.y);

        // Paddle retreating from the ball doesn't push it
        if local.y * (self.pos.y - paddle.pos.y) < 0.0 {
            normal.y = 0.0;
        }

        let parallel = parallel.rotated_deg(angle) * paddle.friction;
        let mut normal = normal.rotated_deg(angle);
        if paddle.scale_normal_transfer {
            normal *= paddle.force_transfer;
        }

        self.vel += parallel + normal;

        true
    }
}
