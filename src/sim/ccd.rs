//! Continuous collision: walk the ball along its last move in radius-sized
//! steps so fast balls can't pass through thin paddles
//!
//! Called after the ball has already moved this tick. The walk backs up by
//! one velocity and replays the move, running every collider (and the
//! field edge check) after each step.

use glam::Vec2;

use super::ball::Ball;
use super::collision::EdgeStatus;
use super::paddle::Paddle;
use super::state::GameEvent;
use super::vector::VecExt;
use crate::consts::MAX_WALK_STEPS;

/// Anything the ball can run into during the walk
pub trait Collider {
    fn collide(&mut self, ball: &mut Ball, events: &mut Vec<GameEvent>);
}

impl Collider for Paddle {
    fn collide(&mut self, ball: &mut Ball, events: &mut Vec<GameEvent>) {
        ball.collide_paddle(self, events);
    }
}

/// Overlap probe for a spawned powerup. Only records the touch; the
/// pickup itself happens once the walk is over.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickupProbe {
    pub center: Vec2,
    pub radius: f32,
    pub touched: bool,
}

impl PickupProbe {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self {
            center,
            radius,
            touched: false,
        }
    }
}

impl Collider for PickupProbe {
    fn collide(&mut self, ball: &mut Ball, _events: &mut Vec<GameEvent>) {
        if ball.check_collision_circle(self.center, self.radius) {
            self.touched = true;
        }
    }
}

/// How a move is split into steps
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepPlan {
    /// Whole steps
    pub count: u32,
    /// One step, `radius` long
    pub step: Vec2,
    /// What is left after the whole steps
    pub remainder: Vec2,
}

impl StepPlan {
    pub fn new(vel: Vec2, radius: f32) -> Self {
        let speed = vel.length();
        if speed <= f32::EPSILON || radius <= 0.0 {
            return Self {
                count: 0,
                step: Vec2::ZERO,
                remainder: vel,
            };
        }

        let step = vel.with_mag(radius);
        Self {
            count: (speed / radius).floor() as u32,
            step,
            remainder: vel.rem_by(step),
        }
    }
}

/// Replay the ball's last move in steps, resolving collisions along the way.
/// Stops early once the ball leaves through the left or right edge.
pub fn walk(
    ball: &mut Ball,
    field: Vec2,
    colliders: &mut [&mut dyn Collider],
    events: &mut Vec<GameEvent>,
) -> EdgeStatus {
    ball.pos -= ball.vel;

    let mut plan = StepPlan::new(ball.vel, ball.radius);
    let mut i = 0;
    while i < plan.count && i < MAX_WALK_STEPS {
        ball.pos += plan.step;

        if resolve(ball, field, colliders, events) == EdgeStatus::OutOfBounds {
            return EdgeStatus::OutOfBounds;
        }

        // A collision may have changed the velocity
        plan = StepPlan::new(ball.vel, ball.radius);
        i += 1;
    }

    ball.pos += plan.remainder;
    resolve(ball, field, colliders, events)
}

fn resolve(
    ball: &mut Ball,
    field: Vec2,
    colliders: &mut [&mut dyn Collider],
    events: &mut Vec<GameEvent>,
) -> EdgeStatus {
    if colliders.is_empty() {
        return ball.check_edges(field, events);
    }

    for collider in colliders.iter_mut() {
        collider.collide(ball, events);
        if ball.check_edges(field, events) == EdgeStatus::OutOfBounds {
            return EdgeStatus::OutOfBounds;
        }
    }
    EdgeStatus::InBounds
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{BallTuning, PaddleTuning};
    use crate::sim::paddle::Side;

    const FIELD: Vec2 = Vec2::new(1280.0, 720.0);

    /// Ball that has just moved from `from` by `vel`
    fn bounces(events: &[GameEvent]) -> usize {
        events
            .iter()
            .filter(|e| matches!(e, GameEvent::Bounce { .. }))
            .count()
    }

    fn moved_ball(from: Vec2, vel: Vec2, radius: f32) -> Ball {
        let tuning = BallTuning {
            radius,
            ..Default::default()
        };
        let mut ball = Ball::new(&tuning, from);
        ball.vel = vel;
        ball.pos = from + vel;
        ball
    }

    #[test]
    fn test_step_plan() {
        let plan = StepPlan::new(Vec2::new(30.0, 40.0), 20.0);
        assert_eq!(plan.count, 2);
        assert!((plan.step - Vec2::new(12.0, 16.0)).length() < 1e-4);
        assert!((plan.remainder - Vec2::new(6.0, 8.0)).length() < 1e-4);
    }

    #[test]
    fn test_step_plan_stationary() {
        let plan = StepPlan::new(Vec2::ZERO, 20.0);
        assert_eq!(plan.count, 0);
        assert_eq!(plan.remainder, Vec2::ZERO);
    }

    #[test]
    fn test_fast_ball_does_not_tunnel_thin_paddle() {
        let tuning = PaddleTuning {
            width: 4.0,
            ..Default::default()
        };
        let mut paddle = Paddle::new(Side::Left, &tuning, FIELD);
        let mut ball = moved_ball(Vec2::new(100.0, 360.0), Vec2::new(-40.0, 0.0), 5.0);
        let mut events = Vec::new();

        // Landing spot is clear of the paddle, so a single end-of-move check misses it
        assert!(!ball.clone().collide_paddle(&paddle, &mut Vec::new()));

        let status = walk(&mut ball, FIELD, &mut [&mut paddle], &mut events);
        assert_eq!(status, EdgeStatus::InBounds);
        assert!(ball.vel.x > 0.0);
        assert!(ball.pos.x - ball.radius >= 77.0 - 1e-3);
        assert_eq!(ball.owner, crate::sim::ball::Owner::Left);
        assert_eq!(bounces(&events), 1);
    }

    #[test]
    fn test_fast_straight_hit_bounces_once() {
        for speed in [37.5, 60.0] {
            let mut paddle = Paddle::new(Side::Left, &PaddleTuning::default(), FIELD);
            let mut ball = moved_ball(Vec2::new(120.0, 360.0), Vec2::new(-speed, 0.0), 20.0);
            let mut events = Vec::new();

            walk(&mut ball, FIELD, &mut [&mut paddle], &mut events);
            assert_eq!(bounces(&events), 1, "speed {speed}");
            assert!(ball.vel.x > 0.0);
            assert!(ball.pos.x - ball.radius >= 85.0 - 1e-3);
        }
    }

    #[test]
    fn test_stationary_ball_stays_put() {
        let mut ball = moved_ball(Vec2::new(640.0, 360.0), Vec2::ZERO, 20.0);
        let mut events = Vec::new();
        let status = walk(&mut ball, FIELD, &mut [], &mut events);
        assert_eq!(status, EdgeStatus::InBounds);
        assert_eq!(ball.pos, Vec2::new(640.0, 360.0));
    }

    #[test]
    fn test_leaving_field_aborts() {
        let mut ball = moved_ball(Vec2::new(30.0, 360.0), Vec2::new(-25.0, 0.0), 20.0);
        let mut events = Vec::new();
        let status = walk(&mut ball, FIELD, &mut [], &mut events);
        assert_eq!(status, EdgeStatus::OutOfBounds);
        // First step already crossed the line
        assert!((ball.pos.x - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_probe_sees_pass_through() {
        let mut probe = PickupProbe::new(Vec2::new(200.0, 360.0), 2.0);
        let mut ball = moved_ball(Vec2::new(230.0, 360.0), Vec2::new(-60.0, 0.0), 5.0);
        let mut events = Vec::new();

        assert!(!ball.check_collision_circle(probe.center, probe.radius));
        walk(&mut ball, FIELD, &mut [&mut probe], &mut events);
        assert!(probe.touched);
        // Probes never deflect the ball
        assert_eq!(ball.vel, Vec2::new(-60.0, 0.0));
    }

    #[test]
    fn test_step_guard_terminates() {
        let mut ball = moved_ball(Vec2::new(640.0, 360.0), Vec2::new(0.0, 1.0e5), 20.0);
        let mut events = Vec::new();
        let status = walk(&mut ball, FIELD, &mut [], &mut events);
        assert_eq!(status, EdgeStatus::InBounds);
        assert!(ball.pos.is_finite());
        assert!(!events.is_empty());
    }
}
