//! Powerups: timed effects on the ball and paddles
//!
//! Every powerup runs the same state machine (idle -> active -> idle). What
//! differs per kind is captured by [`Effect`], so the nine kinds are data
//! rather than nine types.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::ball::{Ball, Owner};
use super::paddle::{Paddle, Side};
use super::state::GameEvent;
use crate::consts::{FRAME_RATE, RESIZE_TRANSITION};

/// The nine powerup kinds, in catalogue order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerupKind {
    Gravity,
    AccelerateBall,
    SlowPaddle,
    EnlargePaddle,
    ShrinkPaddle,
    HideSide,
    ReverseInput,
    EnlargeBall,
    ShrinkBall,
}

impl PowerupKind {
    pub const ALL: [PowerupKind; 9] = [
        PowerupKind::Gravity,
        PowerupKind::AccelerateBall,
        PowerupKind::SlowPaddle,
        PowerupKind::EnlargePaddle,
        PowerupKind::ShrinkPaddle,
        PowerupKind::HideSide,
        PowerupKind::ReverseInput,
        PowerupKind::EnlargeBall,
        PowerupKind::ShrinkBall,
    ];

    /// Active time in ticks
    pub fn duration(self) -> u32 {
        match self {
            PowerupKind::Gravity => 420,
            PowerupKind::SlowPaddle | PowerupKind::HideSide => 480,
            PowerupKind::EnlargeBall | PowerupKind::ShrinkBall => 720,
            PowerupKind::AccelerateBall
            | PowerupKind::EnlargePaddle
            | PowerupKind::ShrinkPaddle
            | PowerupKind::ReverseInput => 600,
        }
    }

    /// Whether the ball must have an owner for the powerup to take effect
    pub fn needs_owner(self) -> bool {
        matches!(
            self,
            PowerupKind::SlowPaddle
                | PowerupKind::EnlargePaddle
                | PowerupKind::ShrinkPaddle
                | PowerupKind::HideSide
                | PowerupKind::ReverseInput
        )
    }

    /// Icon asset name
    pub fn icon(self) -> &'static str {
        match self {
            PowerupKind::Gravity => "gravity",
            PowerupKind::AccelerateBall => "accelerate",
            PowerupKind::SlowPaddle => "snail",
            PowerupKind::EnlargePaddle => "stretch",
            PowerupKind::ShrinkPaddle => "compress",
            PowerupKind::HideSide => "hidden",
            PowerupKind::ReverseInput => "reverse",
            PowerupKind::EnlargeBall => "expand",
            PowerupKind::ShrinkBall => "shrink",
        }
    }

    pub fn effect(self) -> Effect {
        match self {
            PowerupKind::Gravity => Effect::Force(Vec2::new(0.0, 7.0)),
            PowerupKind::AccelerateBall => Effect::Accelerate {
                limit_factor: 1.5,
                accel_factor: 3.0,
            },
            PowerupKind::SlowPaddle => Effect::ScalePaddleSpeed {
                act_on: ActOn::Opponent,
                factor: 0.7,
            },
            PowerupKind::EnlargePaddle => Effect::ResizePaddle {
                act_on: ActOn::Owner,
                factor: 1.5,
            },
            PowerupKind::ShrinkPaddle => Effect::ResizePaddle {
                act_on: ActOn::Opponent,
                factor: 0.7,
            },
            PowerupKind::HideSide => Effect::HideSide,
            PowerupKind::ReverseInput => Effect::ReverseInput {
                act_on: ActOn::Opponent,
            },
            PowerupKind::EnlargeBall => Effect::ResizeBall { factor: 2.0 },
            PowerupKind::ShrinkBall => Effect::ResizeBall { factor: 0.5 },
        }
    }
}

/// Which paddle a paddle effect lands on, relative to the ball's owner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActOn {
    Owner,
    Opponent,
}

/// What a powerup does while active
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Effect {
    /// Constant force on the ball every tick
    Force(Vec2),
    /// Raise the ball's speed limit and steering, and steer twice per tick
    Accelerate {
        limit_factor: f32,
        accel_factor: f32,
    },
    /// Scale a paddle's top speed
    ScalePaddleSpeed { act_on: ActOn, factor: f32 },
    /// Flip a paddle's controls
    ReverseInput { act_on: ActOn },
    /// Grow/shrink a paddle's height, easing in and out
    ResizePaddle { act_on: ActOn, factor: f32 },
    /// Grow/shrink the ball, easing in and out
    ResizeBall { factor: f32 },
    /// Cover the owner's opponent's half of the field (display only)
    HideSide,
}

impl Effect {
    fn act_on(&self) -> Option<ActOn> {
        match *self {
            Effect::ScalePaddleSpeed { act_on, .. }
            | Effect::ReverseInput { act_on }
            | Effect::ResizePaddle { act_on, .. } => Some(act_on),
            _ => None,
        }
    }
}

/// Values saved at enable time and put back on disable
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
enum Restore {
    #[default]
    Nothing,
    BallSpeed {
        speed_limit: f32,
        steering_accel: f32,
    },
    BallRadius(f32),
    PaddleSpeed(f32),
    PaddleHeight(f32),
}

/// The bodies powerups act on, borrowed for one call
pub struct Bodies<'a> {
    pub ball: &'a mut Ball,
    pub left: &'a mut Paddle,
    pub right: &'a mut Paddle,
}

impl Bodies<'_> {
    pub fn paddle_mut(&mut self, side: Side) -> &mut Paddle {
        match side {
            Side::Left => &mut *self.left,
            Side::Right => &mut *self.right,
        }
    }
}

/// Result of a per-tick update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerupStatus {
    /// Spawned, waiting to be picked up
    Idle,
    Active,
    /// Ran out this tick and was disabled
    Finished,
}

/// A single powerup instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Powerup {
    pub kind: PowerupKind,
    pub pos: Vec2,
    pub radius: f32,
    pub duration: u32,
    pub elapsed: u32,
    pub active: bool,
    pub owner: Owner,
    pub opponent: Owner,
    /// Colour the powerup is drawn in
    pub tint: Owner,
    restore: Restore,
    /// Per-tick size change while easing
    resize_step: f32,
}

impl Powerup {
    pub fn new(kind: PowerupKind, radius: f32) -> Self {
        Self {
            kind,
            pos: Vec2::ZERO,
            radius,
            duration: kind.duration(),
            elapsed: 0,
            active: false,
            owner: Owner::Neutral,
            opponent: Owner::Neutral,
            tint: Owner::Neutral,
            restore: Restore::Nothing,
            resize_step: 0.0,
        }
    }

    /// Paddle the effect lands on, if it is a paddle effect
    pub fn subject(&self) -> Option<Side> {
        match self.kind.effect().act_on()? {
            ActOn::Owner => self.owner.side(),
            ActOn::Opponent => self.opponent.side(),
        }
    }

    /// Try to activate. Owner-dependent kinds refuse while the ball is neutral.
    pub fn enable(
        &mut self,
        bodies: &mut Bodies<'_>,
        timer_pos: Vec2,
        events: &mut Vec<GameEvent>,
    ) -> bool {
        if self.active {
            return false;
        }

        self.owner = bodies.ball.owner;
        self.opponent = self.owner.opponent();

        if self.kind.needs_owner() {
            self.tint = self.owner;
            if self.owner == Owner::Neutral {
                log::debug!("{:?} needs an owner, not enabling", self.kind);
                return false;
            }
        }

        events.push(GameEvent::PowerupEnabled {
            kind: self.kind,
            owner: self.owner,
        });
        self.enable_action(bodies);
        self.active = true;
        self.pos = timer_pos;

        log::debug!("{:?} enabled by player {}", self.kind, self.owner.number());
        true
    }

    /// One tick of effect. Disables itself once the duration has run out.
    pub fn update(
        &mut self,
        bodies: &mut Bodies<'_>,
        events: &mut Vec<GameEvent>,
    ) -> PowerupStatus {
        if !self.active {
            return PowerupStatus::Idle;
        }

        self.act(bodies);
        self.elapsed += 1;

        if self.elapsed > self.duration {
            self.disable(bodies, events);
            return PowerupStatus::Finished;
        }
        PowerupStatus::Active
    }

    /// Revert the effect. No-op when idle.
    pub fn disable(&mut self, bodies: &mut Bodies<'_>, events: &mut Vec<GameEvent>) {
        if !self.active {
            return;
        }

        events.push(GameEvent::PowerupDisabled { kind: self.kind });
        self.tint = Owner::Neutral;
        self.disable_action(bodies);
        self.active = false;
        self.elapsed = 0;

        log::debug!("{:?} disabled", self.kind);
    }

    /// Whole seconds left, as shown on the countdown
    pub fn remaining_seconds(&self) -> u32 {
        self.duration.saturating_sub(self.elapsed) / FRAME_RATE
    }

    /// Half of the field covered by an active hide-side powerup
    pub fn hidden_side(&self) -> Option<Side> {
        if !self.active || self.kind != PowerupKind::HideSide {
            return None;
        }
        // Covers the half the owner is attacking
        Some(match self.owner {
            Owner::Right => Side::Left,
            _ => Side::Right,
        })
    }

    fn enable_action(&mut self, bodies: &mut Bodies<'_>) {
        let subject = self.subject();

        self.restore = match self.kind.effect() {
            Effect::Force(_) | Effect::HideSide => Restore::Nothing,
            Effect::Accelerate {
                limit_factor,
                accel_factor,
            } => {
                let ball = &mut *bodies.ball;
                let saved = Restore::BallSpeed {
                    speed_limit: ball.speed_limit,
                    steering_accel: ball.steering_accel,
                };
                ball.speed_limit *= limit_factor;
                ball.steering_accel *= accel_factor;
                saved
            }
            Effect::ResizeBall { factor } => {
                let radius = bodies.ball.radius;
                self.resize_step = radius * (factor - 1.0) / RESIZE_TRANSITION as f32;
                Restore::BallRadius(radius)
            }
            Effect::ScalePaddleSpeed { factor, .. } => match subject {
                Some(side) => {
                    let paddle = bodies.paddle_mut(side);
                    let saved = Restore::PaddleSpeed(paddle.speed_limit);
                    paddle.speed_limit *= factor;
                    saved
                }
                None => Restore::Nothing,
            },
            Effect::ReverseInput { .. } => {
                if let Some(side) = subject {
                    bodies.paddle_mut(side).speed_limit *= -1.0;
                }
                Restore::Nothing
            }
            Effect::ResizePaddle { factor, .. } => match subject {
                Some(side) => {
                    let height = bodies.paddle_mut(side).height;
                    self.resize_step = height * (factor - 1.0) / RESIZE_TRANSITION as f32;
                    Restore::PaddleHeight(height)
                }
                None => Restore::Nothing,
            },
        };
    }

    fn act(&mut self, bodies: &mut Bodies<'_>) {
        match self.kind.effect() {
            Effect::Force(force) => bodies.ball.apply_force(force),
            Effect::Accelerate { .. } => bodies.ball.steer(),
            Effect::ResizeBall { .. } => {
                if let Some(step) = self.transition_step() {
                    bodies.ball.radius += step;
                }
            }
            Effect::ResizePaddle { .. } => {
                if let (Some(step), Some(side)) = (self.transition_step(), self.subject()) {
                    bodies.paddle_mut(side).height += step;
                }
            }
            Effect::ScalePaddleSpeed { .. } | Effect::ReverseInput { .. } | Effect::HideSide => {}
        }
    }

    /// Size change for this tick: grow in over the first transition, back out over the last
    fn transition_step(&self) -> Option<f32> {
        if self.elapsed <= RESIZE_TRANSITION {
            Some(self.resize_step)
        } else if self.elapsed > self.duration.saturating_sub(RESIZE_TRANSITION) {
            Some(-self.resize_step)
        } else {
            None
        }
    }

    fn disable_action(&mut self, bodies: &mut Bodies<'_>) {
        let subject = self.subject();

        match std::mem::take(&mut self.restore) {
            Restore::Nothing => {}
            Restore::BallSpeed {
                speed_limit,
                steering_accel,
            } => {
                bodies.ball.speed_limit = speed_limit;
                bodies.ball.steering_accel = steering_accel;
            }
            Restore::BallRadius(radius) => bodies.ball.radius = radius,
            Restore::PaddleSpeed(limit) => {
                if let Some(side) = subject {
                    bodies.paddle_mut(side).speed_limit = limit;
                }
            }
            Restore::PaddleHeight(height) => {
                if let Some(side) = subject {
                    bodies.paddle_mut(side).height = height;
                }
            }
        }

        if let (Effect::ReverseInput { .. }, Some(side)) = (self.kind.effect(), subject) {
            bodies.paddle_mut(side).speed_limit *= -1.0;
        }

        self.resize_step = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{BallTuning, PaddleTuning};

    const FIELD: Vec2 = Vec2::new(1280.0, 720.0);
    const TIMER: Vec2 = Vec2::new(640.0, 60.0);

    struct World {
        ball: Ball,
        left: Paddle,
        right: Paddle,
    }

    impl World {
        fn new(owner: Owner) -> Self {
            let mut ball = Ball::new(&BallTuning::default(), FIELD / 2.0);
            ball.owner = owner;
            Self {
                ball,
                left: Paddle::new(Side::Left, &PaddleTuning::default(), FIELD),
                right: Paddle::new(Side::Right, &PaddleTuning::default(), FIELD),
            }
        }

        fn bodies(&mut self) -> Bodies<'_> {
            Bodies {
                ball: &mut self.ball,
                left: &mut self.left,
                right: &mut self.right,
            }
        }
    }

    fn run_to_end(p: &mut Powerup, world: &mut World, events: &mut Vec<GameEvent>) -> u32 {
        let mut ticks = 0;
        while p.update(&mut world.bodies(), events) != PowerupStatus::Finished {
            ticks += 1;
            assert!(ticks < 10_000);
        }
        ticks + 1
    }

    #[test]
    fn test_owner_required_refused_when_neutral() {
        let mut world = World::new(Owner::Neutral);
        let mut events = Vec::new();
        let mut p = Powerup::new(PowerupKind::ReverseInput, 30.0);

        assert!(!p.enable(&mut world.bodies(), TIMER, &mut events));
        assert!(!p.active);
        assert!(events.is_empty());
        assert_eq!(world.right.speed_limit, 16.0);
        assert_eq!(p.update(&mut world.bodies(), &mut events), PowerupStatus::Idle);
    }

    #[test]
    fn test_neutral_ball_can_enable_ball_effects() {
        let mut world = World::new(Owner::Neutral);
        let mut events = Vec::new();
        let mut p = Powerup::new(PowerupKind::Gravity, 30.0);

        assert!(p.enable(&mut world.bodies(), TIMER, &mut events));
        assert_eq!(p.pos, TIMER);
        assert!(matches!(events[0], GameEvent::PowerupEnabled { .. }));

        p.update(&mut world.bodies(), &mut events);
        assert!(world.ball.acc.y > 0.0);
    }

    #[test]
    fn test_lifecycle_runs_duration_plus_one_ticks() {
        let mut world = World::new(Owner::Left);
        let mut events = Vec::new();
        let mut p = Powerup::new(PowerupKind::Gravity, 30.0);
        p.enable(&mut world.bodies(), TIMER, &mut events);

        let ticks = run_to_end(&mut p, &mut world, &mut events);
        assert_eq!(ticks, 421);
        assert!(!p.active);
        assert_eq!(p.elapsed, 0);
        assert!(matches!(events.last(), Some(GameEvent::PowerupDisabled { .. })));
    }

    #[test]
    fn test_reverse_input_round_trip() {
        let mut world = World::new(Owner::Left);
        let mut events = Vec::new();
        let mut p = Powerup::new(PowerupKind::ReverseInput, 30.0);

        assert!(p.enable(&mut world.bodies(), TIMER, &mut events));
        assert_eq!(p.subject(), Some(Side::Right));
        assert_eq!(world.right.speed_limit, -16.0);
        assert_eq!(world.left.speed_limit, 16.0);

        run_to_end(&mut p, &mut world, &mut events);
        assert_eq!(world.right.speed_limit, 16.0);
    }

    #[test]
    fn test_slow_paddle_hits_opponent() {
        let mut world = World::new(Owner::Right);
        let mut events = Vec::new();
        let mut p = Powerup::new(PowerupKind::SlowPaddle, 30.0);

        p.enable(&mut world.bodies(), TIMER, &mut events);
        assert!((world.left.speed_limit - 11.2).abs() < 1e-4);
        assert_eq!(p.tint, Owner::Right);

        p.disable(&mut world.bodies(), &mut events);
        assert_eq!(world.left.speed_limit, 16.0);
        assert_eq!(p.tint, Owner::Neutral);
    }

    #[test]
    fn test_enlarge_paddle_eases_and_restores() {
        let mut world = World::new(Owner::Left);
        let mut events = Vec::new();
        let mut p = Powerup::new(PowerupKind::EnlargePaddle, 30.0);
        p.enable(&mut world.bodies(), TIMER, &mut events);

        for _ in 0..=RESIZE_TRANSITION {
            p.update(&mut world.bodies(), &mut events);
        }
        // 61 steps of 150 * 0.5 / 60
        assert!((world.left.height - (150.0 + 61.0 * 1.25)).abs() < 1e-2);
        assert_eq!(world.right.height, 150.0);

        run_to_end(&mut p, &mut world, &mut events);
        assert_eq!(world.left.height, 150.0);
    }

    #[test]
    fn test_shrink_ball_restores_exact_radius() {
        let mut world = World::new(Owner::Neutral);
        let mut events = Vec::new();
        let mut p = Powerup::new(PowerupKind::ShrinkBall, 30.0);
        p.enable(&mut world.bodies(), TIMER, &mut events);

        for _ in 0..100 {
            p.update(&mut world.bodies(), &mut events);
        }
        assert!(world.ball.radius < 20.0);

        run_to_end(&mut p, &mut world, &mut events);
        assert_eq!(world.ball.radius, 20.0);
    }

    #[test]
    fn test_accelerate_restores_limits() {
        let mut world = World::new(Owner::Neutral);
        let mut events = Vec::new();
        let mut p = Powerup::new(PowerupKind::AccelerateBall, 30.0);

        p.enable(&mut world.bodies(), TIMER, &mut events);
        assert_eq!(world.ball.speed_limit, 37.5);
        assert_eq!(world.ball.steering_accel, 3.0);

        p.disable(&mut world.bodies(), &mut events);
        assert_eq!(world.ball.speed_limit, 25.0);
        assert_eq!(world.ball.steering_accel, 1.0);
    }

    #[test]
    fn test_hidden_side_follows_owner() {
        let mut world = World::new(Owner::Right);
        let mut events = Vec::new();
        let mut p = Powerup::new(PowerupKind::HideSide, 30.0);
        assert_eq!(p.hidden_side(), None);

        p.enable(&mut world.bodies(), TIMER, &mut events);
        assert_eq!(p.hidden_side(), Some(Side::Left));

        p.disable(&mut world.bodies(), &mut events);
        world.ball.owner = Owner::Left;
        p.enable(&mut world.bodies(), TIMER, &mut events);
        assert_eq!(p.hidden_side(), Some(Side::Right));
    }

    #[test]
    fn test_disable_when_idle_is_noop() {
        let mut world = World::new(Owner::Left);
        let mut events = Vec::new();
        let mut p = Powerup::new(PowerupKind::ShrinkPaddle, 30.0);
        p.disable(&mut world.bodies(), &mut events);
        assert!(events.is_empty());
        assert_eq!(world.right.height, 150.0);
    }

    #[test]
    fn test_remaining_seconds() {
        let mut p = Powerup::new(PowerupKind::Gravity, 30.0);
        assert_eq!(p.remaining_seconds(), 7);
        p.elapsed = 361;
        assert_eq!(p.remaining_seconds(), 0);
    }
}
