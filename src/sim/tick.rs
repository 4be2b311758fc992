//! Fixed timestep simulation tick
//!
//! One call advances the match by one frame: paddles, then powerups, then
//! the ball and its collisions, then scoring.

use super::ccd::{Collider, PickupProbe, walk};
use super::paddle::PaddleInput;
use super::powerup::Bodies;
use super::state::MatchState;

/// Input for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: PaddleInput,
    pub right: PaddleInput,
    /// Pause toggle
    pub pause: bool,
    /// Serve a new rally, keeping the score
    pub restart: bool,
    /// Start the match over
    pub reset: bool,
}

/// Advance the match by one tick
pub fn tick(state: &mut MatchState, input: &TickInput) {
    if input.pause {
        state.toggle_pause();
    }
    if input.reset {
        state.reset();
    } else if input.restart {
        state.restart();
    }

    // Nothing moves while paused or once the match is decided
    if state.paused || state.winner.is_some() {
        return;
    }

    state.time_ticks += 1;

    state.left.update(&input.left, state.field);
    state.right.update(&input.right, state.field);

    {
        let mut bodies = Bodies {
            ball: &mut state.ball,
            left: &mut state.left,
            right: &mut state.right,
        };
        state.scheduler.update(&mut bodies, &mut state.rng, &mut state.events);
    }

    state.ball.update();

    // Only a spawned, not yet active powerup can be picked up
    let mut probe = state.scheduler.pickup_pending().map(|p| PickupProbe::new(p.pos, p.radius));

    {
        let mut colliders: Vec<&mut dyn Collider> = vec![&mut state.left, &mut state.right];
        if let Some(probe) = probe.as_mut() {
            colliders.push(probe);
        }
        walk(&mut state.ball, state.field, &mut colliders, &mut state.events);
    }

    if probe.is_some_and(|p| p.touched) {
        let mut bodies = Bodies {
            ball: &mut state.ball,
            left: &mut state.left,
            right: &mut state.right,
        };
        state.scheduler.enable_current(&mut bodies, &mut state.events);
    }

    if let Some(scorer) = state.track_score() {
        state.award_point(scorer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{MatchConfig, SchedulerTuning};
    use crate::sim::ball::Owner;
    use crate::sim::paddle::Side;
    use crate::sim::state::GameEvent;
    use glam::Vec2;

    fn state_with(seed: u64) -> MatchState {
        MatchState::new(MatchConfig {
            seed,
            ..Default::default()
        })
    }

    fn quiet_state() -> MatchState {
        MatchState::new(MatchConfig {
            seed: 7,
            powerups: SchedulerTuning {
                enabled: false,
                ..Default::default()
            },
            ..Default::default()
        })
    }

    #[test]
    fn test_tick_moves_ball() {
        let mut state = quiet_state();
        let start = state.ball.pos;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.time_ticks, 1);
        assert!(state.ball.pos.x < start.x);
    }

    #[test]
    fn test_tiny_ball_leaves_centre() {
        let mut config = MatchConfig {
            seed: 7,
            powerups: SchedulerTuning {
                enabled: false,
                ..Default::default()
            },
            ..Default::default()
        };
        config.ball.radius = 1.0;
        assert!(config.validate().is_ok());

        let mut state = MatchState::new(config);
        let start = state.ball.pos;
        for _ in 0..3 {
            tick(&mut state, &TickInput::default());
        }
        assert!(state.ball.vel.length() > 0.0);
        assert!(state.ball.pos.x < start.x);
    }

    #[test]
    fn test_tick_pause() {
        let mut state = quiet_state();
        let input = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert!(state.paused);
        let frozen = state.ball.pos;

        for _ in 0..10 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.ball.pos, frozen);
        assert_eq!(state.time_ticks, 0);

        // Unpause
        tick(&mut state, &input);
        assert!(!state.paused);
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_paddle_input_moves_paddles() {
        let mut state = quiet_state();
        let input = TickInput {
            left: PaddleInput {
                up: true,
                ..Default::default()
            },
            right: PaddleInput {
                down: true,
                boost: true,
                ..Default::default()
            },
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.left.pos.y, 352.0);
        assert_eq!(state.right.pos.y, 376.0);
    }

    #[test]
    fn test_ball_returned_by_paddle() {
        let mut state = quiet_state();
        state.ball.pos = Vec2::new(120.0, 360.0);
        state.ball.vel = Vec2::new(-20.0, 0.0);

        for _ in 0..3 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.ball.owner, Owner::Left);
        assert!(state.ball.vel.x > 0.0);
        assert_eq!(state.scores, [0, 0]);
        assert!(
            state
                .drain_events()
                .iter()
                .any(|e| matches!(e, GameEvent::Bounce { .. }))
        );
    }

    #[test]
    fn test_missed_ball_scores_for_opponent() {
        let mut state = quiet_state();
        // Below the left paddle's reach
        state.ball.pos = Vec2::new(60.0, 650.0);
        state.ball.vel = Vec2::new(-20.0, 0.0);

        let mut ticks = 0;
        while state.scores == [0, 0] {
            tick(&mut state, &TickInput::default());
            ticks += 1;
            assert!(ticks < 10);
        }
        assert_eq!(state.scores, [0, 1]);
        assert_eq!(state.server, Side::Left);
        assert_eq!(state.ball.pos, Vec2::new(640.0, 360.0));
        assert!(state.ball.vel.x < 0.0);
    }

    #[test]
    fn test_match_freezes_on_winner() {
        let mut state = quiet_state();
        state.scores = [10, 0];
        state.ball.pos = Vec2::new(1250.0, 650.0);
        state.ball.vel = Vec2::new(20.0, 0.0);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.winner, Some(Side::Left));
        let frozen = state.ball.pos;
        let ticks = state.time_ticks;

        tick(&mut state, &TickInput::default());
        assert_eq!(state.ball.pos, frozen);
        assert_eq!(state.time_ticks, ticks);

        // Reset brings it back to life
        let reset = TickInput {
            reset: true,
            ..Default::default()
        };
        tick(&mut state, &reset);
        assert!(state.winner.is_none());
        assert_eq!(state.scores, [0, 0]);
        assert_eq!(state.time_ticks, ticks + 1);
    }

    #[test]
    fn test_pickup_enables_powerup() {
        let mut state = MatchState::new(MatchConfig {
            seed: 21,
            winning_score: 1000,
            ..Default::default()
        });

        // Run until something spawns
        let mut guard = 0;
        while state.scheduler.current().is_none() {
            tick(&mut state, &TickInput::default());
            guard += 1;
            assert!(guard < 2000);
        }

        // Park the ball on it, unless the serve already ran through it
        if let Some(target) = state.scheduler.pickup_pending().map(|p| p.pos) {
            state.ball.pos = target;
            state.ball.vel = Vec2::new(-1.0, 0.0);
            state.ball.owner = Owner::Left;
            tick(&mut state, &TickInput::default());
        }

        assert!(state.scheduler.current().unwrap().active);
        assert!(
            state
                .drain_events()
                .iter()
                .any(|e| matches!(e, GameEvent::PowerupEnabled { .. }))
        );
    }

    #[test]
    fn test_determinism() {
        let mut a = state_with(99999);
        let mut b = state_with(99999);

        let inputs = [
            TickInput::default(),
            TickInput {
                left: PaddleInput {
                    down: true,
                    ..Default::default()
                },
                ..Default::default()
            },
            TickInput {
                right: PaddleInput {
                    up: true,
                    boost: true,
                    ..Default::default()
                },
                ..Default::default()
            },
        ];

        for i in 0..3000 {
            let input = &inputs[i % inputs.len()];
            tick(&mut a, input);
            tick(&mut b, input);
        }

        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.scores, b.scores);
        assert_eq!(a.ball.pos, b.ball.pos);
        assert_eq!(a.events, b.events);
    }
}
