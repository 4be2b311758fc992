//! Match state and the events the simulation reports
//!
//! Everything a tick reads or writes lives in [`MatchState`]. Side effects
//! the host cares about (sounds, music) are queued as [`GameEvent`]s instead
//! of being performed here.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ball::{Ball, Owner};
use super::paddle::{Paddle, Side};
use super::powerup::{Bodies, PowerupKind};
use super::scheduler::PowerupScheduler;
use crate::consts::{SPECIAL_THEME_CHANCE, VICTORY_THEMES};
use crate::settings::MatchConfig;

/// Victory music, index 0 is the rare special theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VictoryTheme {
    Rick,
    Mario,
    Link,
    MrGame,
}

impl VictoryTheme {
    pub const ALL: [VictoryTheme; VICTORY_THEMES] = [
        VictoryTheme::Rick,
        VictoryTheme::Mario,
        VictoryTheme::Link,
        VictoryTheme::MrGame,
    ];

    pub fn name(self) -> &'static str {
        match self {
            VictoryTheme::Rick => "rick",
            VictoryTheme::Mario => "mario",
            VictoryTheme::Link => "link",
            VictoryTheme::MrGame => "mrGame",
        }
    }

    /// Special theme below `SPECIAL_THEME_CHANCE`, otherwise uniform among the rest
    pub fn pick<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let r: f32 = rng.random();
        if r < SPECIAL_THEME_CHANCE {
            Self::ALL[0]
        } else {
            Self::ALL[rng.random_range(1..VICTORY_THEMES)]
        }
    }
}

/// Something that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Ball bounced off a wall, paddle or corner
    Bounce { speed: f32, limit: f32 },
    PointScored { scorer: Side },
    PowerupSpawned { kind: PowerupKind },
    PowerupEnabled { kind: PowerupKind, owner: Owner },
    PowerupDisabled { kind: PowerupKind },
    Victory { winner: Side, theme: VictoryTheme },
    /// Any victory music should stop
    MusicStopped,
}

impl GameEvent {
    pub fn bounce(ball: &Ball) -> Self {
        GameEvent::Bounce {
            speed: ball.speed(),
            limit: ball.speed_limit,
        }
    }
}

/// Complete match state
#[derive(Debug, Clone)]
pub struct MatchState {
    pub config: MatchConfig,
    pub field: Vec2,
    pub ball: Ball,
    pub left: Paddle,
    pub right: Paddle,
    pub scheduler: PowerupScheduler,
    /// Points, indexed by `Side::index`
    pub scores: [u32; 2],
    pub winner: Option<Side>,
    /// Side the next serve heads away from
    pub server: Side,
    pub paused: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub rng: Pcg32,
    /// Events since the last drain
    pub events: Vec<GameEvent>,
}

impl MatchState {
    /// New match. A zero seed is replaced by one derived from the clock.
    pub fn new(config: MatchConfig) -> Self {
        let seed = if config.seed == 0 {
            clock_seed()
        } else {
            config.seed
        };
        let mut rng = Pcg32::seed_from_u64(seed);

        let field = Vec2::new(config.field_width, config.field_height);
        let scheduler = PowerupScheduler::standard(&config.powerups, field, &mut rng);

        log::info!(
            "New match: {}x{}, first to {}, seed {}",
            field.x,
            field.y,
            config.winning_score,
            seed
        );

        Self {
            ball: Ball::new(&config.ball, config.center()),
            left: Paddle::new(Side::Left, &config.paddle, field),
            right: Paddle::new(Side::Right, &config.paddle, field),
            scheduler,
            scores: [0; 2],
            winner: None,
            server: Side::Left,
            paused: false,
            time_ticks: 0,
            rng,
            events: Vec::new(),
            field,
            config,
        }
    }

    pub fn score(&self, side: Side) -> u32 {
        self.scores[side.index()]
    }

    /// Take the events queued so far
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        log::info!("{}", if self.paused { "Paused" } else { "Resumed" });
    }

    /// Serve a new rally from the centre, away from the server, with some jitter
    pub fn restart(&mut self) {
        let base = match self.server {
            Side::Left => 180.0,
            Side::Right => 0.0,
        };
        let jitter = self.config.serve_jitter.abs();
        let offset = if jitter > 0.0 {
            self.rng.random_range(-jitter..jitter).floor()
        } else {
            0.0
        };

        self.ball.serve(self.config.center(), base + offset);
    }

    /// Start the match over: scores, paddles, powerups and winner
    pub fn reset(&mut self) {
        self.restart();
        self.ball.vel = Vec2::new(-self.ball.initial_speed, 0.0);

        self.scores = [0; 2];
        self.left.reset();
        self.right.reset();

        let mut bodies = Bodies {
            ball: &mut self.ball,
            left: &mut self.left,
            right: &mut self.right,
        };
        self.scheduler.reset(&mut bodies, &mut self.rng, &mut self.events);

        self.winner = None;
        self.events.push(GameEvent::MusicStopped);

        log::info!("Match reset");
    }

    /// Which side scores if the ball has reached a goal line
    pub fn track_score(&self) -> Option<Side> {
        if self.ball.pos.x - self.ball.radius <= 0.0 {
            Some(Side::Right)
        } else if self.ball.pos.x + self.ball.radius >= self.field.x {
            Some(Side::Left)
        } else {
            None
        }
    }

    /// Credit a point, serve the next rally, and settle the match if it is won
    pub fn award_point(&mut self, scorer: Side) {
        self.scores[scorer.index()] += 1;
        self.events.push(GameEvent::PointScored { scorer });

        self.server = scorer.opponent();
        self.restart();

        let score = self.score(scorer);
        log::info!(
            "Player {} scores ({} - {})",
            scorer.number(),
            self.scores[0],
            self.scores[1]
        );

        if score >= self.config.winning_score && self.winner.is_none() {
            let theme = VictoryTheme::pick(&mut self.rng);
            self.events.push(GameEvent::Victory {
                winner: scorer,
                theme,
            });
            self.winner = Some(scorer);
            log::info!(
                "Player {} wins {} - {}",
                scorer.number(),
                self.scores[0],
                self.scores[1]
            );
        }
    }
}

fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(1)
}
