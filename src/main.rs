//! Power Pong entry point
//!
//! Runs a headless match with both paddles tracking the ball, playing audio
//! cues through the log.
//!
//! Usage: `power-pong [settings.json] [ticks]`

use power_pong::Settings;
use power_pong::audio::{AudioManager, LogSink};
use power_pong::consts::FRAME_RATE;
use power_pong::platform::{InputSource, tick_input};
use power_pong::sim::{MatchState, PaddleInput, Side, tick};

const DEFAULT_TICKS: u64 = 60 * 60 * 5;
/// Dead zone around the paddle centre where the autopilot holds still
const TRACK_DEAD_ZONE: f32 = 10.0;

/// Drives each paddle toward the ball's height. Only here so the headless
/// demo has input; it is not a computer opponent.
struct Autopilot {
    ball_y: f32,
    paddle_y: [f32; 2],
}

impl Autopilot {
    fn observe(state: &MatchState) -> Self {
        Self {
            ball_y: state.ball.pos.y,
            paddle_y: [state.left.pos.y, state.right.pos.y],
        }
    }
}

impl InputSource for Autopilot {
    fn poll(&mut self, side: Side) -> PaddleInput {
        let offset = self.ball_y - self.paddle_y[side.index()];
        PaddleInput {
            up: offset < -TRACK_DEAD_ZONE,
            down: offset > TRACK_DEAD_ZONE,
            boost: offset.abs() > TRACK_DEAD_ZONE * 8.0,
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load_or_default(path),
        None => Settings::default(),
    };
    let ticks = match args.next().map(|s| s.parse::<u64>()) {
        Some(Ok(n)) => n,
        Some(Err(e)) => {
            log::warn!("Bad tick count ({e}), using {DEFAULT_TICKS}");
            DEFAULT_TICKS
        }
        None => DEFAULT_TICKS,
    };

    log::info!("Power Pong starting...");
    let mut state = MatchState::new(settings.match_config.clone());
    let mut audio = AudioManager::with_settings(LogSink, &settings);

    for _ in 0..ticks {
        let input = tick_input(&mut Autopilot::observe(&state), &[]);
        tick(&mut state, &input);
        audio.handle(&state.drain_events());

        if let Some(winner) = state.winner {
            log::info!("Player {} wins at tick {}", winner.number(), state.time_ticks);
            break;
        }
    }

    log::info!(
        "Final score {} - {} after {:.1}s of play",
        state.score(Side::Left),
        state.score(Side::Right),
        state.time_ticks as f32 / FRAME_RATE as f32
    );
}
