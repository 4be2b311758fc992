//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering, audio or platform dependencies (side effects go out as events)

pub mod ball;
pub mod ccd;
pub mod collision;
pub mod paddle;
pub mod powerup;
pub mod scheduler;
pub mod state;
pub mod tick;
pub mod vector;

pub use ball::{Ball, Owner};
pub use ccd::{Collider, PickupProbe, StepPlan, walk};
pub use collision::{EdgeStatus, Rect, RectHit, RectMode};
pub use paddle::{Paddle, PaddleInput, Side};
pub use powerup::{ActOn, Bodies, Effect, Powerup, PowerupKind, PowerupStatus};
pub use scheduler::PowerupScheduler;
pub use state::{GameEvent, MatchState, VictoryTheme};
pub use tick::{TickInput, tick};
pub use vector::VecExt;
