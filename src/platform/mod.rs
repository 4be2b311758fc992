//! Platform abstraction layer
//!
//! Turns host input into per-tick simulation input:
//! - Keyboard state (held keys and typed commands)
//! - Serial paddle controllers

pub mod keyboard;
pub mod serial;

pub use keyboard::{Command, KeyBindings, KeyboardState};
pub use serial::SerialInput;

use crate::sim::{PaddleInput, Side, TickInput};

/// Something that knows which paddle controls are held right now
pub trait InputSource {
    fn poll(&mut self, side: Side) -> PaddleInput;
}

/// Build the input for one tick from a source and the commands typed since
/// the last tick. Frame-rate commands are for the host loop and are ignored here.
pub fn tick_input<I: InputSource + ?Sized>(source: &mut I, commands: &[Command]) -> TickInput {
    let mut input = TickInput {
        left: source.poll(Side::Left),
        right: source.poll(Side::Right),
        ..Default::default()
    };

    for command in commands {
        match command {
            Command::TogglePause => input.pause = !input.pause,
            Command::Restart => input.restart = true,
            Command::Reset => input.reset = true,
            Command::FrameRate(_) => {}
        }
    }
    input
}
