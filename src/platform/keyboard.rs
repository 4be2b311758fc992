//! Keyboard input: held paddle keys and typed match commands

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::InputSource;
use crate::sim::{PaddleInput, Side};

/// Key codes for one paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBindings {
    pub up: u32,
    pub down: u32,
    pub boost: u32,
}

impl KeyBindings {
    /// W / S / Shift
    pub const LEFT: KeyBindings = KeyBindings {
        up: 87,
        down: 83,
        boost: 16,
    };
    /// I / K / ;
    pub const RIGHT: KeyBindings = KeyBindings {
        up: 73,
        down: 75,
        boost: 59,
    };
}

/// Simulation rate for each digit key, indexed by digit
const FRAME_RATES: [u32; 10] = [60, 1, 6, 12, 24, 30, 36, 42, 48, 54];

/// A typed (not held) key that changes the match or the loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    TogglePause,
    /// New rally, score kept
    Restart,
    /// New match
    Reset,
    /// Change the simulation rate (ticks per second)
    FrameRate(u32),
}

impl Command {
    pub fn from_char(c: char) -> Option<Command> {
        let command = match c {
            'p' => Command::TogglePause,
            'r' => Command::Restart,
            'R' => Command::Reset,
            '0'..='9' => Command::FrameRate(FRAME_RATES[c.to_digit(10)? as usize]),
            _ => return None,
        };
        Some(command)
    }
}

/// Keys currently held
#[derive(Debug, Clone)]
pub struct KeyboardState {
    pressed: HashSet<u32>,
    bindings: [KeyBindings; 2],
}

impl Default for KeyboardState {
    fn default() -> Self {
        Self::new(KeyBindings::LEFT, KeyBindings::RIGHT)
    }
}

impl KeyboardState {
    pub fn new(left: KeyBindings, right: KeyBindings) -> Self {
        Self {
            pressed: HashSet::new(),
            bindings: [left, right],
        }
    }

    pub fn key_down(&mut self, code: u32) {
        self.pressed.insert(code);
    }

    pub fn key_up(&mut self, code: u32) {
        self.pressed.remove(&code);
    }

    pub fn is_down(&self, code: u32) -> bool {
        self.pressed.contains(&code)
    }

    /// Release everything (e.g. on focus loss)
    pub fn clear(&mut self) {
        self.pressed.clear();
    }
}

impl InputSource for KeyboardState {
    fn poll(&mut self, side: Side) -> PaddleInput {
        let keys = self.bindings[side.index()];
        PaddleInput {
            up: self.is_down(keys.up),
            down: self.is_down(keys.down),
            boost: self.is_down(keys.boost),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bindings_map_to_sides() {
        let mut keys = KeyboardState::default();
        keys.key_down(87);
        keys.key_down(75);
        keys.key_down(59);

        let left = keys.poll(Side::Left);
        assert!(left.up && !left.down && !left.boost);

        let right = keys.poll(Side::Right);
        assert!(!right.up && right.down && right.boost);

        keys.key_up(87);
        assert_eq!(keys.poll(Side::Left), PaddleInput::default());

        keys.clear();
        assert_eq!(keys.poll(Side::Right), PaddleInput::default());
    }

    #[test]
    fn test_commands() {
        assert_eq!(Command::from_char('p'), Some(Command::TogglePause));
        assert_eq!(Command::from_char('r'), Some(Command::Restart));
        assert_eq!(Command::from_char('R'), Some(Command::Reset));
        assert_eq!(Command::from_char('x'), None);
    }

    #[test]
    fn test_frame_rate_digits() {
        let rates: Vec<u32> = "1234567890"
            .chars()
            .filter_map(|c| match Command::from_char(c) {
                Some(Command::FrameRate(r)) => Some(r),
                _ => None,
            })
            .collect();
        assert_eq!(rates, vec![1, 6, 12, 24, 30, 36, 42, 48, 54, 60]);
    }
}
