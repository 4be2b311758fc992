//! Serial paddle controllers
//!
//! The controller board sends one line per reading: four characters, each
//! `'0'` or `'1'`, for left up, left down, right up and right down.

use super::InputSource;
use crate::error::InputError;
use crate::sim::{PaddleInput, Side};

const FRAME_LEN: usize = 4;

fn bit(c: char, position: usize) -> Result<bool, InputError> {
    match c {
        '0' => Ok(false),
        '1' => Ok(true),
        found => Err(InputError::BadCharacter { position, found }),
    }
}

/// Decode one frame into (left, right) input. A trailing line ending is ignored.
///
/// Controllers have no boost button and always drive at full speed.
pub fn decode_frame(line: &str) -> Result<(PaddleInput, PaddleInput), InputError> {
    let frame = line.trim_end_matches(['\r', '\n']);
    let len = frame.chars().count();
    if len != FRAME_LEN {
        return Err(InputError::FrameLength(len));
    }

    let mut bits = [false; FRAME_LEN];
    for (position, c) in frame.chars().enumerate() {
        bits[position] = bit(c, position)?;
    }

    let side = |up: bool, down: bool| PaddleInput {
        up,
        down,
        boost: true,
    };
    Ok((side(bits[0], bits[1]), side(bits[2], bits[3])))
}

/// Latest controller reading; malformed frames keep the previous one
#[derive(Debug, Clone, Default)]
pub struct SerialInput {
    left: PaddleInput,
    right: PaddleInput,
}

impl SerialInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take a line from the serial port
    pub fn feed(&mut self, line: &str) -> Result<(), InputError> {
        match decode_frame(line) {
            Ok((left, right)) => {
                self.left = left;
                self.right = right;
                Ok(())
            }
            Err(e) => {
                log::warn!("Dropping serial frame {:?}: {}", line, e);
                Err(e)
            }
        }
    }
}

impl InputSource for SerialInput {
    fn poll(&mut self, side: Side) -> PaddleInput {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode() {
        let (left, right) = decode_frame("1001\r\n").unwrap();
        assert_eq!(left.direction(), -1.0);
        assert_eq!(right.direction(), 1.0);
        assert!(left.boost && right.boost);

        let (left, right) = decode_frame("1100").unwrap();
        assert_eq!(left.direction(), 0.0);
        assert_eq!(right.direction(), 0.0);
    }

    #[test]
    fn test_malformed_frames() {
        assert_eq!(decode_frame("101"), Err(InputError::FrameLength(3)));
        assert_eq!(decode_frame(""), Err(InputError::FrameLength(0)));
        assert_eq!(
            decode_frame("10x1"),
            Err(InputError::BadCharacter {
                position: 2,
                found: 'x'
            })
        );
    }

    #[test]
    fn test_bad_frame_keeps_last_reading() {
        let mut serial = SerialInput::new();
        serial.feed("0110").unwrap();
        assert!(serial.feed("garbage").is_err());

        assert_eq!(serial.poll(Side::Left).direction(), 1.0);
        assert_eq!(serial.poll(Side::Right).direction(), -1.0);
    }
}
