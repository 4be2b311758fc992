//! Error types for the fallible edges of the crate
//!
//! The simulation itself never fails; these cover settings files and
//! external controller input.

use thiserror::Error;

/// Failure loading or validating settings
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Malformed frame from an external paddle controller
#[derive(Error, Debug, PartialEq, Eq)]
pub enum InputError {
    #[error("serial frame must be 4 characters, got {0}")]
    FrameLength(usize),

    #[error("unexpected character {found:?} at position {position} (expected '0' or '1')")]
    BadCharacter { position: usize, found: char },
}
