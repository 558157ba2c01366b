//! Attempt error types.
//!
//! Defined in `quizdrill-core` so callers can classify failures without
//! string matching: a bad index is locally recoverable, while mutation
//! after submission signals a caller bug.

use thiserror::Error;

/// Errors produced by the attempt state machine and its session driver.
#[derive(Debug, Error)]
pub enum AttemptError {
    /// Mutation of answers or review marks after the attempt was finalized.
    #[error("attempt already submitted")]
    AlreadySubmitted,

    /// An index outside the valid range.
    #[error("index {index} out of range ({len} item(s))")]
    OutOfRange { index: usize, len: usize },

    /// The attempt configuration is structurally invalid.
    #[error("invalid quiz configuration: {0}")]
    Config(String),

    /// The session task is gone; the handle can no longer be used.
    #[error("attempt session closed")]
    SessionClosed,
}

impl AttemptError {
    /// Returns `true` if the caller can recover by retrying with a valid
    /// index. Everything else is a caller bug or a dead session.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, AttemptError::OutOfRange { .. })
    }
}
