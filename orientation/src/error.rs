//! Error types for the orientation crate.
//!
//! Conversions themselves never fail; the only fallible entry point is parsing
//! a rotation-order code coming from configuration.

use thiserror::Error;

/// Errors raised when reading orientation configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderParseError {
    /// The code is not four characters long or does not start with `s`/`r`.
    #[error("invalid rotation order code {0:?}: expected s|r followed by three axes")]
    Malformed(String),

    /// The axis triple is not a Tait-Bryan sequence (each of x, y, z exactly once).
    #[error("unsupported axis sequence {0:?}: each of x, y, z must appear once")]
    UnsupportedSequence(String),
}

/// Result type for orientation configuration.
pub type Result<T> = std::result::Result<T, OrderParseError>;
