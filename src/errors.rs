//! Error types for the simulation core
//!
//! This module defines [`LifeError`], which covers every failure the core can
//! report. None of them are fatal: each is returned to the caller, and the
//! operation that produced it leaves prior state untouched.
//!
//! Reaching the frontier of the frame graph is deliberately *not* an error;
//! lookups that can hit the frontier return `Option` instead.

use std::fmt;

/// Errors reported by the simulation core and its host
#[derive(Debug)]
pub enum LifeError {
    /// A render was requested for zero generations
    InvalidGenerationCount { requested: usize },

    /// `corners_of` was called with no points
    EmptyPointList,

    /// A fingerprint did not decode to a live set
    MalformedFingerprint { fingerprint: String, reason: String },

    /// `back()` at the oldest snapshot or `forward()` at the newest
    HistoryOutOfRange { index: usize, len: usize },

    /// History length must be at least one
    InvalidHistoryLength { requested: usize },

    /// Flood fill would cover more cells than allowed
    FillLimitExceeded { limit: usize },

    /// Rule string was not in B/S notation
    InvalidRule { rule: String },

    /// A chain file was rendered under a different rule than the controller's
    RuleMismatch { expected: String, found: String },

    /// Command-line or configuration argument was rejected
    InvalidArgument { message: String },

    /// Reading or writing a chain file failed
    Io(std::io::Error),

    /// A chain file could not be encoded or decoded
    Serialization(serde_json::Error),
}

impl fmt::Display for LifeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LifeError::InvalidGenerationCount { requested } => {
                write!(
                    f,
                    "Invalid generation count {}: must be at least 1",
                    requested
                )
            }
            LifeError::EmptyPointList => {
                write!(f, "Cannot compute corners of an empty point list")
            }
            LifeError::MalformedFingerprint {
                fingerprint,
                reason,
            } => {
                // Boards can be huge; keep the message readable
                let shown: String = fingerprint.chars().take(40).collect();
                let ellipsis = if fingerprint.chars().count() > 40 {
                    "..."
                } else {
                    ""
                };
                write!(
                    f,
                    "Malformed fingerprint '{}{}': {}",
                    shown, ellipsis, reason
                )
            }
            LifeError::HistoryOutOfRange { index, len } => {
                write!(
                    f,
                    "History index {} cannot move further (length {})",
                    index, len
                )
            }
            LifeError::InvalidHistoryLength { requested } => {
                write!(
                    f,
                    "Invalid history length {}: must be at least 1",
                    requested
                )
            }
            LifeError::FillLimitExceeded { limit } => {
                write!(f, "Fill exceeds the limit of {} cells", limit)
            }
            LifeError::InvalidRule { rule } => {
                write!(f, "Invalid rule '{}': expected B/S notation like B3/S23", rule)
            }
            LifeError::RuleMismatch { expected, found } => {
                write!(
                    f,
                    "Chains were rendered under {} but the current rule is {}",
                    found, expected
                )
            }
            LifeError::InvalidArgument { message } => {
                write!(f, "Invalid argument: {}", message)
            }
            LifeError::Io(e) => write!(f, "I/O error: {}", e),
            LifeError::Serialization(e) => write!(f, "Chain encoding error: {}", e),
        }
    }
}

impl std::error::Error for LifeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LifeError::Io(e) => Some(e),
            LifeError::Serialization(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for LifeError {
    fn from(e: std::io::Error) -> Self {
        LifeError::Io(e)
    }
}

impl From<serde_json::Error> for LifeError {
    fn from(e: serde_json::Error) -> Self {
        LifeError::Serialization(e)
    }
}
