//! Error types shared by every semdrift component
//!
//! All failures are local and synchronous: each operation is a single pure
//! pass over its inputs, so nothing here is retried internally. Every
//! variant names the operation that failed so callers can diagnose the
//! offending input.

use thiserror::Error;

/// Errors for vectorization, distance, noise and resampling operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DriftError {
    #[error("{operation}: invalid input: {reason}")]
    InvalidInput {
        operation: &'static str,
        reason: String,
    },

    #[error("{operation}: dimension mismatch: {left} != {right}")]
    DimensionMismatch {
        operation: &'static str,
        left: usize,
        right: usize,
    },

    #[error("{operation}: cosine distance is undefined, {which} vector has zero magnitude")]
    UndefinedDistance {
        operation: &'static str,
        which: &'static str,
    },

    #[error("invalid alphabet: need at least 2 distinct symbols, got {size}")]
    InvalidAlphabet { size: usize },

    #[error("invalid noise level {value}: must be a finite value in [0, 1]")]
    InvalidNoiseLevel { value: f64 },

    #[error("{operation}: insufficient data: {reason}")]
    InsufficientData {
        operation: &'static str,
        reason: String,
    },

    #[error("{operation}: degenerate variance (pooled standard deviation is 0)")]
    DegenerateVariance { operation: &'static str },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(String),
}

impl From<std::io::Error> for DriftError {
    fn from(err: std::io::Error) -> Self {
        DriftError::Io(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DriftError>;

impl DriftError {
    pub(crate) fn invalid_input(operation: &'static str, reason: impl Into<String>) -> Self {
        DriftError::InvalidInput {
            operation,
            reason: reason.into(),
        }
    }

    pub(crate) fn insufficient_data(operation: &'static str, reason: impl Into<String>) -> Self {
        DriftError::InsufficientData {
            operation,
            reason: reason.into(),
        }
    }
}
