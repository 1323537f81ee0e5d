//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or processing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The endpoint mode name is not recognised.
    #[error("unknown endpoint mode: {0}")]
    UnknownMode(String),

    /// The latency window is empty or inverted.
    #[error("invalid latency bounds: floor {floor_ms}ms must be below ceiling {ceiling_ms}ms")]
    InvalidLatencyBounds {
        /// Exclusive lower bound in milliseconds.
        floor_ms: u64,
        /// Inclusive upper bound in milliseconds.
        ceiling_ms: u64,
    },

    /// A forbidden term is empty and would match every body.
    #[error("forbidden terms must not be empty strings")]
    EmptyForbiddenTerm,

    /// A recorded response could not be interpreted.
    #[error("invalid recorded response: {0}")]
    InvalidRecordedResponse(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
