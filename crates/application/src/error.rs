//! Application error types

use thiserror::Error;
use scribecheck_domain::DomainError;

use crate::ports::{ProbeError, VariableStoreError};

/// Application-level errors.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A domain validation error occurred.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// Loading or saving tracked variables failed.
    #[error("variable store error: {0}")]
    Store(#[from] VariableStoreError),

    /// Calling the endpoint failed.
    #[error("probe error: {0}")]
    Probe(#[from] ProbeError),

    /// Writing a report failed.
    #[error("render error: {0}")]
    Render(String),

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
