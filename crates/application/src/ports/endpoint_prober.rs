//! Endpoint prober port
//!
//! Sends a single request to the transcription service so that its response
//! can be validated.

use std::path::Path;

use async_trait::async_trait;
use scribecheck_domain::{EndpointMode, EndpointResponse, ServiceHealth};
use thiserror::Error;

/// Errors that can occur while probing the service.
#[derive(Debug, Clone, Error)]
pub enum ProbeError {
    /// Base URL is malformed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The audio file could not be read.
    #[error("Cannot read audio file {path}: {message}")]
    AudioFile {
        /// File that was requested.
        path: String,
        /// Underlying error message.
        message: String,
    },

    /// The request did not complete in time.
    #[error("Request timed out after {timeout_ms}ms")]
    Timeout {
        /// Configured timeout.
        timeout_ms: u64,
    },

    /// The service could not be reached.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// The health endpoint returned something that is not a health report.
    #[error("Unexpected health response: {0}")]
    UnexpectedHealth(String),

    /// Any other transport failure.
    #[error("{0}")]
    Other(String),
}

/// Port for calling the transcription service.
#[async_trait]
pub trait EndpointProber: Send + Sync {
    /// Uploads `audio` to the endpoint variant selected by `mode`.
    ///
    /// Any HTTP status is a successful probe; only transport failures are
    /// errors.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the request fails.
    async fn transcribe(
        &self,
        audio: &Path,
        mode: EndpointMode,
    ) -> Result<EndpointResponse, ProbeError>;

    /// Reads the service health report.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not a health
    /// report.
    async fn health(&self) -> Result<ServiceHealth, ProbeError>;
}
