//! Probe endpoint use cases
//!
//! Call the live service, then hand the response to the validator.

use std::path::Path;

use scribecheck_domain::{EndpointMode, EndpointResponse, ServiceHealth};
use tracing::{info, warn};

use crate::ports::{EndpointProber, ProbeError};

/// Uploads an audio file to the transcription endpoint.
pub struct ProbeEndpoint<P> {
    prober: P,
}

impl<P: EndpointProber> ProbeEndpoint<P> {
    /// Creates a new `ProbeEndpoint` use case.
    pub const fn new(prober: P) -> Self {
        Self { prober }
    }

    /// Executes the use case.
    ///
    /// # Arguments
    /// * `audio` - Audio file to upload
    /// * `mode` - Which endpoint variant to call
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or the request fails.
    /// Any HTTP status, including 5xx, is returned as a response.
    pub async fn execute(
        &self,
        audio: &Path,
        mode: EndpointMode,
    ) -> Result<EndpointResponse, ProbeError> {
        info!(audio = %audio.display(), endpoint = mode.path(), "probing transcription endpoint");
        let response = self.prober.transcribe(audio, mode).await?;
        info!(
            status = %response.status,
            elapsed_ms = response.elapsed_millis(),
            "endpoint responded"
        );
        Ok(response)
    }
}

/// Reads the service health report and insists that it is up.
pub struct CheckHealth<P> {
    prober: P,
}

impl<P: EndpointProber> CheckHealth<P> {
    /// Creates a new `CheckHealth` use case.
    pub const fn new(prober: P) -> Self {
        Self { prober }
    }

    /// Executes the use case.
    ///
    /// # Errors
    /// Returns an error if the service is unreachable or reports a status
    /// other than `UP`.
    pub async fn execute(&self) -> Result<ServiceHealth, ProbeError> {
        let health = self.prober.health().await?;
        if health.is_up() {
            info!(service = health.service.as_deref().unwrap_or("unknown"), "service is up");
            Ok(health)
        } else {
            warn!(status = %health.status, "service is not up");
            Err(ProbeError::UnexpectedHealth(format!(
                "service reported status {}",
                health.status
            )))
        }
    }
}
