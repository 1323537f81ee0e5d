//! Endpoint prober implementation using reqwest.
//!
//! Uploads audio to the transcription service as `multipart/form-data` and
//! measures the time until the full body has arrived.

use std::path::Path;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Url};
use scribecheck_application::ports::{EndpointProber, ProbeError};
use scribecheck_domain::{EndpointMode, EndpointResponse, ServiceHealth};
use tracing::debug;

/// Multipart field the service reads the upload from.
const FILE_FIELD: &str = "file";

/// Path of the health endpoint.
const HEALTH_PATH: &str = "/health";

/// Prober for a running transcription service.
#[derive(Debug, Clone)]
pub struct ReqwestEndpointProber {
    client: Client,
    base_url: Url,
    timeout_ms: u64,
}

impl ReqwestEndpointProber {
    /// Creates a prober for the service at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not an absolute http(s) URL or the
    /// client cannot be created.
    pub fn new(base_url: &str, timeout_ms: u64) -> Result<Self, ProbeError> {
        let client = Client::builder()
            .user_agent(concat!("scribecheck/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ProbeError::Other(e.to_string()))?;

        Self::with_client(client, base_url, timeout_ms)
    }

    /// Creates a prober with a custom reqwest client.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not an absolute http(s) URL.
    pub fn with_client(client: Client, base_url: &str, timeout_ms: u64) -> Result<Self, ProbeError> {
        let base_url =
            Url::parse(base_url).map_err(|e| ProbeError::InvalidUrl(format!("{e}: {base_url}")))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ProbeError::InvalidUrl(format!(
                "unsupported scheme '{}': {base_url}",
                base_url.scheme()
            )));
        }

        Ok(Self {
            client,
            base_url,
            timeout_ms,
        })
    }

    /// Base URL of the service.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends `path` to the base URL, keeping any path prefix it has.
    fn endpoint(&self, path: &str) -> Result<Url, ProbeError> {
        let joined = format!("{}{path}", self.base_url.as_str().trim_end_matches('/'));
        Url::parse(&joined).map_err(|e| ProbeError::InvalidUrl(format!("{e}: {joined}")))
    }

    async fn audio_part(audio: &Path) -> Result<Part, ProbeError> {
        let content = tokio::fs::read(audio)
            .await
            .map_err(|e| ProbeError::AudioFile {
                path: audio.display().to_string(),
                message: e.to_string(),
            })?;

        let file_name = audio
            .file_name()
            .map_or_else(|| "audio".to_string(), |n| n.to_string_lossy().into_owned());
        let mime_type = mime_guess::from_path(audio).first_or_octet_stream();

        Part::bytes(content)
            .file_name(file_name)
            .mime_str(mime_type.as_ref())
            .map_err(|e| ProbeError::Other(e.to_string()))
    }

    /// Maps reqwest errors to `ProbeError`.
    fn map_error(error: &reqwest::Error, timeout_ms: u64) -> ProbeError {
        if error.is_timeout() {
            return ProbeError::Timeout { timeout_ms };
        }
        if error.is_connect() {
            return ProbeError::Connection(error.to_string());
        }
        ProbeError::Other(error.to_string())
    }
}

#[async_trait]
impl EndpointProber for ReqwestEndpointProber {
    async fn transcribe(
        &self,
        audio: &Path,
        mode: EndpointMode,
    ) -> Result<EndpointResponse, ProbeError> {
        let url = self.endpoint(mode.path())?;
        let form = Form::new().part(FILE_FIELD, Self::audio_part(audio).await?);
        debug!(%url, "uploading audio");

        let start = Instant::now();
        let response = self
            .client
            .post(url)
            .timeout(Duration::from_millis(self.timeout_ms))
            .multipart(form)
            .send()
            .await
            .map_err(|e| Self::map_error(&e, self.timeout_ms))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| Self::map_error(&e, self.timeout_ms))?;
        let elapsed = start.elapsed();

        Ok(EndpointResponse::new(status, elapsed, Some(body)))
    }

    async fn health(&self) -> Result<ServiceHealth, ProbeError> {
        let url = self.endpoint(HEALTH_PATH)?;
        let response = self
            .client
            .get(url)
            .timeout(Duration::from_millis(self.timeout_ms))
            .send()
            .await
            .map_err(|e| Self::map_error(&e, self.timeout_ms))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Self::map_error(&e, self.timeout_ms))?;

        serde_json::from_str(&body)
            .map_err(|e| ProbeError::UnexpectedHealth(format!("status {status}: {e}")))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_endpoint_keeps_base_path() {
        let prober = ReqwestEndpointProber::new("http://localhost:8080/svc/", 1_000).unwrap();
        assert_eq!(
            prober.endpoint(EndpointMode::SummaryOnly.path()).unwrap().as_str(),
            "http://localhost:8080/svc/api/transcribe/summary-only"
        );
        assert_eq!(
            prober.endpoint(HEALTH_PATH).unwrap().as_str(),
            "http://localhost:8080/svc/health"
        );
    }

    #[test]
    fn test_endpoint_without_path() {
        let prober = ReqwestEndpointProber::new("http://localhost:8080", 1_000).unwrap();
        assert_eq!(
            prober.endpoint(EndpointMode::Full.path()).unwrap().as_str(),
            "http://localhost:8080/api/transcribe"
        );
    }

    #[test]
    fn test_rejects_bad_urls() {
        assert!(matches!(
            ReqwestEndpointProber::new("not a url", 1_000),
            Err(ProbeError::InvalidUrl(_))
        ));
        assert!(matches!(
            ReqwestEndpointProber::new("ftp://example.com", 1_000),
            Err(ProbeError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_audio_fails_before_sending() {
        let prober = ReqwestEndpointProber::new("http://127.0.0.1:1", 1_000).unwrap();
        let result = prober
            .transcribe(Path::new("/definitely/not/here.wav"), EndpointMode::Full)
            .await;

        match result {
            Err(ProbeError::AudioFile { path, .. }) => {
                assert_eq!(path, "/definitely/not/here.wav");
            }
            other => panic!("expected audio file error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_audio_part_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.mp3");
        tokio::fs::write(&path, b"ID3").await.unwrap();

        assert!(ReqwestEndpointProber::audio_part(&path).await.is_ok());
    }
}
