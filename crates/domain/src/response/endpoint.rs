//! Endpoint response type
//!
//! Contains the status code, timing and raw body of one call to the
//! transcription endpoint, as handed over by whatever issued the request.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// HTTP status code with semantic helpers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatusCode(pub u16);

impl StatusCode {
    /// The only status the transcription endpoint reports on success.
    pub const OK: Self = Self(200);

    /// Creates a new `StatusCode`.
    #[must_use]
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Returns the numeric status code.
    #[must_use]
    pub const fn as_u16(&self) -> u16 {
        self.0
    }

    /// Returns the canonical reason phrase for the codes the service emits.
    #[must_use]
    pub const fn reason_phrase(&self) -> &'static str {
        match self.0 {
            200 => "OK",
            400 => "Bad Request",
            401 => "Unauthorized",
            404 => "Not Found",
            413 => "Payload Too Large",
            415 => "Unsupported Media Type",
            429 => "Too Many Requests",
            500 => "Internal Server Error",
            502 => "Bad Gateway",
            503 => "Service Unavailable",
            504 => "Gateway Timeout",
            _ => "Unknown",
        }
    }
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.0, self.reason_phrase())
    }
}

impl From<u16> for StatusCode {
    fn from(code: u16) -> Self {
        Self(code)
    }
}

/// One response from the transcription endpoint.
///
/// The body is kept as raw text: turning it into JSON is the first check of
/// the validation pass, and a body that fails to parse must still be
/// representable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Time between sending the request and receiving the full body.
    #[serde(rename = "elapsedMillis", with = "duration_millis")]
    pub elapsed: Duration,
    /// Raw response body, if any was received.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl EndpointResponse {
    /// Creates a response from its parts.
    #[must_use]
    pub fn new(status: impl Into<StatusCode>, elapsed: Duration, body: Option<String>) -> Self {
        Self {
            status: status.into(),
            elapsed,
            body,
        }
    }

    /// Creates a response whose body is the serialized form of `body`.
    #[must_use]
    pub fn with_json(
        status: impl Into<StatusCode>,
        elapsed_ms: u64,
        body: &serde_json::Value,
    ) -> Self {
        Self::new(
            status,
            Duration::from_millis(elapsed_ms),
            Some(body.to_string()),
        )
    }

    /// Elapsed time in whole milliseconds.
    #[must_use]
    pub fn elapsed_millis(&self) -> u64 {
        u64::try_from(self.elapsed.as_millis()).unwrap_or(u64::MAX)
    }
}

/// A response captured to disk, e.g. exported from an API client.
///
/// ```json
/// { "status": 200, "elapsedMillis": 4210, "body": { "transcription": "..." } }
/// ```
///
/// `body` may be any JSON value. A JSON string is taken verbatim as the raw
/// body text, which lets fixtures carry bodies that are not valid JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordedResponse {
    /// HTTP status code.
    pub status: u16,
    /// Elapsed time in milliseconds.
    pub elapsed_millis: u64,
    /// Body as recorded.
    #[serde(default)]
    pub body: Option<serde_json::Value>,
}

impl RecordedResponse {
    /// Parses a recorded response document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document does not have the recorded shape.
    pub fn parse(document: &str) -> DomainResult<Self> {
        serde_json::from_str(document)
            .map_err(|e| DomainError::InvalidRecordedResponse(e.to_string()))
    }
}

impl From<RecordedResponse> for EndpointResponse {
    fn from(recorded: RecordedResponse) -> Self {
        let body = recorded.body.map(|value| match value {
            serde_json::Value::String(raw) => raw,
            other => other.to_string(),
        });
        Self::new(
            recorded.status,
            Duration::from_millis(recorded.elapsed_millis),
            body,
        )
    }
}

mod duration_millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}
