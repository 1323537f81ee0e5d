//! Service health report.

use serde::{Deserialize, Serialize};

/// Body of the service's `/health` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceHealth {
    /// `UP` when the service is serving requests.
    pub status: String,
    /// Service name.
    #[serde(default)]
    pub service: Option<String>,
    /// Time the report was produced.
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl ServiceHealth {
    /// Status value of a healthy service.
    pub const UP: &'static str = "UP";

    /// Whether the service reports itself as up.
    #[must_use]
    pub fn is_up(&self) -> bool {
        self.status.eq_ignore_ascii_case(Self::UP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_service_health() {
        let health: ServiceHealth = serde_json::from_str(
            r#"{"status": "UP", "service": "Audio Transcription Service", "timestamp": "2024-05-01T10:00:00Z"}"#,
        )
        .unwrap();
        assert!(health.is_up());
        assert_eq!(health.service.as_deref(), Some("Audio Transcription Service"));
    }

    #[test]
    fn test_down_status() {
        let health: ServiceHealth = serde_json::from_str(r#"{"status": "DOWN"}"#).unwrap();
        assert!(!health.is_up());
    }
}
