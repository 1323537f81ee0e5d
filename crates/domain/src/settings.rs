//! Validation settings.
//!
//! Thresholds and the endpoint mode the checklist runs with. Defaults match
//! the contract of the transcription service.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::response::StatusCode;
use crate::transcription::SUMMARY_FAILURE_SENTINEL;

/// Which endpoint variant the response came from.
///
/// The two variants have mutually exclusive contracts for the
/// `transcription` field, so exactly one checklist runs per pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EndpointMode {
    /// Transcription and summary are both returned.
    #[default]
    Full,
    /// Only the summary is returned; the transcription is blank.
    SummaryOnly,
}

impl EndpointMode {
    /// Path of this variant below the service base URL.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Full => "/api/transcribe",
            Self::SummaryOnly => "/api/transcribe/summary-only",
        }
    }

    /// Stable lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::SummaryOnly => "summary-only",
        }
    }
}

impl fmt::Display for EndpointMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EndpointMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "full" => Ok(Self::Full),
            "summary-only" | "summaryonly" => Ok(Self::SummaryOnly),
            other => Err(DomainError::UnknownMode(other.to_string())),
        }
    }
}

const fn default_expected_status() -> u16 {
    StatusCode::OK.as_u16()
}

fn default_latency_floor_ms() -> u64 {
    100
}

fn default_latency_ceiling_ms() -> u64 {
    60_000
}

fn default_min_summary_length() -> usize {
    10
}

fn default_min_timestamp_year() -> i32 {
    2020
}

fn default_forbidden_terms() -> Vec<String> {
    ["error", "exception", "failed"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_summary_sentinel() -> String {
    SUMMARY_FAILURE_SENTINEL.to_string()
}

/// Thresholds for one validation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationSettings {
    /// Which checklist variant to run.
    #[serde(default)]
    pub mode: EndpointMode,
    /// Status code a successful call reports.
    #[serde(default = "default_expected_status")]
    pub expected_status: u16,
    /// Elapsed time must be strictly above this.
    #[serde(default = "default_latency_floor_ms")]
    pub latency_floor_ms: u64,
    /// Elapsed time must be at most this.
    #[serde(default = "default_latency_ceiling_ms")]
    pub latency_ceiling_ms: u64,
    /// Summary must be strictly longer than this.
    #[serde(default = "default_min_summary_length")]
    pub min_summary_length: usize,
    /// Timestamp year must be strictly above this.
    #[serde(default = "default_min_timestamp_year")]
    pub min_timestamp_year: i32,
    /// Lowercase terms that must not appear anywhere in the body.
    #[serde(default = "default_forbidden_terms")]
    pub forbidden_terms: Vec<String>,
    /// Text that marks a leaked summarizer failure.
    #[serde(default = "default_summary_sentinel")]
    pub summary_sentinel: String,
}

impl Default for ValidationSettings {
    fn default() -> Self {
        Self {
            mode: EndpointMode::default(),
            expected_status: default_expected_status(),
            latency_floor_ms: default_latency_floor_ms(),
            latency_ceiling_ms: default_latency_ceiling_ms(),
            min_summary_length: default_min_summary_length(),
            min_timestamp_year: default_min_timestamp_year(),
            forbidden_terms: default_forbidden_terms(),
            summary_sentinel: default_summary_sentinel(),
        }
    }
}

impl ValidationSettings {
    /// Default settings for the given mode.
    #[must_use]
    pub fn for_mode(mode: EndpointMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Checks that the thresholds describe a usable checklist.
    ///
    /// # Errors
    ///
    /// Returns an error if the latency window is empty or a forbidden term is
    /// blank.
    pub fn validate(&self) -> DomainResult<()> {
        if self.latency_floor_ms >= self.latency_ceiling_ms {
            return Err(DomainError::InvalidLatencyBounds {
                floor_ms: self.latency_floor_ms,
                ceiling_ms: self.latency_ceiling_ms,
            });
        }
        if self.forbidden_terms.iter().any(|t| t.trim().is_empty()) {
            return Err(DomainError::EmptyForbiddenTerm);
        }
        Ok(())
    }
}
