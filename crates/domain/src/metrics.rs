//! Metrics derived from a single response.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

use crate::transcription::{
    FIELD_SUMMARY_LENGTH, FIELD_TIMESTAMP, FIELD_TRANSCRIPTION_LENGTH, reported_length,
};

/// Coarse classification of elapsed time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PerformanceBucket {
    /// Under 5 seconds.
    Excellent,
    /// Under 15 seconds.
    Good,
    /// Under 30 seconds.
    Acceptable,
    /// Everything slower.
    Slow,
}

impl PerformanceBucket {
    /// Upper bound (exclusive) of the excellent bucket.
    pub const EXCELLENT_BELOW_MS: u64 = 5_000;
    /// Upper bound (exclusive) of the good bucket.
    pub const GOOD_BELOW_MS: u64 = 15_000;
    /// Upper bound (exclusive) of the acceptable bucket.
    pub const ACCEPTABLE_BELOW_MS: u64 = 30_000;

    /// Classifies an elapsed time.
    #[must_use]
    pub const fn classify(elapsed_ms: u64) -> Self {
        if elapsed_ms < Self::EXCELLENT_BELOW_MS {
            Self::Excellent
        } else if elapsed_ms < Self::GOOD_BELOW_MS {
            Self::Good
        } else if elapsed_ms < Self::ACCEPTABLE_BELOW_MS {
            Self::Acceptable
        } else {
            Self::Slow
        }
    }

    /// Display name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Acceptable => "Acceptable",
            Self::Slow => "Slow",
        }
    }
}

impl fmt::Display for PerformanceBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Summary length as a share of transcription length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CompressionRatio {
    /// Ratio times 100.
    Percent(f64),
    /// Transcription length is zero or unknown.
    NotAvailable,
}

impl CompressionRatio {
    /// Computes the ratio; a missing summary length counts as zero.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_lengths(transcription_length: Option<u64>, summary_length: Option<u64>) -> Self {
        match transcription_length {
            Some(total) if total > 0 => {
                let summary = summary_length.unwrap_or(0);
                Self::Percent(summary as f64 / total as f64 * 100.0)
            }
            _ => Self::NotAvailable,
        }
    }

    /// Percentage value, if available.
    #[must_use]
    pub const fn percent(self) -> Option<f64> {
        match self {
            Self::Percent(value) => Some(value),
            Self::NotAvailable => None,
        }
    }
}

impl fmt::Display for CompressionRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Percent(value) => write!(f, "{value:.1}"),
            Self::NotAvailable => f.write_str("N/A"),
        }
    }
}

impl Serialize for CompressionRatio {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Metrics for one response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    /// Summary length relative to transcription length.
    pub compression_ratio_percent: CompressionRatio,
    /// Elapsed time classification.
    pub performance_bucket: PerformanceBucket,
    /// Elapsed time in milliseconds.
    pub elapsed_millis: u64,
    /// Reported transcription length.
    pub transcription_length: Option<u64>,
    /// Reported summary length.
    pub summary_length: Option<u64>,
    /// Reported timestamp text.
    pub timestamp: Option<String>,
}

impl MetricsSnapshot {
    /// Derives metrics from the elapsed time and a parsed body.
    #[must_use]
    pub fn derive(elapsed_millis: u64, body: Option<&serde_json::Value>) -> Self {
        let field = |key: &str| body.and_then(|b| b.get(key));
        let transcription_length = field(FIELD_TRANSCRIPTION_LENGTH).and_then(reported_length);
        let summary_length = field(FIELD_SUMMARY_LENGTH).and_then(reported_length);
        let timestamp = field(FIELD_TIMESTAMP)
            .and_then(serde_json::Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Self {
            compression_ratio_percent: CompressionRatio::from_lengths(
                transcription_length,
                summary_length,
            ),
            performance_bucket: PerformanceBucket::classify(elapsed_millis),
            elapsed_millis,
            transcription_length,
            summary_length,
            timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_bucket_boundaries() {
        assert_eq!(PerformanceBucket::classify(0), PerformanceBucket::Excellent);
        assert_eq!(PerformanceBucket::classify(4_999), PerformanceBucket::Excellent);
        assert_eq!(PerformanceBucket::classify(5_000), PerformanceBucket::Good);
        assert_eq!(PerformanceBucket::classify(14_999), PerformanceBucket::Good);
        assert_eq!(PerformanceBucket::classify(15_000), PerformanceBucket::Acceptable);
        assert_eq!(PerformanceBucket::classify(29_999), PerformanceBucket::Acceptable);
        assert_eq!(PerformanceBucket::classify(30_000), PerformanceBucket::Slow);
    }

    #[test]
    fn test_ratio_formats_one_decimal() {
        let ratio = CompressionRatio::from_lengths(Some(1000), Some(200));
        assert_eq!(ratio.to_string(), "20.0");

        let ratio = CompressionRatio::from_lengths(Some(3), Some(1));
        assert_eq!(ratio.to_string(), "33.3");
    }

    #[test]
    fn test_ratio_guards_zero_and_missing() {
        assert_eq!(
            CompressionRatio::from_lengths(Some(0), Some(50)),
            CompressionRatio::NotAvailable
        );
        assert_eq!(
            CompressionRatio::from_lengths(None, Some(50)),
            CompressionRatio::NotAvailable
        );
        assert_eq!(CompressionRatio::NotAvailable.to_string(), "N/A");
    }

    #[test]
    fn test_ratio_serializes_as_text() {
        let json = serde_json::to_value(CompressionRatio::Percent(20.0)).unwrap();
        assert_eq!(json, json!("20.0"));
    }

    #[test]
    fn test_snapshot_from_body() {
        let body = json!({
            "transcriptionLength": 1000,
            "summaryLength": 200,
            "timestamp": "2024-05-01T10:00:00Z"
        });
        let snapshot = MetricsSnapshot::derive(7_500, Some(&body));

        assert_eq!(snapshot.performance_bucket, PerformanceBucket::Good);
        assert_eq!(snapshot.compression_ratio_percent.percent(), Some(20.0));
        assert_eq!(snapshot.transcription_length, Some(1000));
        assert_eq!(snapshot.timestamp.as_deref(), Some("2024-05-01T10:00:00Z"));
    }

    #[test]
    fn test_snapshot_without_body() {
        let snapshot = MetricsSnapshot::derive(200, None);
        assert_eq!(snapshot.compression_ratio_percent, CompressionRatio::NotAvailable);
        assert!(snapshot.summary_length.is_none());
        assert!(snapshot.timestamp.is_none());
    }
}
