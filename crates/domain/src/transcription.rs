//! Body contract of the transcription endpoint.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// JSON key holding the transcribed text.
pub const FIELD_TRANSCRIPTION: &str = "transcription";
/// JSON key holding the generated summary.
pub const FIELD_SUMMARY: &str = "summary";
/// JSON key holding the transcription length.
pub const FIELD_TRANSCRIPTION_LENGTH: &str = "transcriptionLength";
/// JSON key holding the summary length.
pub const FIELD_SUMMARY_LENGTH: &str = "summaryLength";
/// JSON key holding the response creation time.
pub const FIELD_TIMESTAMP: &str = "timestamp";

/// Every key a well-formed body carries, in wire order.
pub const REQUIRED_FIELDS: [&str; 5] = [
    FIELD_TRANSCRIPTION,
    FIELD_SUMMARY,
    FIELD_TRANSCRIPTION_LENGTH,
    FIELD_SUMMARY_LENGTH,
    FIELD_TIMESTAMP,
];

/// Text the service puts in `summary` when the summarizer itself failed.
pub const SUMMARY_FAILURE_SENTINEL: &str = "Error generating summary";

/// Length of a string as the service counts it (UTF-16 code units).
#[must_use]
pub fn text_length(text: &str) -> usize {
    text.encode_utf16().count()
}

/// Reads a reported length field.
///
/// Accepts non-negative integers, including integral floats such as
/// `1000.0`. Anything else counts as not reported.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn reported_length(value: &serde_json::Value) -> Option<u64> {
    value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|n| *n >= 0.0 && n.fract() == 0.0 && *n < u64::MAX as f64)
            .map(|n| n as u64)
    })
}

/// The body the transcription endpoint returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptionResult {
    /// Transcribed text; empty for the summary-only endpoint.
    pub transcription: String,
    /// Generated summary.
    pub summary: String,
    /// Length of `transcription`.
    pub transcription_length: usize,
    /// Length of `summary`.
    pub summary_length: usize,
    /// ISO-8601 creation time.
    pub timestamp: String,
}

impl TranscriptionResult {
    /// Builds a result whose length fields agree with its texts.
    #[must_use]
    pub fn new(
        transcription: impl Into<String>,
        summary: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let transcription = transcription.into();
        let summary = summary.into();
        Self {
            transcription_length: text_length(&transcription),
            summary_length: text_length(&summary),
            transcription,
            summary,
            timestamp: timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    /// Serializes the result into the wire JSON value.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            FIELD_TRANSCRIPTION: self.transcription,
            FIELD_SUMMARY: self.summary,
            FIELD_TRANSCRIPTION_LENGTH: self.transcription_length,
            FIELD_SUMMARY_LENGTH: self.summary_length,
            FIELD_TIMESTAMP: self.timestamp,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_reported_length_accepts_integral_numbers() {
        assert_eq!(reported_length(&serde_json::json!(1000)), Some(1000));
        assert_eq!(reported_length(&serde_json::json!(1000.0)), Some(1000));
        assert_eq!(reported_length(&serde_json::json!(12.5)), None);
        assert_eq!(reported_length(&serde_json::json!(-3)), None);
        assert_eq!(reported_length(&serde_json::json!("1000")), None);
    }

    #[test]
    fn test_new_computes_lengths() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        let result = TranscriptionResult::new("hello world", "hi", at);

        assert_eq!(result.transcription_length, 11);
        assert_eq!(result.summary_length, 2);
        assert_eq!(result.timestamp, "2024-05-01T10:00:00.000Z");
    }

    #[test]
    fn test_text_length_counts_utf16_units() {
        assert_eq!(text_length("abc"), 3);
        assert_eq!(text_length("café"), 4);
        assert_eq!(text_length("🎤"), 2);
    }

    #[test]
    fn test_wire_names_are_camel_case() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        let json = TranscriptionResult::new("a", "b", at).to_json();
        let object = json.as_object().unwrap();

        for field in REQUIRED_FIELDS {
            assert!(object.contains_key(field), "missing {field}");
        }
    }
}
