//! Facts kept from the last successful call.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Variable holding the time of the last successful call.
pub const LAST_SUCCESSFUL_TEST: &str = "lastSuccessfulTest";
/// Variable holding the elapsed time of the last successful call.
pub const LAST_RESPONSE_TIME: &str = "lastResponseTime";
/// Variable holding the transcription length of the last successful call.
pub const LAST_TRANSCRIPTION_LENGTH: &str = "lastTranscriptionLength";
/// Variable holding the summary length of the last successful call.
pub const LAST_SUMMARY_LENGTH: &str = "lastSummaryLength";

/// What a successful call leaves behind for later runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingFacts {
    /// When the call was validated.
    pub last_successful_test: DateTime<Utc>,
    /// Elapsed time in milliseconds.
    pub last_response_time: u64,
    /// Reported transcription length, if the body had one.
    pub last_transcription_length: Option<u64>,
    /// Reported summary length, if the body had one.
    pub last_summary_length: Option<u64>,
}

impl TrackingFacts {
    /// Facts as store entries. Absent lengths produce no entry; see
    /// [`Self::missing_lengths`] for the keys to clear instead.
    #[must_use]
    pub fn entries(&self) -> Vec<(&'static str, Value)> {
        let mut entries = vec![
            (
                LAST_SUCCESSFUL_TEST,
                Value::String(
                    self.last_successful_test
                        .to_rfc3339_opts(SecondsFormat::Millis, true),
                ),
            ),
            (LAST_RESPONSE_TIME, Value::from(self.last_response_time)),
        ];
        if let Some(length) = self.last_transcription_length {
            entries.push((LAST_TRANSCRIPTION_LENGTH, Value::from(length)));
        }
        if let Some(length) = self.last_summary_length {
            entries.push((LAST_SUMMARY_LENGTH, Value::from(length)));
        }
        entries
    }

    /// Length variables this call did not report.
    #[must_use]
    pub fn missing_lengths(&self) -> Vec<&'static str> {
        [
            (LAST_TRANSCRIPTION_LENGTH, self.last_transcription_length),
            (LAST_SUMMARY_LENGTH, self.last_summary_length),
        ]
        .into_iter()
        .filter_map(|(key, length)| length.is_none().then_some(key))
        .collect()
    }

    /// Reads facts back from stored variables.
    ///
    /// Returns `None` until a successful call has been recorded.
    pub fn read<'a, F>(lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<&'a Value>,
    {
        let last_successful_test = lookup(LAST_SUCCESSFUL_TEST)
            .and_then(Value::as_str)
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())?
            .with_timezone(&Utc);
        let last_response_time = lookup(LAST_RESPONSE_TIME).and_then(Value::as_u64)?;

        Some(Self {
            last_successful_test,
            last_response_time,
            last_transcription_length: lookup(LAST_TRANSCRIPTION_LENGTH).and_then(Value::as_u64),
            last_summary_length: lookup(LAST_SUMMARY_LENGTH).and_then(Value::as_u64),
        })
    }
}
