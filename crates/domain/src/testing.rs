//! Response checks and their results.
//!
//! This module provides the named checks of the transcription checklist and
//! the pass/fail/skip records a validation pass produces.

use serde::{Deserialize, Serialize};

use crate::settings::{EndpointMode, ValidationSettings};

/// A named check run against an endpoint response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Check {
    /// Body parses as a JSON object.
    ParsesAsJson,
    /// Status code equals the expected one.
    StatusCode {
        /// Expected status code.
        expected: u16,
    },
    /// All five contract keys are present.
    RequiredFields,
    /// Transcription is a non-empty string matching its length field.
    TranscriptionValid,
    /// Transcription is blank (summary-only endpoint).
    TranscriptionEmpty,
    /// Summary is a meaningful string matching its length field.
    SummaryValid {
        /// Summary must be strictly longer than this.
        min_length: usize,
    },
    /// Summary is present and meaningful (summary-only endpoint).
    SummaryPresent {
        /// Summary must be strictly longer than this.
        min_length: usize,
    },
    /// Timestamp is a plausible ISO-8601 date.
    TimestampValid {
        /// Year must be strictly above this.
        min_year: i32,
    },
    /// Elapsed time lies inside the latency window.
    ResponseTime {
        /// Exclusive lower bound.
        floor_ms: u64,
        /// Inclusive upper bound.
        ceiling_ms: u64,
    },
    /// Elapsed time classification (informational).
    PerformanceCategory,
    /// Summary is shorter than the transcription.
    ContentQuality,
    /// Body carries no error wording.
    NoErrorMessages,
}

impl Check {
    /// The ordered checklist for the given settings.
    #[must_use]
    pub fn checklist(settings: &ValidationSettings) -> Vec<Self> {
        let mut checks = vec![
            Self::ParsesAsJson,
            Self::StatusCode {
                expected: settings.expected_status,
            },
            Self::RequiredFields,
        ];

        match settings.mode {
            EndpointMode::Full => {
                checks.push(Self::TranscriptionValid);
                checks.push(Self::SummaryValid {
                    min_length: settings.min_summary_length,
                });
            }
            EndpointMode::SummaryOnly => {
                checks.push(Self::TranscriptionEmpty);
                checks.push(Self::SummaryPresent {
                    min_length: settings.min_summary_length,
                });
            }
        }

        checks.extend([
            Self::TimestampValid {
                min_year: settings.min_timestamp_year,
            },
            Self::ResponseTime {
                floor_ms: settings.latency_floor_ms,
                ceiling_ms: settings.latency_ceiling_ms,
            },
            Self::PerformanceCategory,
            Self::ContentQuality,
            Self::NoErrorMessages,
        ]);
        checks
    }

    /// Get a human-readable name of this check.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::ParsesAsJson => "Response can be parsed as JSON".to_string(),
            Self::StatusCode { expected } => format!("Response status code is {expected}"),
            Self::RequiredFields => "Response has required fields".to_string(),
            Self::TranscriptionValid => "Transcription is valid".to_string(),
            Self::TranscriptionEmpty => "Summary-only: Transcription is empty".to_string(),
            Self::SummaryValid { .. } => "Summary is valid and meaningful".to_string(),
            Self::SummaryPresent { .. } => "Summary-only: Summary is present".to_string(),
            Self::TimestampValid { .. } => "Timestamp is valid ISO date".to_string(),
            Self::ResponseTime { .. } => {
                "Response time is reasonable for AI processing".to_string()
            }
            Self::PerformanceCategory => "Performance category".to_string(),
            Self::ContentQuality => "Content quality indicators".to_string(),
            Self::NoErrorMessages => "No error messages in response".to_string(),
        }
    }
}

/// Outcome of one check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckOutcome {
    /// Expectation met.
    Passed,
    /// Expectation not met.
    Failed,
    /// Precondition absent; nothing was asserted.
    Skipped,
}

impl CheckOutcome {
    /// Short uppercase label for terminal output.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Passed => "PASS",
            Self::Failed => "FAIL",
            Self::Skipped => "SKIP",
        }
    }
}

/// Result of running a single check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    /// The check that was run.
    pub check: Check,
    /// What happened.
    pub outcome: CheckOutcome,
    /// Actual value found (for display).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual: Option<String>,
    /// Failure reason, skip reason or informational note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CheckResult {
    /// Create a passed result.
    #[must_use]
    pub const fn pass(check: Check) -> Self {
        Self {
            check,
            outcome: CheckOutcome::Passed,
            actual: None,
            message: None,
        }
    }

    /// Create a passed result with actual value.
    #[must_use]
    pub fn pass_with_value(check: Check, actual: impl Into<String>) -> Self {
        Self {
            actual: Some(actual.into()),
            ..Self::pass(check)
        }
    }

    /// Create a passed result carrying an informational note.
    #[must_use]
    pub fn pass_with_note(
        check: Check,
        actual: impl Into<String>,
        note: impl Into<String>,
    ) -> Self {
        Self {
            actual: Some(actual.into()),
            message: Some(note.into()),
            ..Self::pass(check)
        }
    }

    /// Create a failed result.
    #[must_use]
    pub fn fail(check: Check, message: impl Into<String>) -> Self {
        Self {
            check,
            outcome: CheckOutcome::Failed,
            actual: None,
            message: Some(message.into()),
        }
    }

    /// Create a failed result with actual value.
    #[must_use]
    pub fn fail_with_value(
        check: Check,
        actual: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            actual: Some(actual.into()),
            ..Self::fail(check, message)
        }
    }

    /// Create a skipped result.
    #[must_use]
    pub fn skip(check: Check, reason: impl Into<String>) -> Self {
        Self {
            check,
            outcome: CheckOutcome::Skipped,
            actual: None,
            message: Some(reason.into()),
        }
    }

    /// Whether the check passed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.outcome == CheckOutcome::Passed
    }

    /// Whether the check failed.
    #[must_use]
    pub fn failed(&self) -> bool {
        self.outcome == CheckOutcome::Failed
    }
}

/// Results from running the checklist against one response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckReport {
    /// Checklist variant that was run.
    pub mode: EndpointMode,
    /// Individual check results, in checklist order.
    pub results: Vec<CheckResult>,
    /// Total number of checks.
    pub total: usize,
    /// Number of passed checks.
    pub passed: usize,
    /// Number of failed checks.
    pub failed: usize,
    /// Number of skipped checks.
    pub skipped: usize,
}

impl CheckReport {
    /// Create a report from individual results.
    #[must_use]
    pub fn new(mode: EndpointMode, results: Vec<CheckResult>) -> Self {
        let count = |outcome| results.iter().filter(|r| r.outcome == outcome).count();
        let passed = count(CheckOutcome::Passed);
        let failed = count(CheckOutcome::Failed);
        let skipped = count(CheckOutcome::Skipped);

        Self {
            mode,
            total: results.len(),
            passed,
            failed,
            skipped,
            results,
        }
    }

    /// Check if no check failed. Skipped checks do not count against this.
    #[must_use]
    pub const fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Share of decided checks that passed, as a percentage.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn pass_rate(&self) -> f64 {
        let decided = self.passed + self.failed;
        if decided == 0 {
            100.0
        } else {
            (self.passed as f64 / decided as f64) * 100.0
        }
    }

    /// Result for a given check, if it was part of the run.
    #[must_use]
    pub fn get(&self, check: &Check) -> Option<&CheckResult> {
        self.results.iter().find(|r| &r.check == check)
    }

    /// Iterates over failed results.
    pub fn failures(&self) -> impl Iterator<Item = &CheckResult> {
        self.results.iter().filter(|r| r.failed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_checklist_order() {
        let checks = Check::checklist(&ValidationSettings::default());
        assert_eq!(checks.len(), 10);
        assert_eq!(checks[0], Check::ParsesAsJson);
        assert_eq!(checks[3], Check::TranscriptionValid);
        assert_eq!(checks[4], Check::SummaryValid { min_length: 10 });
        assert_eq!(checks[9], Check::NoErrorMessages);
    }

    #[test]
    fn test_summary_only_checklist_swaps_content_checks() {
        let checks = Check::checklist(&ValidationSettings::for_mode(EndpointMode::SummaryOnly));
        assert!(checks.contains(&Check::TranscriptionEmpty));
        assert!(checks.contains(&Check::SummaryPresent { min_length: 10 }));
        assert!(!checks.contains(&Check::TranscriptionValid));
        assert!(!checks.iter().any(|c| matches!(c, Check::SummaryValid { .. })));
    }

    #[test]
    fn test_check_description() {
        assert_eq!(
            Check::StatusCode { expected: 200 }.description(),
            "Response status code is 200"
        );
        assert_eq!(
            Check::TranscriptionEmpty.description(),
            "Summary-only: Transcription is empty"
        );
    }

    #[test]
    fn test_report_counts() {
        let results = vec![
            CheckResult::pass(Check::ParsesAsJson),
            CheckResult::fail(Check::StatusCode { expected: 200 }, "got 500"),
            CheckResult::skip(Check::ContentQuality, "lengths missing"),
        ];

        let report = CheckReport::new(EndpointMode::Full, results);
        assert_eq!(report.total, 3);
        assert_eq!(report.passed, 1);
        assert_eq!(report.failed, 1);
        assert_eq!(report.skipped, 1);
        assert!(!report.all_passed());
        assert!((report.pass_rate() - 50.0).abs() < f64::EPSILON);
        assert_eq!(report.failures().count(), 1);
        assert!(report.get(&Check::ContentQuality).is_some());
        assert!(report.get(&Check::NoErrorMessages).is_none());
    }

    #[test]
    fn test_empty_report_passes() {
        let report = CheckReport::new(EndpointMode::Full, Vec::new());
        assert!(report.all_passed());
        assert!((report.pass_rate() - 100.0).abs() < f64::EPSILON);
    }
}
