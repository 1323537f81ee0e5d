//! Checklist runner implementation.
//!
//! Executes the transcription checklist against a response and produces a
//! check report. Every check runs; none of them can stop the others.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use scribecheck_domain::testing::{Check, CheckReport, CheckResult};
use scribecheck_domain::transcription::{
    FIELD_SUMMARY, FIELD_SUMMARY_LENGTH, FIELD_TIMESTAMP, FIELD_TRANSCRIPTION,
    FIELD_TRANSCRIPTION_LENGTH, REQUIRED_FIELDS, reported_length, text_length,
};
use scribecheck_domain::{PerformanceBucket, ValidationSettings};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::ports::ResponseContext;

/// A response with its body parsed once for all checks.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedResponse {
    /// HTTP status code.
    pub status: u16,
    /// Elapsed time in milliseconds.
    pub elapsed_ms: u64,
    body: Result<Value, String>,
}

impl ParsedResponse {
    /// Reads and parses the response behind `context`.
    pub fn from_context<C: ResponseContext + ?Sized>(context: &C) -> Self {
        let body = match context.body_text() {
            None => Err("response has no body".to_string()),
            Some(text) if text.trim().is_empty() => Err("response body is empty".to_string()),
            Some(text) => serde_json::from_str::<Value>(text).map_err(|e| e.to_string()),
        };

        Self {
            status: context.status_code(),
            elapsed_ms: context.elapsed_millis(),
            body,
        }
    }

    /// The parsed body, unless it is missing, unparseable or `null`.
    #[must_use]
    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref().ok().filter(|v| !v.is_null())
    }

    /// Why the body could not be parsed, if it could not.
    #[must_use]
    pub fn parse_error(&self) -> Option<&str> {
        self.body.as_ref().err().map(String::as_str)
    }

    fn field(&self, key: &str) -> Option<&Value> {
        self.body().and_then(|b| b.get(key))
    }
}

/// Runs the checklist selected by its settings.
#[derive(Debug, Clone, Default)]
pub struct ChecklistRunner {
    settings: ValidationSettings,
}

impl ChecklistRunner {
    /// Create a runner with the given settings.
    #[must_use]
    pub const fn new(settings: ValidationSettings) -> Self {
        Self { settings }
    }

    /// The settings this runner checks against.
    #[must_use]
    pub const fn settings(&self) -> &ValidationSettings {
        &self.settings
    }

    /// Run the whole checklist against a response.
    #[must_use]
    pub fn run<C: ResponseContext + ?Sized>(&self, context: &C) -> CheckReport {
        self.run_parsed(&ParsedResponse::from_context(context))
    }

    /// Run the whole checklist against an already parsed response.
    #[must_use]
    pub fn run_parsed(&self, response: &ParsedResponse) -> CheckReport {
        if let Some(error) = response.parse_error() {
            warn!(%error, "response body is not JSON; dependent checks will skip");
        }

        let results = Check::checklist(&self.settings)
            .into_iter()
            .map(|check| {
                let result = self.run_check(check, response);
                let message = result.message.as_deref().unwrap_or("");
                if result.failed() {
                    warn!(check = %result.check.description(), message, "check failed");
                } else {
                    debug!(
                        check = %result.check.description(),
                        outcome = result.outcome.label(),
                        message,
                        "check evaluated"
                    );
                }
                result
            })
            .collect();

        CheckReport::new(self.settings.mode, results)
    }

    /// Run a single check against a response.
    #[must_use]
    pub fn run_check(&self, check: Check, response: &ParsedResponse) -> CheckResult {
        match check {
            Check::ParsesAsJson => Self::check_parses_as_json(check, response),
            Check::StatusCode { expected } => Self::check_status_code(check, response, expected),
            Check::RequiredFields => Self::check_required_fields(check, response),
            Check::TranscriptionValid => Self::check_transcription_valid(check, response),
            Check::TranscriptionEmpty => Self::check_transcription_empty(check, response),
            Check::SummaryValid { min_length } => {
                self.check_summary_valid(check, response, min_length)
            }
            Check::SummaryPresent { min_length } => {
                Self::check_summary_present(check, response, min_length)
            }
            Check::TimestampValid { min_year } => {
                Self::check_timestamp_valid(check, response, min_year)
            }
            Check::ResponseTime {
                floor_ms,
                ceiling_ms,
            } => Self::check_response_time(check, response, floor_ms, ceiling_ms),
            Check::PerformanceCategory => Self::check_performance_category(check, response),
            Check::ContentQuality => Self::check_content_quality(check, response),
            Check::NoErrorMessages => self.check_no_error_messages(check, response),
        }
    }

    fn check_parses_as_json(check: Check, response: &ParsedResponse) -> CheckResult {
        match &response.body {
            Err(error) => CheckResult::skip(check, format!("Response is not valid JSON: {error}")),
            Ok(Value::Object(_)) => CheckResult::pass(check),
            Ok(other) => CheckResult::fail_with_value(
                check,
                json_type(other),
                format!("Expected a JSON object, got {}", json_type(other)),
            ),
        }
    }

    fn check_status_code(check: Check, response: &ParsedResponse, expected: u16) -> CheckResult {
        let actual = response.status;
        if actual == expected {
            CheckResult::pass_with_value(check, actual.to_string())
        } else {
            CheckResult::fail_with_value(
                check,
                actual.to_string(),
                format!("Expected status {expected}, got {actual}"),
            )
        }
    }

    fn check_required_fields(check: Check, response: &ParsedResponse) -> CheckResult {
        let Some(Value::Object(object)) = response.body() else {
            return CheckResult::fail(check, "Response body is not a JSON object");
        };

        let missing: Vec<&str> = REQUIRED_FIELDS
            .iter()
            .copied()
            .filter(|field| !object.contains_key(*field))
            .collect();

        if missing.is_empty() {
            CheckResult::pass(check)
        } else {
            CheckResult::fail_with_value(
                check,
                missing.join(", "),
                format!("Missing required field(s): {}", missing.join(", ")),
            )
        }
    }

    fn check_transcription_valid(check: Check, response: &ParsedResponse) -> CheckResult {
        let Some(value) = response.field(FIELD_TRANSCRIPTION) else {
            return CheckResult::skip(check, "transcription is absent");
        };
        let text = match string_field(FIELD_TRANSCRIPTION, value) {
            Ok(text) => text,
            Err((actual, message)) => return CheckResult::fail_with_value(check, actual, message),
        };
        let length = text_length(text);

        if let Err((actual, message)) = length_field_matches(
            FIELD_TRANSCRIPTION_LENGTH,
            response.field(FIELD_TRANSCRIPTION_LENGTH),
            length,
        ) {
            return CheckResult::fail_with_value(check, actual, message);
        }

        if length == 0 {
            return CheckResult::fail_with_value(check, "0", "Transcription should not be empty");
        }

        CheckResult::pass_with_value(check, format!("{length} chars"))
    }

    fn check_transcription_empty(check: Check, response: &ParsedResponse) -> CheckResult {
        let Some(value) = response.field(FIELD_TRANSCRIPTION) else {
            return CheckResult::skip(check, "transcription is absent");
        };
        if value.as_str() != Some("") {
            return CheckResult::fail_with_value(
                check,
                preview(value),
                "Summary-only transcription should be an empty string",
            );
        }

        match response.field(FIELD_TRANSCRIPTION_LENGTH) {
            Some(length) if length.as_f64() == Some(0.0) => CheckResult::pass(check),
            Some(length) => CheckResult::fail_with_value(
                check,
                length.to_string(),
                "transcriptionLength should be 0",
            ),
            None => CheckResult::fail(check, "transcriptionLength is missing"),
        }
    }

    fn check_summary_valid(
        &self,
        check: Check,
        response: &ParsedResponse,
        min_length: usize,
    ) -> CheckResult {
        let Some(value) = response.field(FIELD_SUMMARY) else {
            return CheckResult::skip(check, "summary is absent");
        };
        let text = match string_field(FIELD_SUMMARY, value) {
            Ok(text) => text,
            Err((actual, message)) => return CheckResult::fail_with_value(check, actual, message),
        };
        let length = text_length(text);

        if let Err((actual, message)) = length_field_matches(
            FIELD_SUMMARY_LENGTH,
            response.field(FIELD_SUMMARY_LENGTH),
            length,
        ) {
            return CheckResult::fail_with_value(check, actual, message);
        }

        if length <= min_length {
            return CheckResult::fail_with_value(
                check,
                length.to_string(),
                format!("Summary should be meaningful (>{min_length} chars)"),
            );
        }

        let sentinel = &self.settings.summary_sentinel;
        if text.contains(sentinel.as_str()) {
            return CheckResult::fail_with_value(
                check,
                preview(value),
                format!("Summary contains '{sentinel}'"),
            );
        }

        CheckResult::pass_with_value(check, format!("{length} chars"))
    }

    fn check_summary_present(
        check: Check,
        response: &ParsedResponse,
        min_length: usize,
    ) -> CheckResult {
        let Some(value) = response.field(FIELD_SUMMARY) else {
            return CheckResult::skip(check, "summary is absent");
        };
        let text = match string_field(FIELD_SUMMARY, value) {
            Ok(text) => text,
            Err((actual, message)) => return CheckResult::fail_with_value(check, actual, message),
        };
        let length = text_length(text);
        if length <= min_length {
            return CheckResult::fail_with_value(
                check,
                length.to_string(),
                format!("Summary should be longer than {min_length} chars"),
            );
        }

        #[allow(clippy::cast_precision_loss)]
        let floor = min_length as f64;
        match response.field(FIELD_SUMMARY_LENGTH) {
            Some(reported) if reported.as_f64().is_some_and(|n| n > floor) => {
                CheckResult::pass_with_value(check, format!("{length} chars"))
            }
            Some(reported) => CheckResult::fail_with_value(
                check,
                reported.to_string(),
                format!("summaryLength should be above {min_length}"),
            ),
            None => CheckResult::fail(check, "summaryLength is missing"),
        }
    }

    fn check_timestamp_valid(check: Check, response: &ParsedResponse, min_year: i32) -> CheckResult {
        let parsed = match response.field(FIELD_TIMESTAMP) {
            None | Some(Value::Null | Value::Bool(false)) => {
                return CheckResult::skip(check, "timestamp is absent");
            }
            Some(Value::Number(n)) if n.as_f64() == Some(0.0) => {
                return CheckResult::skip(check, "timestamp is zero");
            }
            Some(Value::String(text)) if text.is_empty() => {
                return CheckResult::skip(check, "timestamp is empty");
            }
            Some(Value::String(text)) => parse_timestamp(text),
            Some(Value::Number(millis)) => millis
                .as_i64()
                .and_then(DateTime::<Utc>::from_timestamp_millis),
            Some(_) => None,
        };
        let raw = response.field(FIELD_TIMESTAMP).map(preview).unwrap_or_default();

        let Some(timestamp) = parsed else {
            return CheckResult::fail_with_value(check, raw, "Timestamp is not a valid date");
        };
        if timestamp.year() <= min_year {
            return CheckResult::fail_with_value(
                check,
                raw,
                format!("Timestamp year {} should be after {min_year}", timestamp.year()),
            );
        }
        CheckResult::pass_with_value(check, raw)
    }

    fn check_response_time(
        check: Check,
        response: &ParsedResponse,
        floor_ms: u64,
        ceiling_ms: u64,
    ) -> CheckResult {
        let actual = response.elapsed_ms;
        let shown = format!("{actual}ms");
        if actual > ceiling_ms {
            CheckResult::fail_with_value(
                check,
                shown,
                format!("Response took {actual}ms, expected at most {ceiling_ms}ms"),
            )
        } else if actual <= floor_ms {
            CheckResult::fail_with_value(
                check,
                shown,
                format!("Response took {actual}ms, expected more than {floor_ms}ms"),
            )
        } else {
            CheckResult::pass_with_value(check, shown)
        }
    }

    fn check_performance_category(check: Check, response: &ParsedResponse) -> CheckResult {
        let elapsed = response.elapsed_ms;
        let bucket = PerformanceBucket::classify(elapsed);
        info!(bucket = %bucket, elapsed_ms = elapsed, "performance category");
        CheckResult::pass_with_note(
            check,
            bucket.as_str(),
            format!("{bucket} performance: {elapsed}ms"),
        )
    }

    #[allow(clippy::cast_precision_loss)]
    fn check_content_quality(check: Check, response: &ParsedResponse) -> CheckResult {
        let transcription = response
            .field(FIELD_TRANSCRIPTION_LENGTH)
            .and_then(reported_length);
        let summary = response.field(FIELD_SUMMARY_LENGTH).and_then(reported_length);

        let (Some(transcription), Some(summary)) = (transcription, summary) else {
            return CheckResult::skip(check, "length fields are absent");
        };
        if transcription == 0 {
            return CheckResult::skip(check, "transcription is empty; ratio undefined");
        }

        let ratio = summary as f64 / transcription as f64;
        let shown = format!(
            "transcription {transcription} chars, summary {summary} chars, compression {:.1}%",
            ratio * 100.0
        );
        info!(%shown, "content quality");

        if ratio < 1.0 {
            CheckResult::pass_with_value(check, shown)
        } else {
            CheckResult::fail_with_value(check, shown, "Summary should be shorter than transcription")
        }
    }

    fn check_no_error_messages(&self, check: Check, response: &ParsedResponse) -> CheckResult {
        let Some(body) = response.body() else {
            return CheckResult::skip(check, "no parsed body to scan");
        };
        let text = body.to_string().to_lowercase();
        let found: Vec<&str> = self
            .settings
            .forbidden_terms
            .iter()
            .map(String::as_str)
            .filter(|term| text.contains(&term.to_lowercase()))
            .collect();

        if found.is_empty() {
            CheckResult::pass(check)
        } else {
            CheckResult::fail_with_value(
                check,
                found.join(", "),
                format!("Response contains '{}'", found.join("', '")),
            )
        }
    }
}

/// Name of a JSON value's type, as shown in messages.
fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Short display form of a value, truncated to 100 characters.
fn preview(value: &Value) -> String {
    let text = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    if text.chars().count() > 100 {
        let head: String = text.chars().take(100).collect();
        format!("{head}...")
    } else {
        text
    }
}

fn string_field<'a>(name: &str, value: &'a Value) -> Result<&'a str, (String, String)> {
    value.as_str().ok_or_else(|| {
        (
            json_type(value).to_string(),
            format!("{name} should be a string, got {}", json_type(value)),
        )
    })
}

#[allow(clippy::cast_precision_loss)]
fn length_field_matches(
    name: &str,
    reported: Option<&Value>,
    actual: usize,
) -> Result<(), (String, String)> {
    let Some(reported) = reported else {
        return Err(("missing".to_string(), format!("{name} is missing")));
    };
    let Some(number) = reported.as_f64() else {
        return Err((
            json_type(reported).to_string(),
            format!("{name} should be a number, got {}", json_type(reported)),
        ));
    };
    if (number - actual as f64).abs() > f64::EPSILON {
        return Err((
            reported.to_string(),
            format!("{name} is {reported} but the text has {actual} chars"),
        ));
    }
    Ok(())
}

/// Parses an ISO-8601 timestamp; a value without offset is taken as UTC.
fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
