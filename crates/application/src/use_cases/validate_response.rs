//! Validate response use case

use scribecheck_domain::{
    CheckReport, MetricsSnapshot, TrackingFacts, ValidationSettings, Visualization,
    VisualizerPayload,
};
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::ports::{Clock, ReportRenderer, ResponseContext, VariableStore};
use crate::validator::{ChecklistRunner, ParsedResponse};

/// Everything one validation pass produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationRun {
    /// Identifier of this pass, for log correlation.
    pub run_id: Uuid,
    /// Check outcomes.
    pub report: CheckReport,
    /// Derived metrics.
    pub metrics: MetricsSnapshot,
    /// Rendered report, present for successful responses with a body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visualization: Option<Visualization>,
    /// Facts written to the store, present for successful responses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking: Option<TrackingFacts>,
}

impl ValidationRun {
    /// Whether no check failed.
    #[must_use]
    pub const fn succeeded(&self) -> bool {
        self.report.all_passed()
    }
}

/// Validates one endpoint response and records the outcome.
///
/// Runs the checklist, derives metrics, renders the visualization and
/// writes the tracking facts of a successful response into the store.
pub struct ValidateResponse<C, R> {
    runner: ChecklistRunner,
    clock: C,
    renderer: R,
}

impl<C: Clock, R: ReportRenderer> ValidateResponse<C, R> {
    /// Creates a new `ValidateResponse` use case.
    pub const fn new(settings: ValidationSettings, clock: C, renderer: R) -> Self {
        Self {
            runner: ChecklistRunner::new(settings),
            clock,
            renderer,
        }
    }

    /// The settings the checklist runs with.
    pub const fn settings(&self) -> &ValidationSettings {
        self.runner.settings()
    }

    /// Executes the use case.
    ///
    /// # Arguments
    /// * `response` - The response to validate
    /// * `store` - Variables kept between runs; receives the tracking facts
    pub fn execute<X, S>(&self, response: &X, store: &mut S) -> ValidationRun
    where
        X: ResponseContext + ?Sized,
        S: VariableStore + ?Sized,
    {
        let run_id = Uuid::now_v7();
        let parsed = ParsedResponse::from_context(response);
        debug!(%run_id, status = parsed.status, elapsed_ms = parsed.elapsed_ms, "validating response");

        let report = self.runner.run_parsed(&parsed);
        let metrics = MetricsSnapshot::derive(parsed.elapsed_ms, parsed.body());

        let successful = parsed.status == self.settings().expected_status;
        let visualization = (successful && parsed.body().is_some()).then(|| {
            self.renderer
                .render(&VisualizerPayload::from_snapshot(&metrics))
        });

        let tracking = successful.then(|| self.record(&metrics, parsed.body().is_some(), store));

        if report.all_passed() {
            info!(
                %run_id,
                passed = report.passed,
                skipped = report.skipped,
                compression = %metrics.compression_ratio_percent,
                bucket = %metrics.performance_bucket,
                "validation passed"
            );
        } else {
            warn!(
                %run_id,
                failed = report.failed,
                total = report.total,
                "validation failed"
            );
        }

        ValidationRun {
            run_id,
            report,
            metrics,
            visualization,
            tracking,
        }
    }

    /// Writes the facts of a successful call. Lengths the body did not
    /// report are cleared; without a parsed body they are left alone.
    fn record<S: VariableStore + ?Sized>(
        &self,
        metrics: &MetricsSnapshot,
        body_parsed: bool,
        store: &mut S,
    ) -> TrackingFacts {
        let facts = TrackingFacts {
            last_successful_test: self.clock.now(),
            last_response_time: metrics.elapsed_millis,
            last_transcription_length: metrics.transcription_length,
            last_summary_length: metrics.summary_length,
        };
        for (key, value) in facts.entries() {
            store.set(key, value);
        }
        if body_parsed {
            for key in facts.missing_lengths() {
                store.remove(key);
            }
        }
        debug!(keys = facts.entries().len(), "tracking facts recorded");
        facts
    }
}
