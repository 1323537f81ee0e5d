//! Terminal rendering of a validation run.

use std::fmt::Write as _;

use scribecheck_application::ValidationRun;

/// Formats the check list, summary line and metrics.
pub fn render_terminal(run: &ValidationRun) -> String {
    let mut out = String::new();
    let report = &run.report;

    let _ = writeln!(out, "Transcription endpoint checks ({})", report.mode);
    for result in &report.results {
        let _ = write!(
            out,
            "  [{}] {}",
            result.outcome.label(),
            result.check.description()
        );
        match (&result.actual, &result.message) {
            (Some(actual), Some(message)) => {
                let _ = write!(out, ": {message} ({actual})");
            }
            (Some(text), None) | (None, Some(text)) => {
                let _ = write!(out, ": {text}");
            }
            (None, None) => {}
        }
        out.push('\n');
    }

    let _ = writeln!(
        out,
        "\n{} passed, {} failed, {} skipped ({:.1}% pass rate)",
        report.passed,
        report.failed,
        report.skipped,
        report.pass_rate()
    );

    let metrics = &run.metrics;
    let _ = writeln!(
        out,
        "Response time {}ms ({}), compression {}",
        metrics.elapsed_millis, metrics.performance_bucket, metrics.compression_ratio_percent
    );
    out
}
