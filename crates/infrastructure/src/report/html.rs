//! HTML report rendering.

use askama::Template;
use scribecheck_application::ports::ReportRenderer;
use scribecheck_application::template::substitute;
use scribecheck_application::{ApplicationError, ApplicationResult};
use scribecheck_domain::{
    ChartBar, ChartSpec, CheckOutcome, CheckReport, Visualization, VisualizerPayload,
};
use tracing::warn;

/// The stock visualizer: metric panels and a length comparison bar chart.
pub const DEFAULT_TEMPLATE: &str = include_str!("visualizer.html");

/// Renders visualizer payloads into an HTML template.
///
/// Besides the payload keys, templates can use the chart keys `chartKind`,
/// `chartTitle`, `datasetLabel`, `yAxisTitle`, `chartLabels`, `chartColors`
/// and `chartBorderColors`. The list keys expand to quoted, comma separated
/// items ready to sit inside a JavaScript array literal.
#[derive(Debug, Clone)]
pub struct HtmlReportRenderer {
    template: String,
}

impl Default for HtmlReportRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE)
    }
}

/// Text run through askama's HTML escaper.
#[derive(Template)]
#[template(source = "{{ text }}", ext = "html")]
struct Escaped<'a> {
    text: &'a str,
}

/// One row of the check table.
struct CheckRow {
    color: &'static str,
    label: &'static str,
    check: String,
    details: String,
}

/// Standalone report page.
#[derive(Template)]
#[template(path = "report.html")]
struct ReportPage<'a> {
    mode: String,
    passed: usize,
    failed: usize,
    skipped: usize,
    total: usize,
    pass_rate: String,
    rows: Vec<CheckRow>,
    visualization: Option<&'a str>,
}

impl HtmlReportRenderer {
    /// Creates a renderer for a custom template.
    #[must_use]
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// The template this renderer fills.
    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Chart keys, already escaped.
    fn chart_variables(chart: &ChartSpec) -> Vec<(&'static str, String)> {
        let quoted = |pick: fn(&ChartBar) -> &str| {
            chart
                .bars
                .iter()
                .map(|bar| format!("'{}'", escape_html(pick(bar))))
                .collect::<Vec<_>>()
                .join(", ")
        };

        vec![
            ("chartKind", escape_html(&chart.kind)),
            ("chartTitle", escape_html(&chart.title)),
            ("datasetLabel", escape_html(&chart.dataset_label)),
            ("yAxisTitle", escape_html(&chart.y_axis_title)),
            ("chartLabels", quoted(|bar| bar.label.as_str())),
            ("chartColors", quoted(|bar| bar.color.as_str())),
            ("chartBorderColors", quoted(|bar| bar.border_color.as_str())),
        ]
    }

    /// Wraps a check report and its visualization into a standalone page.
    ///
    /// # Errors
    ///
    /// Returns an error if the page template fails to render.
    pub fn document(
        report: &CheckReport,
        visualization: Option<&Visualization>,
    ) -> ApplicationResult<String> {
        let rows = report
            .results
            .iter()
            .map(|result| CheckRow {
                color: match result.outcome {
                    CheckOutcome::Passed => "#388e3c",
                    CheckOutcome::Failed => "#d32f2f",
                    CheckOutcome::Skipped => "#757575",
                },
                label: result.outcome.label(),
                check: result.check.description(),
                details: match (&result.actual, &result.message) {
                    (Some(actual), Some(message)) => format!("{message} ({actual})"),
                    (Some(text), None) | (None, Some(text)) => text.clone(),
                    (None, None) => String::new(),
                },
            })
            .collect();

        ReportPage {
            mode: report.mode.to_string(),
            passed: report.passed,
            failed: report.failed,
            skipped: report.skipped,
            total: report.total,
            pass_rate: format!("{:.1}", report.pass_rate()),
            rows,
            visualization: visualization.map(|v| v.html.as_str()),
        }
        .render()
        .map_err(|e| ApplicationError::Render(e.to_string()))
    }
}

impl ReportRenderer for HtmlReportRenderer {
    fn render(&self, payload: &VisualizerPayload) -> Visualization {
        let chart = ChartSpec::length_comparison(payload);
        let mut variables: Vec<_> = payload
            .variables()
            .into_iter()
            .map(|(key, value)| (key, escape_html(&value)))
            .collect();
        variables.extend(Self::chart_variables(&chart));

        let result = substitute(&self.template, |key| {
            variables
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| value.clone())
        });
        if !result.is_complete() {
            warn!(keys = ?result.unresolved, "template has placeholders without values");
        }

        Visualization {
            template: self.template.clone(),
            payload: payload.clone(),
            chart,
            html: result.rendered,
        }
    }
}

fn escape_html(text: &str) -> String {
    Escaped { text }.render().unwrap_or_else(|e| {
        warn!(error = %e, "failed to escape value");
        String::new()
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use scribecheck_domain::testing::{Check, CheckResult};
    use scribecheck_domain::{EndpointMode, MetricsSnapshot};
    use serde_json::json;

    use super::*;

    fn payload() -> VisualizerPayload {
        let body = json!({
            "transcriptionLength": 1000,
            "summaryLength": 200,
            "timestamp": "2025-03-14T09:29:58.000Z"
        });
        VisualizerPayload::from_snapshot(&MetricsSnapshot::derive(7_500, Some(&body)))
    }

    #[test]
    fn test_default_template_is_fully_substituted() {
        let visualization = HtmlReportRenderer::default().render(&payload());

        assert!(!visualization.html.contains("{{"));
        assert!(visualization.html.contains("<strong>Compression Ratio:</strong> 20.0%"));
        assert!(visualization.html.contains("<strong>Processing Efficiency:</strong> Good"));
        assert!(visualization.html.contains("data: [1000, 200]"));
        assert!(visualization.html.contains("labels: ['Transcription', 'Summary']"));
        assert!(visualization.html.contains("backgroundColor: ['#42a5f5', '#66bb6a']"));
        assert_eq!(visualization.template, DEFAULT_TEMPLATE);
    }

    #[test]
    fn test_missing_values_render_as_not_available() {
        let empty = VisualizerPayload::from_snapshot(&MetricsSnapshot::derive(40_000, None));
        let visualization = HtmlReportRenderer::default().render(&empty);

        assert!(visualization.html.contains("<strong>Compression Ratio:</strong> N/A%"));
        assert!(visualization.html.contains("<strong>Timestamp:</strong> N/A"));
        assert!(visualization.html.contains("Slow"));
    }

    #[test]
    fn test_custom_template_keeps_unknown_placeholders() {
        let renderer = HtmlReportRenderer::new("{{efficiency}} / {{owner}}");
        let visualization = renderer.render(&payload());
        assert_eq!(visualization.html, "Good / {{owner}}");
    }

    #[test]
    fn test_values_are_escaped() {
        let mut hostile = payload();
        hostile.timestamp = "<script>alert(1)</script>".to_string();
        let visualization = HtmlReportRenderer::new("{{timestamp}}").render(&hostile);
        assert_eq!(visualization.html, "&lt;script&gt;alert(1)&lt;/script&gt;");
    }

    #[test]
    fn test_rendering_is_repeatable() {
        let renderer = HtmlReportRenderer::default();
        assert_eq!(renderer.render(&payload()), renderer.render(&payload()));
    }

    #[test]
    fn test_document_lists_checks() {
        let report = CheckReport::new(
            EndpointMode::Full,
            vec![
                CheckResult::pass(Check::ParsesAsJson),
                CheckResult::fail_with_value(
                    Check::StatusCode { expected: 200 },
                    "500",
                    "Expected status 200, got 500",
                ),
            ],
        );
        let page = HtmlReportRenderer::document(&report, None).unwrap();

        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("1 passed, 1 failed, 0 skipped of 2 (50.0% pass rate)"));
        assert!(page.contains("Expected status 200, got 500 (500)"));
        assert!(page.trim_end().ends_with("</html>"));
    }

    #[test]
    fn test_document_escapes_details_and_embeds_visualization() {
        let report = CheckReport::new(
            EndpointMode::Full,
            vec![CheckResult::fail_with_value(
                Check::NoErrorMessages,
                "error",
                "Found <b>error</b> & more",
            )],
        );
        let visualization = HtmlReportRenderer::default().render(&payload());
        let page = HtmlReportRenderer::document(&report, Some(&visualization)).unwrap();

        assert!(page.contains("Found &lt;b&gt;error&lt;/b&gt; &amp; more (error)"));
        assert!(page.contains("<strong>Compression Ratio:</strong> 20.0%"));
    }
}
