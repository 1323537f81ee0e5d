//! Visualization payload for a successful response.

use serde::{Deserialize, Serialize};

use crate::metrics::{CompressionRatio, MetricsSnapshot, PerformanceBucket};

/// Placeholder text for values the body did not carry.
pub const NOT_AVAILABLE: &str = "N/A";

/// Flat key/value data substituted into the visualizer template.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualizerPayload {
    /// Transcription character count; zero when absent.
    pub transcription_length: u64,
    /// Summary character count; zero when absent.
    pub summary_length: u64,
    /// Elapsed time in milliseconds.
    pub response_time: u64,
    /// Compression ratio with one decimal, or `N/A`.
    pub compression_ratio: CompressionRatio,
    /// Performance bucket.
    pub efficiency: PerformanceBucket,
    /// Body timestamp, or `N/A`.
    pub timestamp: String,
}

impl VisualizerPayload {
    /// Builds the payload from a metrics snapshot.
    #[must_use]
    pub fn from_snapshot(snapshot: &MetricsSnapshot) -> Self {
        Self {
            transcription_length: snapshot.transcription_length.unwrap_or(0),
            summary_length: snapshot.summary_length.unwrap_or(0),
            response_time: snapshot.elapsed_millis,
            compression_ratio: snapshot.compression_ratio_percent,
            efficiency: snapshot.performance_bucket,
            timestamp: snapshot
                .timestamp
                .clone()
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        }
    }

    /// The payload as template variables, keyed by their wire names.
    #[must_use]
    pub fn variables(&self) -> Vec<(&'static str, String)> {
        vec![
            ("transcriptionLength", self.transcription_length.to_string()),
            ("summaryLength", self.summary_length.to_string()),
            ("responseTime", self.response_time.to_string()),
            ("compressionRatio", self.compression_ratio.to_string()),
            ("efficiency", self.efficiency.to_string()),
            ("timestamp", self.timestamp.clone()),
        ]
    }
}

/// One bar of the comparison chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartBar {
    /// Axis label.
    pub label: String,
    /// Character count.
    pub value: u64,
    /// Fill colour.
    pub color: String,
    /// Border colour.
    pub border_color: String,
}

/// Description of the length comparison chart.
///
/// This is metadata only; whoever displays the report picks the charting
/// library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSpec {
    /// Chart type, always `bar`.
    pub kind: String,
    /// Chart title.
    pub title: String,
    /// Dataset label.
    pub dataset_label: String,
    /// Y-axis title.
    pub y_axis_title: String,
    /// Bars in display order.
    pub bars: Vec<ChartBar>,
}

impl ChartSpec {
    /// Transcription vs summary character counts.
    #[must_use]
    pub fn length_comparison(payload: &VisualizerPayload) -> Self {
        Self {
            kind: "bar".to_string(),
            title: "Content Length Comparison".to_string(),
            dataset_label: "Character Count".to_string(),
            y_axis_title: "Characters".to_string(),
            bars: vec![
                ChartBar {
                    label: "Transcription".to_string(),
                    value: payload.transcription_length,
                    color: "#42a5f5".to_string(),
                    border_color: "#1976d2".to_string(),
                },
                ChartBar {
                    label: "Summary".to_string(),
                    value: payload.summary_length,
                    color: "#66bb6a".to_string(),
                    border_color: "#388e3c".to_string(),
                },
            ],
        }
    }
}

/// A rendered visualization: the template, its data and the result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Visualization {
    /// Template with `{{key}}` placeholders.
    pub template: String,
    /// Values substituted into the template.
    pub payload: VisualizerPayload,
    /// Chart description.
    pub chart: ChartSpec,
    /// Template with every placeholder substituted.
    pub html: String,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_payload_defaults_missing_values() {
        let snapshot = MetricsSnapshot::derive(1_200, Some(&json!({})));
        let payload = VisualizerPayload::from_snapshot(&snapshot);

        assert_eq!(payload.transcription_length, 0);
        assert_eq!(payload.summary_length, 0);
        assert_eq!(payload.compression_ratio.to_string(), "N/A");
        assert_eq!(payload.timestamp, "N/A");
        assert_eq!(payload.efficiency, PerformanceBucket::Excellent);
    }

    #[test]
    fn test_payload_serializes_wire_keys() {
        let body = json!({
            "transcriptionLength": 1000,
            "summaryLength": 200,
            "timestamp": "2024-05-01T10:00:00Z"
        });
        let snapshot = MetricsSnapshot::derive(20_000, Some(&body));
        let payload = serde_json::to_value(VisualizerPayload::from_snapshot(&snapshot)).unwrap();

        assert_eq!(
            payload,
            json!({
                "transcriptionLength": 1000,
                "summaryLength": 200,
                "responseTime": 20000,
                "compressionRatio": "20.0",
                "efficiency": "Acceptable",
                "timestamp": "2024-05-01T10:00:00Z"
            })
        );
    }

    #[test]
    fn test_chart_has_two_bars() {
        let body = json!({"transcriptionLength": 40, "summaryLength": 12});
        let payload = VisualizerPayload::from_snapshot(&MetricsSnapshot::derive(900, Some(&body)));
        let chart = ChartSpec::length_comparison(&payload);

        let bars: Vec<_> = chart.bars.iter().map(|b| (b.label.as_str(), b.value)).collect();
        assert_eq!(bars, vec![("Transcription", 40), ("Summary", 12)]);
    }
}
