//! Report renderer port

use scribecheck_domain::{Visualization, VisualizerPayload};

/// Turns a visualizer payload into a displayable report.
///
/// Rendering is pure: the same payload always yields the same
/// visualization.
pub trait ReportRenderer: Send + Sync {
    /// Renders the payload.
    fn render(&self, payload: &VisualizerPayload) -> Visualization;
}
