//! Scribecheck Domain - Core validation types
//!
//! This crate defines the domain model for validating responses of the
//! audio transcription endpoint.
//! All types here are pure Rust with no I/O dependencies.

pub mod error;
pub mod metrics;
pub mod response;
pub mod settings;
pub mod testing;
pub mod tracking;
pub mod transcription;
pub mod visualization;

pub use error::{DomainError, DomainResult};
pub use metrics::{CompressionRatio, MetricsSnapshot, PerformanceBucket};
pub use response::{EndpointResponse, RecordedResponse, ServiceHealth, StatusCode};
pub use settings::{EndpointMode, ValidationSettings};
pub use testing::{Check, CheckOutcome, CheckReport, CheckResult};
pub use tracking::TrackingFacts;
pub use transcription::TranscriptionResult;
pub use visualization::{ChartBar, ChartSpec, Visualization, VisualizerPayload};
