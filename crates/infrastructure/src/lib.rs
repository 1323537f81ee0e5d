//! Scribecheck Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer, plus configuration loading.

pub mod adapters;
pub mod config;
pub mod persistence;
pub mod report;
pub mod serialization;

pub use adapters::{ReqwestEndpointProber, SystemClock};
pub use config::{AppConfig, ConfigError, ProbeConfig, StoreConfig};
pub use persistence::{FileVariableStore, InMemoryVariableStore};
pub use report::{DEFAULT_TEMPLATE, HtmlReportRenderer, report_json, write_report};
pub use serialization::{SerializationError, from_json_bytes, to_json_stable, to_json_stable_bytes};
