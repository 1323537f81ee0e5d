//! Scribecheck Application - Use cases and ports
//!
//! This crate defines the application layer with:
//! - Port traits (interfaces for the clock, store, renderer and prober)
//! - The checklist runner
//! - Use case orchestration
//! - Application-level error handling

pub mod error;
pub mod ports;
pub mod template;
pub mod use_cases;
pub mod validator;

pub use error::{ApplicationError, ApplicationResult};
pub use ports::{
    Clock, EndpointProber, ProbeError, ReportRenderer, ResponseContext, VariableStore,
    VariableStoreError,
};
pub use use_cases::{CheckHealth, ProbeEndpoint, ValidateResponse, ValidationRun};
pub use validator::{ChecklistRunner, ParsedResponse};
