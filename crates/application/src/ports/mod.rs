//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the validator and its host.
//! Each port is a trait that can be implemented by adapters in the infrastructure layer.

mod clock;
mod endpoint_prober;
mod report_renderer;
mod response_context;
mod variable_store;

pub use clock::Clock;
pub use endpoint_prober::{EndpointProber, ProbeError};
pub use report_renderer::ReportRenderer;
pub use response_context::ResponseContext;
pub use variable_store::{VariableStore, VariableStoreError};
