//! Application use cases (validation and probing orchestration).

mod probe_endpoint;
mod validate_response;

pub use probe_endpoint::{CheckHealth, ProbeEndpoint};
pub use validate_response::{ValidateResponse, ValidationRun};
