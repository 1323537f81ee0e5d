//! Endpoint response domain types

mod endpoint;
mod health;

pub use endpoint::{EndpointResponse, RecordedResponse, StatusCode};
pub use health::ServiceHealth;
