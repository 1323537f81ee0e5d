//! Response validation
//!
//! Runs the ordered transcription checklist against one endpoint response.
//! The runner is pure: it never touches the variable store or the network.

mod runner;

pub use runner::{ChecklistRunner, ParsedResponse};
