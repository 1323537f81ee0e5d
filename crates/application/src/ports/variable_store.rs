//! Variable store port
//!
//! Defines the key/value store that tracking facts are written to.

use std::path::PathBuf;

use serde_json::Value;

/// Errors that can occur when loading or saving stored variables.
#[derive(Debug, thiserror::Error)]
pub enum VariableStoreError {
    /// I/O error.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File the store is backed by.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// No location to keep the store was configured or discoverable.
    #[error("Could not determine where to keep stored variables")]
    NoLocation,
}

/// Mutable key/value store scoped to a run or collection.
///
/// Writes overwrite; nothing accumulates. Backing storage, if any, is loaded
/// and flushed by the adapter outside a validation pass.
pub trait VariableStore {
    /// Returns the value stored under `key`.
    fn get(&self, key: &str) -> Option<&Value>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: Value);

    /// Removes `key`, returning its previous value.
    fn remove(&mut self, key: &str) -> Option<Value>;

    /// All stored keys, sorted.
    fn keys(&self) -> Vec<String>;
}
