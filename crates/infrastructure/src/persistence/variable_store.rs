//! Variable store implementations.
//!
//! [`InMemoryVariableStore`] lives for one process. [`FileVariableStore`]
//! keeps its variables in a JSON file, by default in the platform config
//! directory:
//! - Linux: ~/.config/scribecheck/variables.json
//! - macOS: ~/Library/Application Support/scribecheck/variables.json
//! - Windows: %APPDATA%/scribecheck/variables.json

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use scribecheck_application::ports::{VariableStore, VariableStoreError};
use serde_json::Value;
use tokio::fs;
use tracing::debug;

use crate::serialization::{from_json_bytes, to_json_stable_bytes};

/// Variables held in memory only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InMemoryVariableStore {
    variables: BTreeMap<String, Value>,
}

impl InMemoryVariableStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// Whether the store holds no variables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// All variables, sorted by key.
    #[must_use]
    pub const fn variables(&self) -> &BTreeMap<String, Value> {
        &self.variables
    }
}

impl From<BTreeMap<String, Value>> for InMemoryVariableStore {
    fn from(variables: BTreeMap<String, Value>) -> Self {
        Self { variables }
    }
}

impl VariableStore for InMemoryVariableStore {
    fn get(&self, key: &str) -> Option<&Value> {
        self.variables.get(key)
    }

    fn set(&mut self, key: &str, value: Value) {
        self.variables.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) -> Option<Value> {
        self.variables.remove(key)
    }

    fn keys(&self) -> Vec<String> {
        self.variables.keys().cloned().collect()
    }
}

/// Variables persisted to a JSON file.
///
/// The file is read once by [`FileVariableStore::open`] and written back by
/// [`FileVariableStore::flush`]; reads and writes in between only touch
/// memory.
#[derive(Debug, Clone)]
pub struct FileVariableStore {
    path: PathBuf,
    inner: InMemoryVariableStore,
}

impl FileVariableStore {
    /// Returns the default store location, if the platform has a config
    /// directory.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("scribecheck").join("variables.json"))
    }

    /// Opens the store at the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no config directory or the file exists
    /// but cannot be read.
    pub async fn open_default() -> Result<Self, VariableStoreError> {
        let path = Self::default_path().ok_or(VariableStoreError::NoLocation)?;
        Self::open(path).await
    }

    /// Opens the store at `path`. A missing file is an empty store.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or does not
    /// hold a JSON object.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, VariableStoreError> {
        let path = path.into();
        if !fs::try_exists(&path).await.unwrap_or(false) {
            debug!(path = %path.display(), "no stored variables yet");
            return Ok(Self {
                path,
                inner: InMemoryVariableStore::new(),
            });
        }

        let content = fs::read(&path)
            .await
            .map_err(|source| VariableStoreError::Io {
                path: path.clone(),
                source,
            })?;
        let variables: BTreeMap<String, Value> = from_json_bytes(&content)
            .map_err(|e| VariableStoreError::Serialization(e.to_string()))?;
        debug!(path = %path.display(), count = variables.len(), "loaded stored variables");

        Ok(Self {
            path,
            inner: variables.into(),
        })
    }

    /// Writes the variables back to disk, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub async fn flush(&self) -> Result<(), VariableStoreError> {
        let io_error = |source| VariableStoreError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(io_error)?;
        }
        let content = to_json_stable_bytes(self.inner.variables())
            .map_err(|e| VariableStoreError::Serialization(e.to_string()))?;
        fs::write(&self.path, content).await.map_err(io_error)?;

        debug!(path = %self.path.display(), count = self.inner.len(), "flushed stored variables");
        Ok(())
    }

    /// File the store is backed by.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl VariableStore for FileVariableStore {
    fn get(&self, key: &str) -> Option<&Value> {
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: Value) {
        self.inner.set(key, value);
    }

    fn remove(&mut self, key: &str) -> Option<Value> {
        self.inner.remove(key)
    }

    fn keys(&self) -> Vec<String> {
        self.inner.keys()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_in_memory_overwrites() {
        let mut store = InMemoryVariableStore::new();
        store.set("lastResponseTime", json!(100));
        store.set("lastResponseTime", json!(250));

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("lastResponseTime"), Some(&json!(250)));
        assert_eq!(store.remove("lastResponseTime"), Some(json!(250)));
        assert!(store.is_empty());
    }

    #[test]
    fn test_default_path_is_under_scribecheck() {
        if let Some(path) = FileVariableStore::default_path() {
            assert!(path.ends_with("scribecheck/variables.json"));
        }
    }

    #[tokio::test]
    async fn test_missing_file_opens_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileVariableStore::open(dir.path().join("variables.json"))
            .await
            .unwrap();
        assert!(store.keys().is_empty());
    }

    #[tokio::test]
    async fn test_flush_and_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("variables.json");

        let mut store = FileVariableStore::open(&path).await.unwrap();
        store.set("lastSummaryLength", json!(200));
        store.set("lastResponseTime", json!(7500));
        store.flush().await.unwrap();

        let text = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(
            text,
            "{\n  \"lastResponseTime\": 7500,\n  \"lastSummaryLength\": 200\n}\n"
        );

        let reopened = FileVariableStore::open(&path).await.unwrap();
        assert_eq!(reopened.keys(), vec!["lastResponseTime", "lastSummaryLength"]);
        assert_eq!(reopened.get("lastResponseTime"), Some(&json!(7500)));
    }

    #[tokio::test]
    async fn test_corrupt_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("variables.json");
        tokio::fs::write(&path, "[1, 2, 3]").await.unwrap();

        let result = FileVariableStore::open(&path).await;
        assert!(matches!(result, Err(VariableStoreError::Serialization(_))));
    }
}
