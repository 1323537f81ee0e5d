//! Application configuration.
//!
//! Layered with the `config` crate, later layers winning:
//! 1. Built-in defaults
//! 2. A config file: the one passed explicitly, or `scribecheck.{toml,yaml,json}`
//!    in the working directory when present
//! 3. Environment variables prefixed `SCRIBECHECK`, with `__` between
//!    section and key, e.g. `SCRIBECHECK__PROBE__BASE_URL`

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use scribecheck_domain::{DomainError, ValidationSettings};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Base name of the optional config file in the working directory.
pub const DEFAULT_CONFIG_NAME: &str = "scribecheck";

/// Environment prefix.
pub const ENV_PREFIX: &str = "SCRIBECHECK";

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A source could not be read or did not match the expected shape.
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// The values were read but are inconsistent.
    #[error("Invalid configuration: {0}")]
    Invalid(#[from] DomainError),
}

/// Settings for calling the live service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Base URL the endpoint paths are appended to.
    pub base_url: String,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout_ms: 120_000,
        }
    }
}

/// Where tracked variables are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Variable file; the platform config directory is used when unset.
    pub path: Option<PathBuf>,
}

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Checklist settings.
    pub validation: ValidationSettings,
    /// Live service settings.
    pub probe: ProbeConfig,
    /// Variable store settings.
    pub store: StoreConfig,
}

impl AppConfig {
    /// Loads configuration from the process environment and an optional file.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit file is missing, any source is
    /// malformed, or the resulting settings are inconsistent.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(file, None)
    }

    /// Like [`AppConfig::load`], reading environment variables from `env`
    /// instead of the process when given.
    ///
    /// # Errors
    ///
    /// See [`AppConfig::load`].
    pub fn load_with_env(
        file: Option<&Path>,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self, ConfigError> {
        let file_source = match file {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_NAME).required(false),
        };

        let settings = Config::builder()
            .add_source(file_source)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("validation.forbidden_terms")
                    .try_parsing(true)
                    .source(env),
            )
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validation.validate()?;
        debug!(
            mode = %config.validation.mode,
            base_url = %config.probe.base_url,
            "configuration loaded"
        );
        Ok(config)
    }
}
