//! Configuration management for the TruValue service.
//!
//! Configuration is layered, later sources overriding earlier ones:
//! 1. Built-in defaults
//! 2. `truvalue.toml` (or `.json`/`.yaml`) in the working directory, if present
//! 3. A file passed with `--config`
//! 4. Environment variables prefixed with `TRUVALUE_`, nested keys separated by `__`
//!    (`TRUVALUE_PORT=9000`, `TRUVALUE_FOREST__N_ESTIMATORS=50`)
//! 5. Command-line flags

use crate::pipeline::ForestParams;
use crate::storage::{ArtifactStore, MODEL_FILE, PREPROCESSOR_FILE};
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Service configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Artifact holding the full fitted pipeline
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,

    /// Artifact holding the fitted preprocessing stage alone
    #[serde(default = "default_preprocessor_path")]
    pub preprocessor_path: PathBuf,

    /// Largest accepted `/retrain` request body, in bytes
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,

    #[serde(default)]
    pub forest: ForestParams,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    8000
}
fn default_model_path() -> PathBuf {
    PathBuf::from(MODEL_FILE)
}
fn default_preprocessor_path() -> PathBuf {
    PathBuf::from(PREPROCESSOR_FILE)
}
fn default_max_upload_bytes() -> usize {
    32 * 1024 * 1024
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            model_path: default_model_path(),
            preprocessor_path: default_preprocessor_path(),
            max_upload_bytes: default_max_upload_bytes(),
            forest: ForestParams::default(),
        }
    }
}

impl ServiceConfig {
    /// Load configuration from defaults, config files and the environment.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .add_source(Config::try_from(&ServiceConfig::default())?)
            .add_source(File::with_name("truvalue").required(false));

        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path));
        }

        builder
            .add_source(
                Environment::with_prefix("TRUVALUE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }

    pub fn artifact_store(&self) -> ArtifactStore {
        ArtifactStore::new(&self.model_path, &self.preprocessor_path)
    }
}
