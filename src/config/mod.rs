//! Runtime settings and user configuration
//!
//! `Settings` is built once from the command line and passed by reference to
//! every component. The user-authored files (color overrides, API key) live in
//! the configuration directory it names.

mod colors;
mod key;

pub use colors::{ColorOverride, ColorOverrides};
pub use key::{resolve_api_key, API_KEY_ENV};

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration as StdDuration;

use chrono::Duration;
use directories::BaseDirs;
use thiserror::Error;

use crate::cache::DEFAULT_MAX_AGE_SECS;
use crate::data::DEFAULT_ENDPOINT;

/// Name of the configuration directory inside the home directory
pub const CONFIG_DIR_NAME: &str = ".iq-air";

/// Name of the color override file
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Name of the API key file
pub const KEY_FILE_NAME: &str = "key";

/// Default HTTP timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Errors that can occur while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No home directory to put `~/.iq-air` in
    #[error("Could not determine home directory, pass --config-dir")]
    NoHomeDir,

    /// Creating the configuration directory failed
    #[error("Failed to create config directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file exists but can't be read
    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file isn't valid JSON of the expected shape
    #[error("Invalid config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Neither the environment nor the key file provided an API key
    #[error("No API key found. Set {env_var} or put it in {}", .path.display())]
    MissingApiKey { env_var: &'static str, path: PathBuf },
}

/// Settings for one invocation
#[derive(Debug, Clone)]
pub struct Settings {
    /// Directory holding config.json, key and lastrun.json
    pub config_dir: PathBuf,
    /// How long a cached snapshot may be reused
    pub max_age: Duration,
    /// URL of the `nearest_city` endpoint
    pub endpoint: String,
    /// HTTP request timeout, `None` for no timeout
    pub timeout: Option<StdDuration>,
    /// Value of `IQAIR_API_KEY` captured at startup
    pub env_api_key: Option<String>,
}

impl Settings {
    /// Settings with defaults, rooted at `config_dir`
    pub fn with_config_dir(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
            max_age: Duration::seconds(DEFAULT_MAX_AGE_SECS),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Some(StdDuration::from_secs(DEFAULT_TIMEOUT_SECS)),
            env_api_key: None,
        }
    }

    /// `~/.iq-air`, or `None` if there is no home directory
    pub fn default_config_dir() -> Option<PathBuf> {
        let base_dirs = BaseDirs::new()?;
        Some(base_dirs.home_dir().join(CONFIG_DIR_NAME))
    }

    /// Path of the color override file
    pub fn config_path(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE_NAME)
    }

    /// Path of the API key file
    pub fn key_path(&self) -> PathBuf {
        self.config_dir.join(KEY_FILE_NAME)
    }

    /// Creates the configuration directory if it doesn't exist
    pub fn ensure_config_dir(&self) -> Result<(), ConfigError> {
        fs::create_dir_all(&self.config_dir).map_err(|source| ConfigError::CreateDir {
            path: self.config_dir.clone(),
            source,
        })
    }

    /// Resolves the API key from the captured environment value or the key file
    pub fn api_key(&self) -> Result<String, ConfigError> {
        resolve_api_key(self.env_api_key.clone(), &self.key_path())
    }

    /// Loads color overrides from the config file, if present
    pub fn color_overrides(&self) -> Result<ColorOverrides, ConfigError> {
        ColorOverrides::load(&self.config_path())
    }
}

/// Reads a file, mapping "not found" to `Ok(None)`
fn read_optional(path: &Path) -> std::io::Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}
