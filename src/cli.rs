//! Command-line interface parsing for tmux-aqi
//!
//! This module handles parsing of CLI arguments using clap and turns them into
//! the `Settings` value threaded through the rest of the program.

use std::path::PathBuf;
use std::time::Duration as StdDuration;

use chrono::Duration;
use clap::Parser;

use crate::config::{ConfigError, Settings, API_KEY_ENV, DEFAULT_TIMEOUT_SECS};
use crate::data::DEFAULT_ENDPOINT;

/// Default for `--max-age`, matches the cache's default window
const DEFAULT_MAX_AGE_ARG: u32 = 300;

/// tmux-aqi - Air quality for your nearest city, as a tmux status segment
///
/// Prints one line such as `#[fg=yellow,bg=green] Portland AQI: 23 `.
/// The API key is read from IQAIR_API_KEY or <config-dir>/key.
#[derive(Parser, Debug)]
#[command(name = "tmux-aqi")]
#[command(about = "Air quality index for your nearest city, formatted for the tmux status bar")]
#[command(version)]
pub struct Cli {
    /// Directory holding config.json, key and the cached last run [default: ~/.iq-air]
    #[arg(long, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Reuse the cached reading while it is younger than this many seconds
    #[arg(long, value_name = "SECONDS", default_value_t = DEFAULT_MAX_AGE_ARG)]
    pub max_age: u32,

    /// HTTP request timeout in seconds, 0 waits indefinitely
    #[arg(long, value_name = "SECONDS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// URL of the AirVisual nearest_city endpoint
    #[arg(long, value_name = "URL", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,
}

impl Settings {
    /// Creates Settings from parsed CLI arguments
    ///
    /// Captures `IQAIR_API_KEY` from the environment here so nothing
    /// downstream reads ambient state.
    ///
    /// # Returns
    /// * `Ok(Settings)` with appropriate settings
    /// * `Err(ConfigError::NoHomeDir)` if no `--config-dir` was given and the
    ///   home directory can't be determined
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let config_dir = match &cli.config_dir {
            Some(dir) => dir.clone(),
            None => Settings::default_config_dir().ok_or(ConfigError::NoHomeDir)?,
        };

        Ok(Settings {
            config_dir,
            max_age: Duration::seconds(i64::from(cli.max_age)),
            endpoint: cli.endpoint.clone(),
            timeout: match cli.timeout {
                0 => None,
                secs => Some(StdDuration::from_secs(secs)),
            },
            env_api_key: std::env::var(API_KEY_ENV).ok(),
        })
    }
}
