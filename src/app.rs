//! Application flow for one invocation
//!
//! Consults the cache first; on a miss, fetches a new reading, renders it and
//! then refreshes the cache. Returns the status line or a fatal error and
//! leaves printing and exit codes to `main`.

use thiserror::Error;
use tracing::{debug, warn};

use crate::cache::SnapshotCache;
use crate::config::{ConfigError, Settings};
use crate::data::{AirVisualClient, FetchError};
use crate::format::render;

/// Fatal errors: the invocation produces no status line
#[derive(Debug, Error)]
pub enum AppError {
    /// Config directory, config file or API key problem
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Network or upstream problem
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Where the rendered reading came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// A fresh snapshot from the cache
    Cache,
    /// A new upstream response
    Upstream,
}

/// Result of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Status line to print
    pub line: String,
    /// Where the reading came from
    pub source: Source,
}

/// Runs one invocation against the given settings
#[derive(Debug, Clone)]
pub struct App<'a> {
    settings: &'a Settings,
    cache: SnapshotCache,
}

impl<'a> App<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self {
            settings,
            cache: SnapshotCache::in_dir(&settings.config_dir),
        }
    }

    /// Produces the status line, from cache when fresh, otherwise from upstream
    ///
    /// A cache that can't be read is a miss and a cache that can't be written
    /// is logged; neither fails the run.
    pub async fn run(&self) -> Result<Outcome, AppError> {
        self.settings.ensure_config_dir()?;
        let palette = self.settings.color_overrides()?.resolve();

        if let Some(snapshot) = self.cache.load(self.settings.max_age) {
            debug!(captured_at = %snapshot.captured_at, "using cached snapshot");
            return Ok(Outcome {
                line: render(&snapshot.report, &palette),
                source: Source::Cache,
            });
        }

        let api_key = self.settings.api_key()?;
        let client = AirVisualClient::new(api_key, &self.settings.endpoint, self.settings.timeout)?;
        let report = client.fetch_nearest_city().await?;
        let line = render(&report, &palette);

        if let Err(e) = self.cache.save(&report) {
            warn!(error = %e, "could not cache snapshot, next run will fetch again");
        }

        Ok(Outcome {
            line,
            source: Source::Upstream,
        })
    }
}
