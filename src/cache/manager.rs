//! Snapshot cache for the last successful API response
//!
//! Provides a `SnapshotCache` that stores the most recent upstream payload in a
//! single JSON file together with the UTC instant it was captured.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::data::AirQualityReport;

/// File name of the cache entry inside the configuration directory
pub const CACHE_FILE_NAME: &str = "lastrun.json";

/// Default staleness window in seconds
pub const DEFAULT_MAX_AGE_SECS: i64 = 300;

/// Errors that can occur when writing the cache
#[derive(Debug, Error)]
pub enum CacheError {
    /// Creating the directory or writing the file failed
    #[error("Failed to write cache file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Serializing the entry failed
    #[error("Failed to serialize cache entry: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// One captured upstream response, as persisted on disk
///
/// Serialized as `{"ts": <RFC 3339 UTC>, "data": <payload>}`. The upstream
/// payload has its own timestamps, but those record when the station last
/// updated, not when we asked, so they are useless for rate limiting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// When the data was fetched
    #[serde(rename = "ts")]
    pub captured_at: DateTime<Utc>,
    /// The upstream payload
    #[serde(rename = "data")]
    pub report: AirQualityReport,
}

impl Snapshot {
    /// Whether this snapshot may be reused at `now`
    ///
    /// A snapshot captured after `now` breaks the ordering invariant and is
    /// never fresh.
    pub fn is_fresh(&self, max_age: Duration, now: DateTime<Utc>) -> bool {
        self.captured_at <= now && now - self.captured_at <= max_age
    }
}

/// Reads and writes the single last-run cache entry
#[derive(Debug, Clone)]
pub struct SnapshotCache {
    /// Path of the cache file
    path: PathBuf,
}

impl SnapshotCache {
    /// Creates a cache stored as `lastrun.json` inside `dir`
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            path: dir.join(CACHE_FILE_NAME),
        }
    }

    /// Path of the cache file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the cached snapshot if it is younger than `max_age`
    ///
    /// Returns `None` if the file doesn't exist, can't be read or parsed, or
    /// holds a stale snapshot. Never fails: a broken cache only costs a fetch.
    pub fn load(&self, max_age: Duration) -> Option<Snapshot> {
        self.load_at(max_age, Utc::now())
    }

    /// Same as [`load`](Self::load) with an explicit current instant
    pub fn load_at(&self, max_age: Duration, now: DateTime<Utc>) -> Option<Snapshot> {
        let snapshot = self.read()?;

        if !snapshot.is_fresh(max_age, now) {
            debug!(
                captured_at = %snapshot.captured_at,
                max_age_secs = max_age.num_seconds(),
                "cached snapshot is stale"
            );
            return None;
        }

        Some(snapshot)
    }

    /// Reads and parses the cache file regardless of age
    fn read(&self) -> Option<Snapshot> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "no usable cache file");
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "ignoring corrupt cache file");
                None
            }
        }
    }

    /// Overwrites the cache with `report`, captured now
    ///
    /// # Returns
    /// * `Ok(Snapshot)` with the entry that was written
    /// * `Err(CacheError)` if serialization, directory creation or writing fails
    pub fn save(&self, report: &AirQualityReport) -> Result<Snapshot, CacheError> {
        self.save_at(report, Utc::now())
    }

    /// Same as [`save`](Self::save) with an explicit capture instant
    pub fn save_at(
        &self,
        report: &AirQualityReport,
        captured_at: DateTime<Utc>,
    ) -> Result<Snapshot, CacheError> {
        let snapshot = Snapshot {
            captured_at,
            report: report.clone(),
        };
        let json = serde_json::to_vec(&snapshot)?;

        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).map_err(|source| self.io_error(source))?;
        }
        write_private(&self.path, &json).map_err(|source| self.io_error(source))?;

        debug!(path = %self.path.display(), "cached snapshot");
        Ok(snapshot)
    }

    fn io_error(&self, source: std::io::Error) -> CacheError {
        CacheError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

/// Writes `contents` to `path`, readable by the owner only
#[cfg(unix)]
fn write_private(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    use std::io::Write;
    use std::os::unix::fs::OpenOptionsExt;

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    file.write_all(contents)
}

#[cfg(not(unix))]
fn write_private(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    fs::write(path, contents)
}
