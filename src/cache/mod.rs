//! Cache module for the last successful API response
//!
//! This module persists a single timestamped snapshot of the upstream response
//! and decides whether it is still fresh enough to reuse. Any problem reading
//! the cache degrades to a miss so the status line is still produced.

mod manager;

pub use manager::{CacheError, Snapshot, SnapshotCache, CACHE_FILE_NAME, DEFAULT_MAX_AGE_SECS};
