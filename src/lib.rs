//! tmux-aqi library
//!
//! This module exposes the cache, classifier, configuration and API client
//! for use by the binary and in integration tests.

pub mod app;
pub mod cache;
pub mod classify;
pub mod cli;
pub mod config;
pub mod data;
pub mod format;
pub mod logging;
