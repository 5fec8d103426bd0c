//! Color overrides from `config.json`
//!
//! Example:
//!
//! ```json
//! {
//!   "good": { "fg": "black" },
//!   "hazardous": { "fg": "white", "bg": "colour52" }
//! }
//! ```

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use super::{read_optional, ConfigError};
use crate::classify::{ColorRule, Palette};

/// Optional overrides for one tier
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ColorOverride {
    pub fg: Option<String>,
    pub bg: Option<String>,
}

impl ColorOverride {
    /// Applies this override on top of `default`, channel by channel
    fn apply(&self, default: &ColorRule) -> ColorRule {
        ColorRule {
            fg: self.fg.clone().unwrap_or_else(|| default.fg.clone()),
            bg: self.bg.clone().unwrap_or_else(|| default.bg.clone()),
        }
    }
}

/// Contents of `config.json`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ColorOverrides {
    pub good: Option<ColorOverride>,
    pub moderate: Option<ColorOverride>,
    pub unhealthy: Option<ColorOverride>,
    pub hazardous: Option<ColorOverride>,
}

impl ColorOverrides {
    /// Reads overrides from `path`
    ///
    /// A missing file yields no overrides. An unreadable or malformed file is
    /// an error: unlike the cache, this file is written by the user.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = read_optional(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let Some(content) = content else {
            debug!(path = %path.display(), "no config file, using default colors");
            return Ok(Self::default());
        };

        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Merges the overrides with the compiled-in defaults
    pub fn resolve(&self) -> Palette {
        let defaults = Palette::default();
        let merge = |over: &Option<ColorOverride>, default: &ColorRule| match over {
            Some(over) => over.apply(default),
            None => default.clone(),
        };

        Palette {
            good: merge(&self.good, &defaults.good),
            moderate: merge(&self.moderate, &defaults.moderate),
            unhealthy: merge(&self.unhealthy, &defaults.unhealthy),
            hazardous: merge(&self.hazardous, &defaults.hazardous),
        }
    }
}
