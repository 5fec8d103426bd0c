//! Core data models for tmux-aqi
//!
//! This module contains the upstream payload returned by the AirVisual
//! `nearest_city` endpoint and the client that fetches it.
//!
//! Every field carries a serde default so sparse documents still deserialize,
//! and an explicit `null` reads as the default too; the status line only needs
//! the city name and the US index.

pub mod airvisual;

pub use airvisual::{AirVisualClient, FetchError, DEFAULT_ENDPOINT};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Deserializes `null` as `T::default()`
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Full response body of the `nearest_city` endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AirQualityReport {
    /// `"success"` or `"fail"`
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    /// Reading for the nearest monitored city
    #[serde(deserialize_with = "null_as_default")]
    pub data: CityReport,
}

/// Location and current conditions for a single city
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CityReport {
    #[serde(deserialize_with = "null_as_default")]
    pub city: String,
    #[serde(deserialize_with = "null_as_default")]
    pub state: String,
    #[serde(deserialize_with = "null_as_default")]
    pub country: String,
    #[serde(deserialize_with = "null_as_default")]
    pub location: Location,
    #[serde(deserialize_with = "null_as_default")]
    pub current: Current,
}

/// GeoJSON-style point
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Location {
    /// Always `"Point"` in practice
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    /// Longitude, latitude
    #[serde(deserialize_with = "null_as_default")]
    pub coordinates: Vec<f64>,
}

/// Current weather and pollution readings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Current {
    #[serde(deserialize_with = "null_as_default")]
    pub weather: WeatherReading,
    #[serde(deserialize_with = "null_as_default")]
    pub pollution: PollutionReading,
}

/// Current weather as reported by the upstream station
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherReading {
    /// Time of the reading
    pub ts: Option<DateTime<Utc>>,
    /// Temperature in Celsius
    #[serde(deserialize_with = "null_as_default")]
    pub tp: i64,
    /// Atmospheric pressure in hPa
    #[serde(deserialize_with = "null_as_default")]
    pub pr: i64,
    /// Relative humidity percentage
    #[serde(deserialize_with = "null_as_default")]
    pub hu: i64,
    /// Wind speed in m/s
    #[serde(deserialize_with = "null_as_default")]
    pub ws: f64,
    /// Wind direction in degrees
    #[serde(deserialize_with = "null_as_default")]
    pub wd: i64,
    /// Weather icon code
    #[serde(deserialize_with = "null_as_default")]
    pub ic: String,
}

/// Current pollution reading
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollutionReading {
    /// Time of the reading
    pub ts: Option<DateTime<Utc>>,
    /// US EPA air quality index
    #[serde(deserialize_with = "null_as_default")]
    pub aqius: i64,
    /// Main pollutant for the US index
    #[serde(deserialize_with = "null_as_default")]
    pub mainus: String,
    /// China MEP air quality index
    #[serde(deserialize_with = "null_as_default")]
    pub aqicn: i64,
    /// Main pollutant for the China index
    #[serde(deserialize_with = "null_as_default")]
    pub maincn: String,
}

impl AirQualityReport {
    /// Name of the reporting city
    pub fn city(&self) -> &str {
        &self.data.city
    }

    /// US air quality index used for classification
    pub fn aqi_us(&self) -> i64 {
        self.data.current.pollution.aqius
    }
}
