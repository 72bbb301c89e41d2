//! Core forecast types and region identifiers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One point of a region's carbon-intensity forecast.
///
/// Serialized in the dataset's own shape: `{"ts": "<ISO-8601>", "g": <int>}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ForecastSample {
    /// Start of the forecast slot.
    #[serde(rename = "ts", with = "crate::instant::iso")]
    pub timestamp: DateTime<Utc>,
    /// Carbon intensity for the slot (gCO2/kWh). Lower is better.
    #[serde(rename = "g")]
    pub intensity: i64,
}

impl ForecastSample {
    /// Create a sample.
    #[must_use]
    pub fn new(timestamp: DateTime<Utc>, intensity: i64) -> Self {
        Self {
            timestamp,
            intensity,
        }
    }
}

impl fmt::Display for ForecastSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} gCO2/kWh",
            crate::instant::format_instant(&self.timestamp),
            self.intensity
        )
    }
}

/// Canonical form of a region identifier: trimmed and upper-cased.
///
/// Region identifiers are case-insensitive; `"eu_west"`, `" EU_West "` and
/// `"EU_WEST"` all name the same series.
#[must_use]
pub fn canonical_region(raw: &str) -> String {
    raw.trim().to_uppercase()
}
