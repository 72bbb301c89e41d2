//! Search result types.

use carbonshift_forecast::ForecastSample;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::time_grid;

/// A recommended (region, start time) pair.
///
/// Produced fresh per request and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Canonical region identifier.
    pub region: String,
    /// Recommended slot start.
    #[serde(with = "carbonshift_forecast::instant::iso")]
    pub ts: DateTime<Utc>,
    /// Intensity of the recommended slot.
    pub intensity: i64,
    /// Intensity of the slot nearest the requested start, ignoring the window.
    pub baseline_intensity: i64,
    /// Minutes from the snapped anchor to `ts`; negative means earlier.
    pub shift_minutes: i64,
}

impl Recommendation {
    /// Intensity avoided by shifting: `baseline_intensity - intensity`.
    ///
    /// Negative when the baseline slot lies outside the window and is
    /// cleaner than anything inside it.
    #[must_use]
    pub fn intensity_saved(&self) -> i64 {
        self.baseline_intensity - self.intensity
    }
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} @ {}: {} gCO2/kWh (baseline {}, shift {:+} min)",
            self.region,
            carbonshift_forecast::format_instant(&self.ts),
            self.intensity,
            self.baseline_intensity,
            self.shift_minutes
        )
    }
}

/// Result of a single-region window search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SlotOutcome {
    /// Minimum-intensity sample inside the window, if any.
    pub best: Option<ForecastSample>,
    /// Sample nearest in time to the anchor, regardless of the window.
    pub baseline: Option<ForecastSample>,
}

impl SlotOutcome {
    /// Build a [`Recommendation`] for `region`, or `None` if the window was empty.
    #[must_use]
    pub fn to_recommendation(&self, region: &str, anchor: DateTime<Utc>) -> Option<Recommendation> {
        let best = self.best?;
        let baseline = self.baseline?;
        Some(Recommendation {
            region: region.to_owned(),
            ts: best.timestamp,
            intensity: best.intensity,
            baseline_intensity: baseline.intensity,
            shift_minutes: time_grid::minutes_between(anchor, best.timestamp),
        })
    }
}
