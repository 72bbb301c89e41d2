//! Read-only per-region forecast store.
//!
//! A [`ForecastStore`] is built once from a static dataset and then only read.
//! The dataset is a JSON object mapping region identifiers to arrays of
//! `{"ts": "<ISO-8601>", "g": <int>}` records:
//!
//! ```json
//! {
//!   "SG":      [{"ts": "2025-09-13T10:00:00", "g": 50}, ...],
//!   "EU_WEST": [{"ts": "2025-09-13T10:00:00", "g": 30}, ...]
//! }
//! ```
//!
//! Region keys are canonicalized to upper case on load. Samples keep their
//! dataset order; nothing downstream relies on them being sorted.

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{ForecastError, Result};
use crate::types::{ForecastSample, canonical_region};

/// Per-region forecast series, keyed by canonical region identifier.
#[derive(Debug, Clone, Default)]
pub struct ForecastStore {
    series: BTreeMap<String, Vec<ForecastSample>>,
}

impl ForecastStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from `(region, samples)` pairs.
    ///
    /// Region identifiers that collide after canonicalization (`"sg"` and
    /// `"SG"`) are merged into one series.
    pub fn from_series<I, R>(series: I) -> Self
    where
        I: IntoIterator<Item = (R, Vec<ForecastSample>)>,
        R: AsRef<str>,
    {
        let mut merged: BTreeMap<String, Vec<ForecastSample>> = BTreeMap::new();
        for (region, samples) in series {
            merged
                .entry(canonical_region(region.as_ref()))
                .or_default()
                .extend(samples);
        }
        Self { series: merged }
    }

    /// Parse a dataset from its JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ForecastError::Parse`] if the text is not a region -> samples
    /// map or any timestamp is malformed.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: BTreeMap<String, Vec<ForecastSample>> = serde_json::from_str(json)
            .map_err(|e| ForecastError::Parse(format!("invalid forecast dataset: {e}")))?;
        Ok(Self::from_series(raw))
    }

    /// Load a dataset file.
    ///
    /// # Errors
    ///
    /// Returns [`ForecastError::Io`] if the file cannot be read, or
    /// [`ForecastError::Parse`] if its content is invalid.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ForecastError::Io(format!("failed to read forecast dataset {}: {e}", path.display()))
        })?;
        let store = Self::from_json_str(&content)?;
        tracing::info!(
            path = %path.display(),
            regions = store.region_count(),
            samples = store.sample_count(),
            "loaded forecast dataset"
        );
        Ok(store)
    }

    /// Load a dataset file, falling back to an empty store on any error.
    ///
    /// Queries against an empty store yield "no data" results rather than
    /// failures, which keeps long-running hosts available when the dataset is
    /// missing.
    #[must_use]
    pub fn load_or_empty(path: &Path) -> Self {
        match Self::from_file(path) {
            Ok(store) => store,
            Err(e) => {
                tracing::warn!(error = %e, "forecast dataset unavailable; serving empty forecasts");
                Self::new()
            }
        }
    }

    /// Series for `region` (case-insensitive), if the region is known.
    #[must_use]
    pub fn get(&self, region: &str) -> Option<&[ForecastSample]> {
        self.series
            .get(&canonical_region(region))
            .map(Vec::as_slice)
    }

    /// Series for `region`, or an empty slice for unknown regions.
    #[must_use]
    pub fn series(&self, region: &str) -> &[ForecastSample] {
        self.get(region).unwrap_or(&[])
    }

    /// Canonical identifiers of every region in the dataset, in sorted order.
    pub fn regions(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    /// Number of regions in the dataset.
    #[must_use]
    pub fn region_count(&self) -> usize {
        self.series.len()
    }

    /// Total number of samples across all regions.
    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.series.values().map(Vec::len).sum()
    }

    /// Returns `true` if the store holds no regions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}
