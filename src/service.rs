//! Function-call boundary for front-ends (CLI, host bridge, agents).
//!
//! [`CarbonService`] exposes the six public operations with loosely-typed
//! inputs (ISO strings, signed integers) and validates them before they reach
//! the search core, which assumes well-formed input. Validation failures are
//! [`CarbonError::InvalidInput`]; missing data is `None` or an empty list.

use std::sync::Arc;

use carbonshift_forecast::{ForecastSample, ForecastStore};

use crate::error::{CarbonError, Result};
use crate::profile::{PreferenceProfile, ProfileStore, ProfileUpdate};
use crate::search::{Recommendation, Recommender};
use crate::time_grid;

/// Public operations over a forecast store and a profile store.
#[derive(Debug, Clone)]
pub struct CarbonService {
    recommender: Recommender,
}

impl CarbonService {
    /// Create a service from its injected stores.
    pub fn new(forecasts: Arc<ForecastStore>, profiles: Arc<dyn ProfileStore>) -> Self {
        Self {
            recommender: Recommender::new(forecasts, profiles),
        }
    }

    /// The recommender this service delegates to.
    #[must_use]
    pub fn recommender(&self) -> &Recommender {
        &self.recommender
    }

    /// Snapshot of the current preference profile.
    #[must_use]
    pub fn get_profile(&self) -> PreferenceProfile {
        self.recommender.profiles().load()
    }

    /// Regions the profile allows, in profile order.
    #[must_use]
    pub fn list_regions(&self) -> Vec<String> {
        self.get_profile().regions_allowed
    }

    /// Regions the forecast dataset covers, sorted.
    #[must_use]
    pub fn dataset_regions(&self) -> Vec<String> {
        self.recommender
            .forecasts()
            .regions()
            .map(str::to_owned)
            .collect()
    }

    /// Merge a partial preference update and return the resulting profile.
    ///
    /// `regions_csv` is free-form text (`"sg, eu_west"`); blank text leaves
    /// the region list unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`CarbonError::InvalidInput`] if `shift_minutes` is negative or
    /// does not fit in `u32`.
    pub fn update_preferences(
        &self,
        regions_csv: Option<&str>,
        shift_minutes: Option<i64>,
    ) -> Result<PreferenceProfile> {
        let shift = shift_minutes
            .map(|m| non_negative_minutes("allowed_shift_minutes", m))
            .transpose()?;
        let update = ProfileUpdate::from_csv(regions_csv, shift);
        Ok(self.recommender.profiles().update(&update))
    }

    /// The raw forecast series for `region` (case-insensitive).
    #[must_use]
    pub fn region_forecast(&self, region: &str) -> Vec<ForecastSample> {
        self.recommender.forecasts().series(region).to_vec()
    }

    /// Best slot in one region within an explicit window.
    ///
    /// # Errors
    ///
    /// Returns [`CarbonError::InvalidInput`] for a malformed anchor or a
    /// negative window.
    pub fn best_slot_in_window(
        &self,
        region: &str,
        anchor_iso: &str,
        window_minutes: i64,
    ) -> Result<Option<Recommendation>> {
        let anchor = time_grid::parse_anchor(anchor_iso)?;
        let window = non_negative_minutes("window_minutes", window_minutes)?;
        Ok(self.recommender.recommend_in_region(region, anchor, window))
    }

    /// Globally best (region, slot) under the current profile.
    ///
    /// # Errors
    ///
    /// Returns [`CarbonError::InvalidInput`] for a malformed anchor.
    pub fn recommend_best(&self, anchor_iso: &str) -> Result<Option<Recommendation>> {
        let anchor = time_grid::parse_anchor(anchor_iso)?;
        Ok(self.recommender.recommend(anchor))
    }

    /// [`recommend_best`](Self::recommend_best) with regions searched in parallel.
    ///
    /// # Errors
    ///
    /// Returns [`CarbonError::InvalidInput`] for a malformed anchor.
    pub async fn recommend_best_concurrent(
        &self,
        anchor_iso: &str,
    ) -> Result<Option<Recommendation>> {
        let anchor = time_grid::parse_anchor(anchor_iso)?;
        Ok(self.recommender.recommend_concurrent(anchor).await)
    }

    /// Every allowed region's candidate for `anchor_iso`.
    ///
    /// # Errors
    ///
    /// Returns [`CarbonError::InvalidInput`] for a malformed anchor.
    pub fn region_candidates(&self, anchor_iso: &str) -> Result<Vec<Recommendation>> {
        let anchor = time_grid::parse_anchor(anchor_iso)?;
        Ok(self.recommender.candidates(anchor))
    }
}

fn non_negative_minutes(field: &str, minutes: i64) -> Result<u32> {
    u32::try_from(minutes).map_err(|_| {
        CarbonError::InvalidInput(format!(
            "{field} must be between 0 and {}, got {minutes}",
            u32::MAX
        ))
    })
}
