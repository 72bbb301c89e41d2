//! Cross-region recommendation.
//!
//! The [`Recommender`] combines the preference profile, the forecast store
//! and [`find_best`] across every allowed region, then reduces the
//! per-region candidates to one global pick with [`recommendation_order`].
//! Because that order is total, the pick does not depend on the order in
//! which regions are listed or searched.

use std::sync::Arc;

use carbonshift_forecast::{ForecastStore, canonical_region};
use chrono::{DateTime, Utc};
use tracing::debug;

use super::order::{keep_preferred, recommendation_order};
use super::slot::find_best;
use super::types::Recommendation;
use crate::profile::ProfileStore;
use crate::time_grid::snap;

/// Reduce candidates to the single preferred recommendation.
#[must_use]
pub fn pick_global<I>(candidates: I) -> Option<Recommendation>
where
    I: IntoIterator<Item = Recommendation>,
{
    candidates
        .into_iter()
        .fold(None, |best, candidate| {
            keep_preferred(best, candidate, recommendation_order)
        })
}

/// Best slot for one region's series, without consulting the profile.
fn region_candidate(
    forecasts: &ForecastStore,
    region: &str,
    anchor: DateTime<Utc>,
    window_minutes: u32,
) -> Option<Recommendation> {
    let region = canonical_region(region);
    let Some(series) = forecasts.get(&region) else {
        debug!(%region, "no forecast series for region");
        return None;
    };

    let outcome = find_best(series, anchor, window_minutes);
    let candidate = outcome.to_recommendation(&region, anchor);
    match &candidate {
        Some(rec) => debug!(
            %region,
            intensity = rec.intensity,
            shift_minutes = rec.shift_minutes,
            "region candidate"
        ),
        None => debug!(%region, window_minutes, "no sample inside window"),
    }
    candidate
}

/// Profile-driven recommender over a static forecast store.
#[derive(Clone)]
pub struct Recommender {
    forecasts: Arc<ForecastStore>,
    profiles: Arc<dyn ProfileStore>,
}

impl std::fmt::Debug for Recommender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Recommender")
            .field("regions", &self.forecasts.region_count())
            .finish_non_exhaustive()
    }
}

impl Recommender {
    /// Create a recommender from its two injected dependencies.
    pub fn new(forecasts: Arc<ForecastStore>, profiles: Arc<dyn ProfileStore>) -> Self {
        Self {
            forecasts,
            profiles,
        }
    }

    /// The forecast store backing this recommender.
    #[must_use]
    pub fn forecasts(&self) -> &ForecastStore {
        &self.forecasts
    }

    /// The profile store backing this recommender.
    #[must_use]
    pub fn profiles(&self) -> &Arc<dyn ProfileStore> {
        &self.profiles
    }

    /// Best slot in one region within `window_minutes` of `anchor`.
    ///
    /// The anchor is snapped first. Returns `None` for unknown regions, empty
    /// series, or windows with no samples.
    #[must_use]
    pub fn recommend_in_region(
        &self,
        region: &str,
        anchor: DateTime<Utc>,
        window_minutes: u32,
    ) -> Option<Recommendation> {
        region_candidate(&self.forecasts, region, snap(anchor), window_minutes)
    }

    /// One candidate per allowed region that has an in-window sample.
    ///
    /// Candidates follow the profile's region order. Duplicate regions in the
    /// profile are searched once.
    #[must_use]
    pub fn candidates(&self, anchor: DateTime<Utc>) -> Vec<Recommendation> {
        let anchor = snap(anchor);
        let profile = self.profiles.load();
        let window = profile.allowed_shift_minutes;

        unique_regions(&profile.regions_allowed)
            .into_iter()
            .filter_map(|region| region_candidate(&self.forecasts, &region, anchor, window))
            .collect()
    }

    /// Globally best (region, slot) under the current profile.
    #[must_use]
    pub fn recommend(&self, anchor: DateTime<Utc>) -> Option<Recommendation> {
        pick_global(self.candidates(anchor))
    }

    /// Same as [`recommend`](Self::recommend), searching regions in parallel.
    ///
    /// Each region is scanned on the blocking pool and the results reduced
    /// sequentially. A region whose task fails is skipped.
    pub async fn recommend_concurrent(&self, anchor: DateTime<Utc>) -> Option<Recommendation> {
        let anchor = snap(anchor);
        let profile = self.profiles.load();
        let window = profile.allowed_shift_minutes;

        let tasks: Vec<_> = unique_regions(&profile.regions_allowed)
            .into_iter()
            .map(|region| {
                let forecasts = Arc::clone(&self.forecasts);
                tokio::task::spawn_blocking(move || {
                    region_candidate(&forecasts, &region, anchor, window)
                })
            })
            .collect();

        let outcomes = futures_util::future::join_all(tasks).await;

        let candidates = outcomes.into_iter().filter_map(|outcome| match outcome {
            Ok(candidate) => candidate,
            Err(e) => {
                tracing::warn!(error = %e, "region search task failed");
                None
            }
        });
        pick_global(candidates)
    }
}

/// Canonical region ids in first-seen order, without duplicates.
fn unique_regions(regions: &[String]) -> Vec<String> {
    let mut seen = Vec::with_capacity(regions.len());
    for region in regions {
        let region = canonical_region(region);
        if !region.is_empty() && !seen.contains(&region) {
            seen.push(region);
        }
    }
    seen
}
