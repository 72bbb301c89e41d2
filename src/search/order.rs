//! Tie-break orderings for the search reductions.
//!
//! Each function is a total order where `Less` means "preferred". Reducers
//! keep the incumbent unless a challenger compares strictly `Less`, so the
//! outcome never depends on input order.
//!
//! | Reduction | Primary key | Tie-break |
//! |-----------|-------------|-----------|
//! | baseline | distance to anchor | lower intensity, then earlier timestamp |
//! | best slot | lower intensity | earlier timestamp |
//! | global pick | lower intensity | earlier timestamp, then region id |

use std::cmp::Ordering;

use carbonshift_forecast::ForecastSample;
use chrono::{DateTime, Utc};

use super::types::Recommendation;

/// Order samples by absolute distance to `anchor`, then intensity, then timestamp.
#[must_use]
pub fn baseline_order(
    anchor: DateTime<Utc>,
    a: &ForecastSample,
    b: &ForecastSample,
) -> Ordering {
    let da = (a.timestamp - anchor).abs();
    let db = (b.timestamp - anchor).abs();
    da.cmp(&db)
        .then(a.intensity.cmp(&b.intensity))
        .then(a.timestamp.cmp(&b.timestamp))
}

/// Order in-window samples by intensity, then by timestamp.
#[must_use]
pub fn slot_order(a: &ForecastSample, b: &ForecastSample) -> Ordering {
    a.intensity
        .cmp(&b.intensity)
        .then(a.timestamp.cmp(&b.timestamp))
}

/// Order per-region candidates by intensity, then timestamp, then region.
#[must_use]
pub fn recommendation_order(a: &Recommendation, b: &Recommendation) -> Ordering {
    a.intensity
        .cmp(&b.intensity)
        .then(a.ts.cmp(&b.ts))
        .then_with(|| a.region.cmp(&b.region))
}

/// Keep `incumbent` unless `challenger` is strictly preferred.
pub(crate) fn keep_preferred<T>(
    incumbent: Option<T>,
    challenger: T,
    order: impl Fn(&T, &T) -> Ordering,
) -> Option<T> {
    match incumbent {
        Some(current) if order(&challenger, &current) != Ordering::Less => Some(current),
        _ => Some(challenger),
    }
}
