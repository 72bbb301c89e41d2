//! 15-minute time grid.
//!
//! Forecast samples sit on a 15-minute grid, so every anchor instant is
//! snapped down to the nearest slot boundary before it is compared against
//! sample timestamps. Snapping makes search results independent of the
//! caller's sub-slot precision.

use chrono::{DateTime, TimeDelta, Timelike, Utc};

use crate::error::{CarbonError, Result};

/// Width of one forecast slot, in minutes.
pub const SLOT_MINUTES: u32 = 15;

/// Round `instant` down to the nearest 15-minute boundary.
///
/// Seconds and sub-second fields become zero and the minute becomes one of
/// `{0, 15, 30, 45}`. Idempotent.
#[must_use]
pub fn snap(instant: DateTime<Utc>) -> DateTime<Utc> {
    let excess = TimeDelta::minutes(i64::from(instant.minute() % SLOT_MINUTES))
        + TimeDelta::seconds(i64::from(instant.second()))
        + TimeDelta::nanoseconds(i64::from(instant.nanosecond()));
    instant - excess
}

/// Parse an ISO-8601 anchor and snap it to the grid.
///
/// # Errors
///
/// Returns [`CarbonError::InvalidInput`] for strings that are not ISO-8601
/// instants. Natural-language times must be resolved before reaching here.
pub fn parse_anchor(raw: &str) -> Result<DateTime<Utc>> {
    carbonshift_forecast::parse_instant(raw)
        .map(snap)
        .map_err(|e| CarbonError::InvalidInput(format!("anchor: {e}")))
}

/// Signed whole minutes from `anchor` to `ts`, rounded toward negative infinity.
///
/// A slot 30 seconds before the anchor is reported as `-1`, not `0`.
#[must_use]
pub fn minutes_between(anchor: DateTime<Utc>, ts: DateTime<Utc>) -> i64 {
    (ts - anchor).num_seconds().div_euclid(60)
}
