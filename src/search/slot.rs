//! Single-region bounded-window search.
//!
//! One pass over the series tracks two reductions at once:
//!
//! - **baseline**: the sample nearest the anchor, ignoring the window.
//! - **best**: the lowest-intensity sample inside
//!   `[anchor - radius, anchor + radius]` (both bounds inclusive).
//!
//! Tie-breaks come from [`super::order`]. The series may be unsorted, gappy
//! or irregular; nothing here assumes otherwise.

use carbonshift_forecast::ForecastSample;
use chrono::{DateTime, TimeDelta, Utc};

use super::order::{baseline_order, keep_preferred, slot_order};
use super::types::SlotOutcome;

/// Symmetric, inclusive time window around an anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    anchor: DateTime<Utc>,
    radius: TimeDelta,
}

impl Window {
    /// Window of `radius_minutes` either side of `anchor`.
    #[must_use]
    pub fn around(anchor: DateTime<Utc>, radius_minutes: u32) -> Self {
        Self {
            anchor,
            radius: TimeDelta::minutes(i64::from(radius_minutes)),
        }
    }

    /// Earliest instant in the window.
    #[must_use]
    pub fn start(&self) -> DateTime<Utc> {
        self.anchor - self.radius
    }

    /// Latest instant in the window.
    #[must_use]
    pub fn end(&self) -> DateTime<Utc> {
        self.anchor + self.radius
    }

    /// Returns `true` if `ts` lies within the window, bounds included.
    #[must_use]
    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        self.start() <= ts && ts <= self.end()
    }
}

/// Find the best in-window sample and the baseline sample for one series.
///
/// `anchor` is expected to be snapped already. An empty series yields an
/// empty outcome; a window with no samples yields `best = None` while
/// `baseline` is still populated.
#[must_use]
pub fn find_best(
    series: &[ForecastSample],
    anchor: DateTime<Utc>,
    window_minutes: u32,
) -> SlotOutcome {
    let window = Window::around(anchor, window_minutes);

    series
        .iter()
        .fold(SlotOutcome::default(), |outcome, &sample| SlotOutcome {
            baseline: keep_preferred(outcome.baseline, sample, |a, b| {
                baseline_order(anchor, a, b)
            }),
            best: if window.contains(sample.timestamp) {
                keep_preferred(outcome.best, sample, slot_order)
            } else {
                outcome.best
            },
        })
}
