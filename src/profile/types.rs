//! Preference profile types.

use carbonshift_forecast::canonical_region;
use serde::{Deserialize, Serialize};

/// Regions allowed when no profile has been persisted.
pub const DEFAULT_REGIONS: [&str; 3] = ["SG", "EU_WEST", "US_WEST"];

/// Shift window, in minutes, when no profile has been persisted.
pub const DEFAULT_SHIFT_MINUTES: u32 = 60;

/// Persisted user preferences.
///
/// Stored as `{"regions_allowed": [...], "allowed_shift_minutes": N}`. A
/// record missing one of the fields takes the default for that field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreferenceProfile {
    /// Regions a job may be placed in, in preference order. Duplicates are
    /// harmless.
    pub regions_allowed: Vec<String>,
    /// Maximum distance, in minutes, a job may move from its requested start.
    pub allowed_shift_minutes: u32,
}

impl Default for PreferenceProfile {
    fn default() -> Self {
        Self {
            regions_allowed: DEFAULT_REGIONS.iter().map(|r| (*r).to_owned()).collect(),
            allowed_shift_minutes: DEFAULT_SHIFT_MINUTES,
        }
    }
}

/// Partial profile update. `None` fields leave the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    /// Replacement region list (canonicalized on apply).
    pub regions_allowed: Option<Vec<String>>,
    /// Replacement shift window.
    pub allowed_shift_minutes: Option<u32>,
}

impl ProfileUpdate {
    /// Build an update from free-form region text (`"sg, eu_west"`).
    ///
    /// A CSV that yields no regions is treated as "no region change".
    #[must_use]
    pub fn from_csv(regions_csv: Option<&str>, allowed_shift_minutes: Option<u32>) -> Self {
        let regions_allowed = regions_csv
            .map(parse_region_list)
            .filter(|regions| !regions.is_empty());
        Self {
            regions_allowed,
            allowed_shift_minutes,
        }
    }

    /// Returns `true` if the update carries no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regions_allowed.is_none() && self.allowed_shift_minutes.is_none()
    }

    /// Overlay this update onto `profile`.
    ///
    /// Region entries are canonicalized and blank ones dropped; if nothing is
    /// left, the existing allow-list is kept so an empty list is never stored.
    pub fn apply_to(&self, profile: &mut PreferenceProfile) {
        if let Some(regions) = &self.regions_allowed {
            let cleaned: Vec<String> = regions
                .iter()
                .map(|r| canonical_region(r))
                .filter(|r| !r.is_empty())
                .collect();
            if !cleaned.is_empty() {
                profile.regions_allowed = cleaned;
            }
        }
        if let Some(minutes) = self.allowed_shift_minutes {
            profile.allowed_shift_minutes = minutes;
        }
    }
}

/// Split comma-separated region text into canonical identifiers.
///
/// Entries are trimmed and upper-cased; empty entries are discarded.
#[must_use]
pub fn parse_region_list(csv: &str) -> Vec<String> {
    csv.split(',')
        .map(canonical_region)
        .filter(|r| !r.is_empty())
        .collect()
}
