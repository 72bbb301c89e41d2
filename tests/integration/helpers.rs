//! Shared helpers for integration tests.

use std::path::PathBuf;
use std::sync::Arc;

use carbonshift::{CarbonConfig, CarbonService, ForecastStore, MemoryProfileStore, PreferenceProfile};
use chrono::{DateTime, TimeZone, Utc};

/// `2025-09-13T{h}:{m}:00Z`.
pub(crate) fn at(h: u32, m: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 9, 13, h, m, 0)
        .single()
        .expect("valid test instant")
}

/// Path of the dataset shipped with the repository.
pub(crate) fn bundled_dataset_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("data")
        .join("mock_forecast.json")
}

/// Service over an inline dataset with an in-memory profile.
pub(crate) fn memory_service(dataset: &str, profile: PreferenceProfile) -> CarbonService {
    let forecasts = ForecastStore::from_json_str(dataset).expect("parse test dataset");
    CarbonService::new(
        Arc::new(forecasts),
        Arc::new(MemoryProfileStore::with_profile(profile)),
    )
}

/// Profile allowing `regions` with a `shift`-minute window.
pub(crate) fn profile(regions: &[&str], shift: u32) -> PreferenceProfile {
    PreferenceProfile {
        regions_allowed: regions.iter().map(|r| (*r).to_owned()).collect(),
        allowed_shift_minutes: shift,
    }
}

/// Config whose profile lives in `dir` and whose dataset is the bundled one.
pub(crate) fn temp_config(dir: &tempfile::TempDir) -> CarbonConfig {
    let mut config = CarbonConfig::default();
    config.profile.path = Some(dir.path().join("profile.json"));
    config.forecast.path = Some(bundled_dataset_path());
    config
}

/// The three-region dataset used by the worked scenarios.
pub(crate) const SCENARIO_DATASET: &str = r#"{
    "SG": [
        {"ts": "2025-09-13T10:00:00", "g": 50},
        {"ts": "2025-09-13T10:15:00", "g": 30},
        {"ts": "2025-09-13T10:30:00", "g": 40}
    ],
    "EU_WEST": [
        {"ts": "2025-09-13T10:00:00", "g": 30},
        {"ts": "2025-09-13T10:15:00", "g": 45}
    ],
    "US_WEST": [
        {"ts": "2025-09-13T09:45:00", "g": 80},
        {"ts": "2025-09-13T10:15:00", "g": 70}
    ]
}"#;
