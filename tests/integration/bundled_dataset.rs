//! End-to-end runs against `data/mock_forecast.json` with a file-backed profile.

use carbonshift::CarbonConfig;

use crate::helpers::{at, temp_config};

#[test]
fn default_profile_recommendation() {
    let dir = tempfile::tempdir().unwrap();
    let service = temp_config(&dir).build_service();

    let rec = service.recommend_best("2025-09-13T12:00:00").unwrap().unwrap();
    assert_eq!(rec.region, "EU_WEST");
    assert_eq!(rec.ts, at(12, 0));
    assert_eq!(rec.intensity, 165);
    assert_eq!(rec.shift_minutes, 0);
}

#[test]
fn wider_shift_finds_cleaner_slot() {
    let dir = tempfile::tempdir().unwrap();
    let service = temp_config(&dir).build_service();
    service.update_preferences(None, Some(180)).unwrap();

    let rec = service.recommend_best("2025-09-13T12:00:00").unwrap().unwrap();
    assert_eq!(rec.region, "EU_WEST");
    assert_eq!(rec.ts, at(13, 30));
    assert_eq!(rec.shift_minutes, 90);
    assert_eq!(rec.baseline_intensity, 165);
    assert_eq!(rec.intensity_saved(), 1);
}

#[test]
fn candidates_follow_profile_order() {
    let dir = tempfile::tempdir().unwrap();
    let service = temp_config(&dir).build_service();
    let regions: Vec<String> = service
        .region_candidates("2025-09-13T12:00:00")
        .unwrap()
        .into_iter()
        .map(|c| c.region)
        .collect();
    assert_eq!(regions, vec!["SG", "EU_WEST", "US_WEST"]);
}

#[test]
fn anchor_outside_dataset_falls_back_to_edge_baseline() {
    let dir = tempfile::tempdir().unwrap();
    let service = temp_config(&dir).build_service();

    assert!(service.recommend_best("2025-10-01T00:00:00").unwrap().is_none());
    let rec = service
        .best_slot_in_window("SG", "2025-09-15T00:00:00", 15)
        .unwrap()
        .unwrap();
    assert_eq!(rec.ts.to_rfc3339(), "2025-09-14T23:45:00+00:00");
    assert_eq!(rec.shift_minutes, -15);
    assert_eq!(rec.baseline_intensity, rec.intensity);
}

#[test]
fn missing_dataset_serves_compiled_in_copy() {
    let dir = tempfile::tempdir().unwrap();
    let mut config: CarbonConfig = temp_config(&dir);
    config.forecast.path = Some(dir.path().join("missing.json"));
    let service = config.build_service();

    assert_eq!(service.region_forecast("SG").len(), 192);
    assert_eq!(service.dataset_regions(), vec!["EU_WEST", "SG", "US_WEST"]);
    let rec = service.recommend_best("2025-09-13T12:00:00").unwrap().unwrap();
    assert_eq!(rec.region, "EU_WEST");
    assert_eq!(rec.intensity, 165);
}

#[test]
fn unreadable_dataset_degrades_to_empty_results() {
    let dir = tempfile::tempdir().unwrap();
    let dataset = dir.path().join("forecast.json");
    std::fs::write(&dataset, "{\"SG\": [{\"ts\": \"yesterday\", \"g\": 1}]}").unwrap();
    let mut config: CarbonConfig = temp_config(&dir);
    config.forecast.path = Some(dataset);
    let service = config.build_service();

    assert!(service.region_forecast("SG").is_empty());
    assert!(service.dataset_regions().is_empty());
    assert!(service.recommend_best("2025-09-13T12:00:00").unwrap().is_none());
    assert_eq!(service.list_regions(), vec!["SG", "EU_WEST", "US_WEST"]);
}
