//! Worked scenarios and search properties through the public API.

use carbonshift::search::find_best;
use carbonshift::time_grid::snap;
use carbonshift::{ForecastSample, ForecastStore};
use chrono::TimeDelta;

use crate::helpers::{SCENARIO_DATASET, at, memory_service, profile};

#[test]
fn single_region_scenario() {
    let svc = memory_service(SCENARIO_DATASET, profile(&["SG"], 60));
    let rec = svc
        .best_slot_in_window("SG", "2025-09-13T10:00:00", 15)
        .unwrap()
        .unwrap();
    assert_eq!(rec.ts, at(10, 15));
    assert_eq!(rec.intensity, 30);
    assert_eq!(rec.baseline_intensity, 50);
    assert_eq!(rec.shift_minutes, 15);
}

#[test]
fn cross_region_tie_goes_to_earlier_slot_in_any_order() {
    for regions in [["SG", "EU_WEST"], ["EU_WEST", "SG"]] {
        let svc = memory_service(SCENARIO_DATASET, profile(&regions, 15));
        let rec = svc.recommend_best("2025-09-13T10:00:00").unwrap().unwrap();
        assert_eq!(rec.region, "EU_WEST", "order {regions:?}");
        assert_eq!(rec.ts, at(10, 0));
        assert_eq!(rec.intensity, 30);
    }
}

#[test]
fn empty_window_keeps_baseline() {
    let series = vec![
        ForecastSample::new(at(9, 45), 40),
        ForecastSample::new(at(10, 15), 20),
    ];
    let outcome = find_best(&series, at(10, 0), 5);
    assert!(outcome.best.is_none());
    let baseline = outcome.baseline.unwrap();
    assert_eq!(baseline.timestamp, at(9, 45));
    assert_eq!(baseline.intensity, 40);
}

#[test]
fn off_grid_anchor_is_snapped_before_search() {
    let svc = memory_service(SCENARIO_DATASET, profile(&["SG"], 60));
    let snapped = svc
        .best_slot_in_window("SG", "2025-09-13T10:14:59.900", 0)
        .unwrap()
        .unwrap();
    assert_eq!(snapped.ts, at(10, 0));
    assert_eq!(snapped.shift_minutes, 0);
}

#[test]
fn offset_timestamps_are_normalised() {
    let svc = memory_service(SCENARIO_DATASET, profile(&["SG"], 60));
    let rec = svc
        .best_slot_in_window("SG", "2025-09-13T18:00:00+08:00", 15)
        .unwrap()
        .unwrap();
    assert_eq!(rec.ts, at(10, 15));
}

#[test]
fn no_region_has_data() {
    let svc = memory_service(SCENARIO_DATASET, profile(&["MARS"], 60));
    assert!(svc.recommend_best("2025-09-13T10:00:00").unwrap().is_none());
    assert!(svc.region_candidates("2025-09-13T10:00:00").unwrap().is_empty());
}

#[test]
fn malformed_inputs_are_labelled() {
    let svc = memory_service(SCENARIO_DATASET, profile(&["SG"], 60));
    let err = svc.recommend_best("13/09/2025").unwrap_err();
    assert!(err.is_input_error());
    assert_eq!(err.code(), "INVALID_INPUT");
    assert!(svc.best_slot_in_window("SG", "2025-09-13T10:00", -1).is_err());
}

#[tokio::test]
async fn concurrent_and_sequential_agree() {
    for shift in [0, 15, 30, 45] {
        let svc = memory_service(SCENARIO_DATASET, profile(&["US_WEST", "SG", "EU_WEST"], shift));
        for anchor in ["2025-09-13T09:50:00", "2025-09-13T10:00:00", "2025-09-13T10:20:00"] {
            assert_eq!(
                svc.recommend_best_concurrent(anchor).await.unwrap(),
                svc.recommend_best(anchor).unwrap(),
                "shift {shift} anchor {anchor}"
            );
        }
    }
}

/// Deterministic pseudo-random intensities.
fn synthetic_series(seed: u64, len: usize) -> Vec<ForecastSample> {
    let mut state = seed;
    (0..len)
        .map(|i| {
            state = state
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            let g = i64::try_from((state >> 33) % 40).unwrap() + 10;
            let minutes = i64::try_from(i).unwrap() * 15;
            ForecastSample::new(at(6, 0) + TimeDelta::minutes(minutes), g)
        })
        .collect()
}

#[test]
fn widening_the_window_never_raises_the_minimum() {
    for seed in 1..20 {
        let series = synthetic_series(seed, 48);
        let anchor = at(12, 0);
        let mut previous: Option<i64> = None;
        for radius in (0..=300).step_by(5) {
            let best = find_best(&series, anchor, radius).best.map(|s| s.intensity);
            if let (Some(prev), Some(now)) = (previous, best) {
                assert!(now <= prev, "seed {seed} radius {radius}: {now} > {prev}");
            }
            if previous.is_some() {
                assert!(best.is_some(), "best disappeared at radius {radius}");
            }
            previous = best;
        }
    }
}

#[test]
fn zero_radius_never_shifts() {
    let store = ForecastStore::from_series(vec![("SG", synthetic_series(7, 32))]);
    let series = store.series("SG");
    for sample in series {
        let outcome = find_best(series, sample.timestamp, 0);
        assert_eq!(outcome.best, Some(*sample));
        assert_eq!(outcome.baseline, Some(*sample));
    }
}

#[test]
fn equal_minimum_picks_earliest_regardless_of_order() {
    let mut series = vec![
        ForecastSample::new(at(10, 30), 20),
        ForecastSample::new(at(9, 30), 20),
        ForecastSample::new(at(10, 0), 35),
        ForecastSample::new(at(10, 15), 20),
    ];
    for _ in 0..series.len() {
        series.rotate_left(1);
        let best = find_best(&series, at(10, 0), 60).best.unwrap();
        assert_eq!(best.timestamp, at(9, 30));
        let reversed: Vec<_> = series.iter().rev().copied().collect();
        assert_eq!(find_best(&reversed, at(10, 0), 60).best, Some(best));
    }
}

#[test]
fn snap_is_idempotent_on_grid() {
    let mut t = at(0, 0);
    for step in 0..500 {
        t += TimeDelta::seconds(173 + step);
        let s = snap(t);
        assert_eq!(snap(s), s);
        assert!(s <= t);
        assert!(t - s < TimeDelta::minutes(15));
    }
}
