//! File-backed profile store behaviour across instances and threads.

use std::sync::Arc;
use std::time::Duration;

use carbonshift::{FileProfileStore, PreferenceProfile, ProfileStore, ProfileUpdate};

fn store_in(dir: &tempfile::TempDir) -> FileProfileStore {
    FileProfileStore::new(dir.path().join("profile.json"))
}

#[test]
fn first_load_persists_default() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    assert_eq!(store.load(), PreferenceProfile::default());

    let raw = std::fs::read_to_string(store.path()).unwrap();
    let on_disk: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        on_disk,
        serde_json::json!({
            "regions_allowed": ["SG", "EU_WEST", "US_WEST"],
            "allowed_shift_minutes": 60
        })
    );
}

#[test]
fn save_of_load_is_a_no_op() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    store.update(&ProfileUpdate::from_csv(Some("us_west"), Some(90)));

    let before = store.load();
    store.save(&before);
    assert_eq!(store.load(), before);
}

#[test]
fn partial_updates_merge() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    let after_shift = store.update(&ProfileUpdate::from_csv(None, Some(15)));
    assert_eq!(after_shift.regions_allowed, vec!["SG", "EU_WEST", "US_WEST"]);

    let after_regions = store.update(&ProfileUpdate::from_csv(Some("EU_WEST"), None));
    assert_eq!(after_regions.regions_allowed, vec!["EU_WEST"]);
    assert_eq!(after_regions.allowed_shift_minutes, 15);

    let reopened = store_in(&dir);
    assert_eq!(reopened.load(), after_regions);
}

#[test]
fn corrupt_file_serves_default_and_is_left_alone() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("profile.json");
    std::fs::write(&path, "{ not json").unwrap();

    let store = FileProfileStore::new(&path);
    assert_eq!(store.load(), PreferenceProfile::default());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ not json");
}

#[test]
fn record_missing_a_field_takes_its_default() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("profile.json");
    std::fs::write(&path, r#"{"allowed_shift_minutes": 30}"#).unwrap();

    let profile = FileProfileStore::new(&path).load();
    assert_eq!(profile.allowed_shift_minutes, 30);
    assert_eq!(profile.regions_allowed, vec!["SG", "EU_WEST", "US_WEST"]);
}

#[test]
fn concurrent_updates_from_separate_instances_do_not_lose_fields() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("profile.json");

    for round in 0..10_u32 {
        let regions_store = Arc::new(
            FileProfileStore::new(&path).with_lock_timeout(Duration::from_secs(5)),
        );
        let shift_store = Arc::new(
            FileProfileStore::new(&path).with_lock_timeout(Duration::from_secs(5)),
        );
        let region = if round % 2 == 0 { "SG" } else { "US_WEST" };
        let shift = 15 * (round + 1);

        let a = {
            let store = Arc::clone(&regions_store);
            std::thread::spawn(move || store.update(&ProfileUpdate::from_csv(Some(region), None)))
        };
        let b = {
            let store = Arc::clone(&shift_store);
            std::thread::spawn(move || store.update(&ProfileUpdate::from_csv(None, Some(shift))))
        };
        a.join().unwrap();
        b.join().unwrap();

        let final_profile = FileProfileStore::new(&path).load();
        assert_eq!(final_profile.regions_allowed, vec![region], "round {round}");
        assert_eq!(final_profile.allowed_shift_minutes, shift, "round {round}");
    }
}

#[test]
fn many_threads_one_instance() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(store_in(&dir));

    let handles: Vec<_> = (0..8_u32)
        .map(|i| {
            let store = Arc::clone(&store);
            std::thread::spawn(move || {
                if i % 2 == 0 {
                    store.update(&ProfileUpdate::from_csv(Some("EU_WEST,SG"), None));
                } else {
                    store.update(&ProfileUpdate::from_csv(None, Some(120)));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let profile = store.load();
    assert_eq!(profile.regions_allowed, vec!["EU_WEST", "SG"]);
    assert_eq!(profile.allowed_shift_minutes, 120);
    assert!(!store.path().with_extension("lock").exists());
}
