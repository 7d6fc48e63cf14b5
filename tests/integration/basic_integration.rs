/// Basic integration tests
use std::path::Path;

use tempfile::{tempdir, TempDir};
use weight_tracker::commands::{self, AddParams, ListParams, StatsParams};
use weight_tracker::*;

fn config_in(dir: &Path) -> AppConfig {
    AppConfig {
        database_path: Some(dir.join("data").join("weights.db")),
        session_path: Some(dir.join("session.json")),
        ..AppConfig::default()
    }
}

fn open(dir: &TempDir) -> WeightTracker<SqliteStore> {
    WeightTracker::open(config_in(dir.path()), None).expect("Failed to open tracker")
}

#[test]
fn test_tracker_basic_workflow() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let tracker = open(&temp_dir);
    assert!(tracker.current_user().is_none());

    let added = commands::add_entry(
        tracker.store(),
        tracker.config(),
        AddParams {
            weight: 75.5,
            date: Some("01-01-2024".to_string()),
            ..AddParams::default()
        },
    )
    .unwrap();
    assert_eq!(added.entry.unit, Some(Unit::Kg));

    let listed = commands::list_entries(tracker.store(), tracker.config(), ListParams::default())
        .unwrap();
    assert_eq!(listed.entries, vec![added.entry]);

    tracker.close().unwrap();
}

#[test]
fn test_database_persistence() {
    let temp_dir = tempdir().expect("Failed to create temp dir");

    let tracker = open(&temp_dir);
    let id = commands::add_entry(
        tracker.store(),
        tracker.config(),
        AddParams {
            weight: 80.0,
            ..AddParams::default()
        },
    )
    .unwrap()
    .entry
    .id;
    tracker.close().unwrap();

    let reopened = open(&temp_dir);
    assert_eq!(reopened.store().get(id).unwrap().weight, 80.0);
}

#[test]
fn test_logged_in_user_scopes_entries() {
    let temp_dir = tempdir().expect("Failed to create temp dir");

    // Unowned entry recorded before anyone registers
    let tracker = open(&temp_dir);
    commands::add_entry(
        tracker.store(),
        tracker.config(),
        AddParams {
            weight: 90.0,
            ..AddParams::default()
        },
    )
    .unwrap();
    commands::register_user(tracker.store(), tracker.session_path(), "yael").unwrap();
    tracker.close().unwrap();

    // Next invocation picks the user up from the session file
    let tracker = open(&temp_dir);
    let user = tracker.current_user().cloned().expect("user restored from session");
    assert_eq!(user.username, "yael");

    let added = commands::add_entry(
        tracker.store(),
        tracker.config(),
        AddParams {
            weight: 60.0,
            owner: tracker.owner(),
            ..AddParams::default()
        },
    )
    .unwrap();
    assert_eq!(added.entry.owner, Some(user.id));

    let listed = commands::list_entries(
        tracker.store(),
        tracker.config(),
        ListParams {
            owner: tracker.owner(),
            ..ListParams::default()
        },
    )
    .unwrap();
    assert_eq!(listed.entries.len(), 1);

    let stats = commands::compute_stats(tracker.store(), StatsParams { owner: tracker.owner() })
        .unwrap();
    assert_eq!(stats.total_entries, 1);
    assert_eq!(stats.max_weight, 60.0);

    commands::reset_database(tracker.store(), tracker.session_path()).unwrap();
    tracker.close().unwrap();

    let tracker = open(&temp_dir);
    assert!(tracker.current_user().is_none());
    assert!(tracker.store().list(&ListOptions::default()).unwrap().is_empty());
}

#[test]
fn test_memory_backed_tracker() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let tracker = WeightTracker::with_store(
        MemoryStore::new(),
        AppConfig::default(),
        temp_dir.path().join("session.json"),
    )
    .unwrap();

    assert!(tracker.owner().is_none());
    assert!(tracker.store().is_empty());
}
