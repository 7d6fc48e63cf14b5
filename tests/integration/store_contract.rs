/// Both store implementations run through the same observable contract
use chrono::NaiveDate;
use tempfile::tempdir;
use weight_tracker::*;

fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

fn add<S: WeightStore>(store: &S, weight: f64, date: Option<NaiveDate>, unit: Unit) -> WeightEntry {
    let entry = NewEntry::new(weight, date, Some(unit), None).expect("valid entry");
    store.add(entry).expect("add succeeds")
}

fn ids(entries: &[WeightEntry]) -> Vec<i64> {
    entries.iter().map(|e| e.id.value()).collect()
}

fn check_crud<S: WeightStore>(store: &S) {
    let added = store
        .add(
            NewEntry::new(75.5, date(2025, 1, 1), Some(Unit::Kg), Some("first".to_string()))
                .unwrap(),
        )
        .unwrap();
    assert!(added.id.value() > 0);

    let fetched = store.get(added.id).unwrap();
    assert_eq!(fetched, added);

    let updated = store
        .update(&EntryPatch::new(added.id).weight(74.0))
        .unwrap();
    assert_eq!(updated.weight, 74.0);
    assert_eq!(updated.note.as_deref(), Some("first"));
    assert_eq!(store.get(added.id).unwrap(), updated);

    store.delete(added.id).unwrap();
    assert!(store.get(added.id).unwrap_err().is_not_found());
    assert!(store.delete(added.id).unwrap_err().is_not_found());
}

fn check_invalid_ids<S: WeightStore>(store: &S) {
    for raw in [0, -5] {
        let id = EntryId(raw);
        assert!(matches!(store.get(id), Err(StorageError::InvalidId(_))));
        assert!(matches!(store.delete(id), Err(StorageError::InvalidId(_))));
        assert!(matches!(
            store.update(&EntryPatch::new(id).weight(70.0)),
            Err(StorageError::InvalidId(_))
        ));
    }

    assert!(matches!(
        store.update(&EntryPatch::new(EntryId(999)).weight(70.0)),
        Err(StorageError::NotFound { .. })
    ));
}

fn check_list_pipeline<S: WeightStore>(store: &S) {
    add(store, 80.0, date(2025, 1, 10), Unit::Kg);
    add(store, 78.0, date(2025, 1, 5), Unit::Lbs);
    add(store, 79.0, None, Unit::Kg);
    add(store, 78.0, date(2025, 1, 20), Unit::Kg);

    // Newest first, undated last
    let listed = store.list(&ListOptions::default()).unwrap();
    assert_eq!(ids(&listed), vec![4, 1, 2, 3]);

    // Ties keep insertion order in both directions
    let by_weight = ListOptions::default().sorted_by(SortKey::Weight, SortDirection::Ascending);
    assert_eq!(ids(&store.list(&by_weight).unwrap()), vec![2, 4, 3, 1]);
    let by_weight_desc = ListOptions::default().sorted_by(SortKey::Weight, SortDirection::Descending);
    assert_eq!(ids(&store.list(&by_weight_desc).unwrap()), vec![1, 3, 2, 4]);

    // Inclusive range, undated entries excluded
    let range = ListOptions::default()
        .between(date(2025, 1, 5), date(2025, 1, 10))
        .sorted_by(SortKey::Date, SortDirection::Ascending);
    assert_eq!(ids(&store.list(&range).unwrap()), vec![2, 1]);

    let lbs = ListOptions::default().with_unit(Unit::Lbs);
    assert_eq!(ids(&store.list(&lbs).unwrap()), vec![2]);

    // Limit applies after sorting
    let limited = ListOptions::default().with_limit(2);
    assert_eq!(ids(&store.list(&limited).unwrap()), vec![4, 1]);

    // Calendar order holds at both ends of the year range
    add(store, 81.0, date(9999, 12, 31), Unit::Kg);
    add(store, 82.0, date(1, 1, 1), Unit::Kg);
    let oldest_first = ListOptions::default().sorted_by(SortKey::Date, SortDirection::Ascending);
    assert_eq!(ids(&store.list(&oldest_first).unwrap()), vec![3, 6, 2, 1, 4, 5]);
    let recent = ListOptions::default()
        .between(date(2025, 1, 15), None)
        .sorted_by(SortKey::Date, SortDirection::Ascending);
    assert_eq!(ids(&store.list(&recent).unwrap()), vec![4, 5]);

    // Years past 9999 never reach either store
    assert!(matches!(
        NewEntry::new(70.0, date(10000, 1, 1), Some(Unit::Kg), None),
        Err(DomainError::DateOutOfRange(_))
    ));
    let too_late = EntryPatch::new(EntryId(1)).date(NaiveDate::from_ymd_opt(10000, 1, 1).unwrap());
    assert!(matches!(
        store.update(&too_late),
        Err(StorageError::Validation(DomainError::DateOutOfRange(_)))
    ));
    assert_eq!(store.get(EntryId(1)).unwrap().date, date(2025, 1, 10));
}

fn check_update_failure_is_atomic<S: WeightStore>(store: &S) {
    let entry = add(store, 70.0, date(2025, 2, 1), Unit::Kg);

    let patch = EntryPatch::new(entry.id).weight(-1.0).note("changed");
    assert!(matches!(
        store.update(&patch),
        Err(StorageError::Validation(DomainError::InvalidWeight(_)))
    ));
    assert_eq!(store.get(entry.id).unwrap(), entry);
}

fn check_sparse_patch<S: WeightStore>(store: &S) {
    let entry = add(store, 70.0, date(2025, 2, 1), Unit::Kg);

    let mut changes = entry.clone();
    changes.weight = 0.0;
    changes.date = None;
    changes.unit = Some(Unit::Lbs);
    changes.note = Some(String::new());

    let updated = store.update(&EntryPatch::sparse(&changes)).unwrap();
    assert_eq!(updated.weight, 70.0);
    assert_eq!(updated.date, entry.date);
    assert_eq!(updated.unit, Some(Unit::Lbs));
}

fn check_owner_scoping<S: WeightStore + UserStore>(store: &S) {
    let user = User::new("noa").unwrap();
    store.create_user(&user).unwrap();

    let mine = NewEntry::new(65.0, date(2025, 3, 1), Some(Unit::Kg), None)
        .unwrap()
        .owned_by(user.id);
    let mine = store.add(mine).unwrap();
    add(store, 90.0, date(2025, 3, 2), Unit::Kg);

    let scoped = store.list(&ListOptions::default().owned_by(user.id)).unwrap();
    assert_eq!(scoped, vec![mine]);
    assert_eq!(store.list(&ListOptions::default()).unwrap().len(), 2);

    store.reset().unwrap();
    assert!(store.list(&ListOptions::default()).unwrap().is_empty());
    assert!(store.list_users().unwrap().is_empty());
}

fn sqlite_store() -> (tempfile::TempDir, SqliteStore) {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let store = SqliteStore::new(temp_dir.path().join("weights.db")).expect("Failed to open store");
    (temp_dir, store)
}

#[test]
fn test_crud_memory() {
    check_crud(&MemoryStore::new());
}

#[test]
fn test_crud_sqlite() {
    let (_dir, store) = sqlite_store();
    check_crud(&store);
}

#[test]
fn test_invalid_ids_memory() {
    check_invalid_ids(&MemoryStore::new());
}

#[test]
fn test_invalid_ids_sqlite() {
    let (_dir, store) = sqlite_store();
    check_invalid_ids(&store);
}

#[test]
fn test_list_pipeline_memory() {
    check_list_pipeline(&MemoryStore::new());
}

#[test]
fn test_list_pipeline_sqlite() {
    let (_dir, store) = sqlite_store();
    check_list_pipeline(&store);
}

#[test]
fn test_update_failure_is_atomic_memory() {
    check_update_failure_is_atomic(&MemoryStore::new());
}

#[test]
fn test_update_failure_is_atomic_sqlite() {
    let (_dir, store) = sqlite_store();
    check_update_failure_is_atomic(&store);
}

#[test]
fn test_sparse_patch_memory() {
    check_sparse_patch(&MemoryStore::new());
}

#[test]
fn test_sparse_patch_sqlite() {
    let (_dir, store) = sqlite_store();
    check_sparse_patch(&store);
}

#[test]
fn test_owner_scoping_memory() {
    check_owner_scoping(&MemoryStore::new());
}

#[test]
fn test_owner_scoping_sqlite() {
    let (_dir, store) = sqlite_store();
    check_owner_scoping(&store);
}

#[test]
fn test_add_validation_differs_between_stores() {
    let invalid = NewEntry {
        weight: -3.0,
        ..NewEntry::default()
    };

    let (_dir, sqlite) = sqlite_store();
    assert!(matches!(
        sqlite.add(invalid.clone()),
        Err(StorageError::Validation(DomainError::InvalidWeight(_)))
    ));

    let memory = MemoryStore::new();
    assert!(memory.add(invalid).is_ok());
}
