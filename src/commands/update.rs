/// Handler for partially updating an entry
///
/// Updating is split in two so the caller can show the result and ask for
/// confirmation in between: `prepare_update` builds and validates the
/// merged entry without touching the store, `apply_update` persists it.

use serde::{Deserialize, Serialize};

use crate::commands::parse_optional_date;
use crate::config::AppConfig;
use crate::domain::{validate_weight, EntryId, EntryPatch, Unit, WeightEntry};
use crate::storage::WeightStore;
use crate::AppError;

/// Parameters for updating an entry; `None` leaves a field as it is
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateParams {
    pub id: i64,
    pub weight: Option<f64>,
    pub date: Option<String>,
    pub unit: Option<String>,
    pub note: Option<String>,
}

/// The stored entry next to what it would become
#[derive(Debug, Clone, Serialize)]
pub struct UpdatePreview {
    pub current: WeightEntry,
    pub updated: WeightEntry,
    pub patch: EntryPatch,
}

/// Build the patch and check the merged entry, without persisting
///
/// Blank text fields count as not given. Fails when nothing would change.
pub fn prepare_update<S: WeightStore>(
    store: &S,
    config: &AppConfig,
    params: UpdateParams,
) -> Result<UpdatePreview, AppError> {
    let id = EntryId(params.id);
    let current = store.get(id)?;

    let mut patch = EntryPatch::new(id);

    if let Some(weight) = params.weight {
        validate_weight(weight)?;
        patch = patch.weight(weight);
    }
    if let Some(date) = parse_optional_date(config, params.date.as_deref())? {
        patch = patch.date(date);
    }
    if let Some(unit) = Unit::parse_optional(params.unit.as_deref().unwrap_or("").trim())? {
        patch = patch.unit(unit);
    }
    if let Some(note) = params.note.filter(|n| !n.is_empty()) {
        patch = patch.note(note);
    }

    if patch.is_empty() {
        return Err(AppError::NothingToUpdate);
    }

    let updated = patch.apply_to(&current)?;

    Ok(UpdatePreview {
        current,
        updated,
        patch,
    })
}

/// Persist a prepared update
pub fn apply_update<S: WeightStore>(store: &S, preview: &UpdatePreview) -> Result<WeightEntry, AppError> {
    let entry = store.update(&preview.patch)?;
    tracing::debug!("Updated weight entry {}", entry.id);
    Ok(entry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DomainError, NewEntry};
    use crate::storage::{MemoryStore, StorageError};
    use chrono::NaiveDate;

    fn store_with_entry() -> (MemoryStore, EntryId) {
        let store = MemoryStore::new();
        let entry = NewEntry::new(
            80.0,
            NaiveDate::from_ymd_opt(2025, 3, 1),
            Some(Unit::Kg),
            Some("morning".to_string()),
        )
        .unwrap();
        let id = store.add(entry).unwrap().id;
        (store, id)
    }

    #[test]
    fn test_preview_does_not_persist() {
        let (store, id) = store_with_entry();
        let params = UpdateParams {
            id: id.value(),
            weight: Some(79.5),
            ..UpdateParams::default()
        };

        let preview = prepare_update(&store, &AppConfig::default(), params).unwrap();
        assert_eq!(preview.current.weight, 80.0);
        assert_eq!(preview.updated.weight, 79.5);
        assert_eq!(preview.updated.note.as_deref(), Some("morning"));
        assert_eq!(store.get(id).unwrap().weight, 80.0);

        let saved = apply_update(&store, &preview).unwrap();
        assert_eq!(saved, preview.updated);
        assert_eq!(store.get(id).unwrap().weight, 79.5);
    }

    #[test]
    fn test_nothing_to_update() {
        let (store, id) = store_with_entry();
        let params = UpdateParams {
            id: id.value(),
            note: Some(String::new()),
            unit: Some(String::new()),
            ..UpdateParams::default()
        };

        let err = prepare_update(&store, &AppConfig::default(), params).unwrap_err();
        assert!(matches!(err, AppError::NothingToUpdate));
    }

    #[test]
    fn test_invalid_field_aborts_whole_update() {
        let (store, id) = store_with_entry();
        let params = UpdateParams {
            id: id.value(),
            weight: Some(-2.0),
            note: Some("new note".to_string()),
            ..UpdateParams::default()
        };

        let err = prepare_update(&store, &AppConfig::default(), params).unwrap_err();
        assert!(matches!(err, AppError::Domain(DomainError::InvalidWeight(_))));
        assert_eq!(store.get(id).unwrap().note.as_deref(), Some("morning"));
    }

    #[test]
    fn test_unknown_and_invalid_ids() {
        let (store, _) = store_with_entry();

        let err = prepare_update(
            &store,
            &AppConfig::default(),
            UpdateParams { id: 42, weight: Some(70.0), ..UpdateParams::default() },
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Storage(StorageError::NotFound { .. })));

        let err = prepare_update(
            &store,
            &AppConfig::default(),
            UpdateParams { id: 0, weight: Some(70.0), ..UpdateParams::default() },
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Storage(StorageError::InvalidId(0))));
    }
}
