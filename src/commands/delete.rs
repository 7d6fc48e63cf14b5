/// Handler for deleting an entry

use serde::Serialize;

use crate::domain::{EntryId, WeightEntry};
use crate::storage::WeightStore;
use crate::AppError;

/// Response from deleting an entry
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub id: EntryId,
    pub message: String,
}

/// Look up the entry about to be deleted, for confirmation
pub fn find_entry<S: WeightStore>(store: &S, id: i64) -> Result<WeightEntry, AppError> {
    Ok(store.get(EntryId(id))?)
}

pub fn delete_entry<S: WeightStore>(store: &S, id: i64) -> Result<DeleteResponse, AppError> {
    let id = EntryId(id);
    store.delete(id)?;
    tracing::debug!("Deleted weight entry {}", id);

    Ok(DeleteResponse {
        id,
        message: format!("Successfully deleted weight entry with ID {}.", id),
    })
}
