/// Storage layer for persisting weight data
///
/// This module defines the store contract shared by the SQLite-backed store
/// and the in-memory store, plus the errors both of them report.

pub mod memory;
pub mod query;
pub mod schema;
pub mod sqlite;

// Re-export the main storage types
pub use memory::MemoryStore;
pub use query::apply_list_options;
pub use sqlite::SqliteStore;

use thiserror::Error;

use crate::domain::{DomainError, EntryId, EntryPatch, ListOptions, NewEntry, User, WeightEntry};

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Database query error: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("weight entry with id {id} not found")]
    NotFound { id: EntryId },

    #[error("invalid ID: {0}")]
    InvalidId(i64),

    #[error("validation failed: {0}")]
    Validation(#[from] DomainError),

    #[error("user {username} not found")]
    UserNotFound { username: String },

    #[error("user {username} already exists")]
    DuplicateUser { username: String },

    #[error("Schema error: {0}")]
    Schema(String),
}

impl StorageError {
    /// Whether this error means the requested entry does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::NotFound { .. })
    }
}

/// Reject ids no store could have assigned, before any lookup
pub(crate) fn ensure_valid_id(id: EntryId) -> Result<(), StorageError> {
    if id.value() <= 0 {
        return Err(StorageError::InvalidId(id.value()));
    }
    Ok(())
}

/// Trait defining the storage interface for weight entries
///
/// Both implementations honour the same observable contract, with one
/// documented difference: `SqliteStore::add` validates the entry, while
/// `MemoryStore::add` stores whatever it is given. Callers that need the
/// guarantee validate before calling `add`.
pub trait WeightStore {
    /// Persist a new entry and return the stored copy with its assigned id
    fn add(&self, entry: NewEntry) -> Result<WeightEntry, StorageError>;

    /// Get an entry by ID
    fn get(&self, id: EntryId) -> Result<WeightEntry, StorageError>;

    /// List entries: date range filter, unit/owner filter, stable sort, limit
    fn list(&self, options: &ListOptions) -> Result<Vec<WeightEntry>, StorageError>;

    /// Merge a partial update over an existing entry, validate and persist it
    fn update(&self, patch: &EntryPatch) -> Result<WeightEntry, StorageError>;

    /// Delete an entry by ID
    fn delete(&self, id: EntryId) -> Result<(), StorageError>;

    /// Release underlying resources
    fn close(self) -> Result<(), StorageError>
    where
        Self: Sized;
}

/// Trait defining the storage interface for users
pub trait UserStore {
    /// Create a new user; usernames are unique
    fn create_user(&self, user: &User) -> Result<(), StorageError>;

    /// Get a user by username
    fn get_user_by_name(&self, username: &str) -> Result<User, StorageError>;

    /// List all users ordered by username
    fn list_users(&self) -> Result<Vec<User>, StorageError>;

    /// Remove every weight entry and every user
    fn reset(&self) -> Result<(), StorageError>;
}
