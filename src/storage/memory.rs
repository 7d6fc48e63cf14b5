/// In-memory weight store.
///
/// Backed by a plain `Vec` with a sequential id counter. Uses interior
/// mutability, so it is neither `Sync` nor meant for more than one caller.
/// Intended for tests and short-lived in-process use.

use std::cell::{Cell, RefCell};

use crate::domain::{EntryId, EntryPatch, ListOptions, NewEntry, User, WeightEntry};
use crate::storage::{apply_list_options, ensure_valid_id, StorageError, UserStore, WeightStore};

pub struct MemoryStore {
    entries: RefCell<Vec<WeightEntry>>,
    users: RefCell<Vec<User>>,
    next_id: Cell<i64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            entries: RefCell::new(Vec::new()),
            users: RefCell::new(Vec::new()),
            next_id: Cell::new(1),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl WeightStore for MemoryStore {
    /// Store the entry as given; no validation happens here
    fn add(&self, entry: NewEntry) -> Result<WeightEntry, StorageError> {
        let id = EntryId(self.next_id.get());
        self.next_id.set(id.value() + 1);

        let stored = entry.into_entry(id);
        self.entries.borrow_mut().push(stored.clone());
        Ok(stored)
    }

    fn get(&self, id: EntryId) -> Result<WeightEntry, StorageError> {
        ensure_valid_id(id)?;

        self.entries
            .borrow()
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or(StorageError::NotFound { id })
    }

    fn list(&self, options: &ListOptions) -> Result<Vec<WeightEntry>, StorageError> {
        let snapshot = self.entries.borrow().clone();
        Ok(apply_list_options(snapshot, options))
    }

    fn update(&self, patch: &EntryPatch) -> Result<WeightEntry, StorageError> {
        ensure_valid_id(patch.id)?;

        let mut entries = self.entries.borrow_mut();
        let existing = entries
            .iter_mut()
            .find(|e| e.id == patch.id)
            .ok_or(StorageError::NotFound { id: patch.id })?;

        let merged = patch.apply_to(existing)?;
        *existing = merged.clone();
        Ok(merged)
    }

    fn delete(&self, id: EntryId) -> Result<(), StorageError> {
        ensure_valid_id(id)?;

        let mut entries = self.entries.borrow_mut();
        let index = entries
            .iter()
            .position(|e| e.id == id)
            .ok_or(StorageError::NotFound { id })?;

        entries.remove(index);
        Ok(())
    }

    fn close(self) -> Result<(), StorageError> {
        Ok(())
    }
}

impl UserStore for MemoryStore {
    fn create_user(&self, user: &User) -> Result<(), StorageError> {
        let mut users = self.users.borrow_mut();
        if users.iter().any(|u| u.username == user.username) {
            return Err(StorageError::DuplicateUser {
                username: user.username.clone(),
            });
        }
        users.push(user.clone());
        Ok(())
    }

    fn get_user_by_name(&self, username: &str) -> Result<User, StorageError> {
        self.users
            .borrow()
            .iter()
            .find(|u| u.username == username)
            .cloned()
            .ok_or_else(|| StorageError::UserNotFound {
                username: username.to_string(),
            })
    }

    fn list_users(&self) -> Result<Vec<User>, StorageError> {
        let mut users = self.users.borrow().clone();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(users)
    }

    fn reset(&self) -> Result<(), StorageError> {
        self.entries.borrow_mut().clear();
        self.users.borrow_mut().clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Unit;

    #[test]
    fn test_ids_are_sequential_and_not_reused() {
        let store = MemoryStore::new();
        let first = store.add(NewEntry::new(70.0, None, None, None).unwrap()).unwrap();
        let second = store.add(NewEntry::new(71.0, None, None, None).unwrap()).unwrap();
        assert_eq!(first.id, EntryId(1));
        assert_eq!(second.id, EntryId(2));

        store.delete(second.id).unwrap();
        let third = store.add(NewEntry::new(72.0, None, None, None).unwrap()).unwrap();
        assert_eq!(third.id, EntryId(3));
    }

    #[test]
    fn test_add_does_not_validate() {
        // The SQLite store rejects this entry; the in-memory store keeps it
        let store = MemoryStore::new();
        let invalid = NewEntry {
            weight: -1.0,
            ..NewEntry::default()
        };

        let stored = store.add(invalid).unwrap();
        assert_eq!(store.get(stored.id).unwrap().weight, -1.0);
    }

    #[test]
    fn test_update_keeps_position() {
        let store = MemoryStore::new();
        let a = store.add(NewEntry::new(70.0, None, None, None).unwrap()).unwrap();
        let b = store.add(NewEntry::new(70.0, None, None, None).unwrap()).unwrap();

        store.update(&EntryPatch::new(a.id).unit(Unit::Lbs)).unwrap();

        let listed = store.list(&ListOptions::default()).unwrap();
        let ids: Vec<EntryId> = listed.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![a.id, b.id]);
    }
}
