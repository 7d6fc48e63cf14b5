/// SQLite implementation of the weight store
///
/// This module provides the relational store. Filters, ordering and the
/// limit of a listing are all pushed down into a single parameterized query.

use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::types::{Type, Value};
use rusqlite::{params, params_from_iter, Connection, Row};

use crate::domain::{
    EntryId, EntryPatch, ListOptions, NewEntry, SortDirection, SortKey, Unit, User, UserId,
    WeightEntry,
};
use crate::storage::{ensure_valid_id, schema, StorageError, UserStore, WeightStore};

/// Storage format for dates, independent of any display or input format
pub const DB_DATE_FORMAT: &str = "%Y-%m-%d";

const ENTRY_COLUMNS: &str = "id, weight, date, unit, note, user_id";

/// SQLite-based storage implementation
///
/// Holds a single connection; one command invocation uses one store.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the database file and make sure the schema exists
    pub fn new(db_path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let db_path = db_path.as_ref();
        let conn = Connection::open(db_path)
            .map_err(|e| StorageError::Connection(format!("Failed to open database: {}", e)))?;

        let store = Self::with_connection(conn)?;
        tracing::info!("SQLite storage initialized at: {}", db_path.display());
        Ok(store)
    }

    /// A private in-memory database, mostly useful for tests
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StorageError::Connection(format!("Failed to open database: {}", e)))?;
        Self::with_connection(conn)
    }

    /// Wrap an existing connection, enabling foreign keys and bootstrapping the schema
    pub fn with_connection(conn: Connection) -> Result<Self, StorageError> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")
            .map_err(|e| StorageError::Connection(format!("Failed to enable foreign keys: {}", e)))?;

        schema::initialize_database(&conn)?;

        Ok(Self { conn })
    }

    #[cfg(test)]
    pub(crate) fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Build the listing query and its positional parameters
    fn build_list_query(options: &ListOptions) -> (String, Vec<Value>) {
        let mut sql = format!("SELECT {} FROM weights WHERE 1 = 1", ENTRY_COLUMNS);
        let mut values: Vec<Value> = Vec::new();

        if let Some(from) = options.from_date {
            values.push(Value::Text(format_db_date(from)));
            sql.push_str(&format!(" AND date IS NOT NULL AND date >= ?{}", values.len()));
        }
        if let Some(to) = options.to_date {
            values.push(Value::Text(format_db_date(to)));
            sql.push_str(&format!(" AND date IS NOT NULL AND date <= ?{}", values.len()));
        }
        if let Some(unit) = options.unit {
            values.push(Value::Text(unit.as_str().to_string()));
            sql.push_str(&format!(" AND unit = ?{}", values.len()));
        }
        if let Some(owner) = options.owner {
            values.push(Value::Text(owner.to_string()));
            sql.push_str(&format!(" AND user_id = ?{}", values.len()));
        }

        let column = match options.sort_by {
            SortKey::Date => "date",
            SortKey::Weight => "weight",
        };
        let direction = match options.direction {
            SortDirection::Ascending => "ASC",
            SortDirection::Descending => "DESC",
        };
        // id breaks ties in insertion order, like a stable sort would
        sql.push_str(&format!(" ORDER BY {} {}, id ASC", column, direction));

        // SQLite treats a negative limit as "no limit"
        let limit = if options.limit > 0 { options.limit as i64 } else { -1 };
        values.push(Value::Integer(limit));
        sql.push_str(&format!(" LIMIT ?{}", values.len()));

        (sql, values)
    }

    fn fetch_entry(&self, id: EntryId) -> Result<WeightEntry, StorageError> {
        let result = self.conn.query_row(
            &format!("SELECT {} FROM weights WHERE id = ?1", ENTRY_COLUMNS),
            params![id.value()],
            row_to_entry,
        );

        match result {
            Ok(entry) => Ok(entry),
            Err(rusqlite::Error::QueryReturnedNoRows) => Err(StorageError::NotFound { id }),
            Err(e) => Err(StorageError::Query(e)),
        }
    }
}

impl WeightStore for SqliteStore {
    /// Validate and insert a new entry
    fn add(&self, entry: NewEntry) -> Result<WeightEntry, StorageError> {
        entry.validate()?;

        self.conn.execute(
            "INSERT INTO weights (weight, date, unit, note, user_id)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                entry.weight,
                entry.date.map(format_db_date),
                entry.unit.map(|u| u.as_str()),
                entry.note.as_deref().filter(|n| !n.is_empty()),
                entry.owner.map(|o| o.to_string()),
            ],
        )?;

        let id = EntryId(self.conn.last_insert_rowid());
        tracing::debug!("Added weight entry {} ({} {:?})", id, entry.weight, entry.unit);

        Ok(entry.into_entry(id))
    }

    fn get(&self, id: EntryId) -> Result<WeightEntry, StorageError> {
        ensure_valid_id(id)?;
        self.fetch_entry(id)
    }

    fn list(&self, options: &ListOptions) -> Result<Vec<WeightEntry>, StorageError> {
        let (sql, values) = Self::build_list_query(options);
        tracing::debug!("Listing weight entries: {}", sql);

        let mut stmt = self.conn.prepare(&sql)?;
        let entry_iter = stmt.query_map(params_from_iter(values), row_to_entry)?;

        let mut entries = Vec::new();
        for entry in entry_iter {
            entries.push(entry?);
        }

        Ok(entries)
    }

    fn update(&self, patch: &EntryPatch) -> Result<WeightEntry, StorageError> {
        ensure_valid_id(patch.id)?;

        let existing = self.fetch_entry(patch.id)?;
        let merged = patch.apply_to(&existing)?;

        let rows_affected = self.conn.execute(
            "UPDATE weights SET
                weight = ?2,
                date = ?3,
                unit = ?4,
                note = ?5,
                user_id = ?6
             WHERE id = ?1",
            params![
                merged.id.value(),
                merged.weight,
                merged.date.map(format_db_date),
                merged.unit.map(|u| u.as_str()),
                merged.note,
                merged.owner.map(|o| o.to_string()),
            ],
        )?;

        if rows_affected == 0 {
            return Err(StorageError::NotFound { id: patch.id });
        }

        tracing::debug!("Updated weight entry {}", merged.id);
        Ok(merged)
    }

    fn delete(&self, id: EntryId) -> Result<(), StorageError> {
        ensure_valid_id(id)?;

        let rows_affected = self
            .conn
            .execute("DELETE FROM weights WHERE id = ?1", params![id.value()])?;

        if rows_affected == 0 {
            return Err(StorageError::NotFound { id });
        }

        tracing::debug!("Deleted weight entry {}", id);
        Ok(())
    }

    fn close(self) -> Result<(), StorageError> {
        self.conn.close().map_err(|(_, e)| StorageError::Query(e))
    }
}

impl UserStore for SqliteStore {
    fn create_user(&self, user: &User) -> Result<(), StorageError> {
        match self.get_user_by_name(&user.username) {
            Ok(_) => {
                return Err(StorageError::DuplicateUser {
                    username: user.username.clone(),
                })
            }
            Err(StorageError::UserNotFound { .. }) => {}
            Err(e) => return Err(e),
        }

        self.conn.execute(
            "INSERT INTO users (id, username, created_at) VALUES (?1, ?2, ?3)",
            params![user.id.to_string(), user.username, user.created_at.to_rfc3339()],
        )?;

        tracing::debug!("Created user: {} ({})", user.username, user.id);
        Ok(())
    }

    fn get_user_by_name(&self, username: &str) -> Result<User, StorageError> {
        let result = self.conn.query_row(
            "SELECT id, username, created_at FROM users WHERE username = ?1",
            params![username],
            row_to_user,
        );

        match result {
            Ok(user) => Ok(user),
            Err(rusqlite::Error::QueryReturnedNoRows) => Err(StorageError::UserNotFound {
                username: username.to_string(),
            }),
            Err(e) => Err(StorageError::Query(e)),
        }
    }

    fn list_users(&self) -> Result<Vec<User>, StorageError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, username, created_at FROM users ORDER BY username")?;
        let user_iter = stmt.query_map([], row_to_user)?;

        let mut users = Vec::new();
        for user in user_iter {
            users.push(user?);
        }

        Ok(users)
    }

    fn reset(&self) -> Result<(), StorageError> {
        // Dropping the transaction without commit rolls both deletes back
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM weights", [])?;
        tx.execute("DELETE FROM users", [])?;
        tx.commit()?;

        tracing::info!("Removed all weight entries and users");
        Ok(())
    }
}

/// Format a date for storage (always ISO)
pub fn format_db_date(date: NaiveDate) -> String {
    date.format(DB_DATE_FORMAT).to_string()
}

fn row_to_entry(row: &Row<'_>) -> rusqlite::Result<WeightEntry> {
    let date_str: Option<String> = row.get(2)?;
    let date = date_str.as_deref().filter(|s| !s.is_empty()).and_then(|s| {
        NaiveDate::parse_from_str(s, DB_DATE_FORMAT)
            .map_err(|e| tracing::warn!("Ignoring unparseable stored date '{}': {}", s, e))
            .ok()
    });

    let unit_str: Option<String> = row.get(3)?;
    let unit = Unit::parse_optional(unit_str.as_deref().unwrap_or_default())
        .map_err(|e| rusqlite::Error::InvalidColumnType(3, e.to_string(), Type::Text))?;

    let note: Option<String> = row.get(4)?;

    let owner_str: Option<String> = row.get(5)?;
    let owner = owner_str
        .map(|s| UserId::parse(&s))
        .transpose()
        .map_err(|_| rusqlite::Error::InvalidColumnType(5, "Invalid UUID".to_string(), Type::Text))?;

    Ok(WeightEntry {
        id: EntryId(row.get(0)?),
        weight: row.get(1)?,
        date,
        unit,
        note: note.filter(|n| !n.is_empty()),
        owner,
    })
}

fn row_to_user(row: &Row<'_>) -> rusqlite::Result<User> {
    let id_str: String = row.get(0)?;
    let id = UserId::parse(&id_str)
        .map_err(|_| rusqlite::Error::InvalidColumnType(0, "Invalid UUID".to_string(), Type::Text))?;

    let created_at_str: String = row.get(2)?;
    let created_at = DateTime::parse_from_rfc3339(&created_at_str)
        .map_err(|_| rusqlite::Error::InvalidColumnType(2, "Invalid datetime".to_string(), Type::Text))?
        .with_timezone(&Utc);

    Ok(User {
        id,
        username: row.get(1)?,
        created_at,
    })
}
