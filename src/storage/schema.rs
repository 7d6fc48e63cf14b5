/// Database schema bootstrap
///
/// Creates the users and weights tables and their indexes when they don't
/// exist yet. Evolving an existing schema is out of scope; a database with
/// a newer schema version is refused instead of being modified.

use rusqlite::Connection;

use crate::storage::StorageError;

/// Schema version this build reads and writes
const SCHEMA_VERSION: i32 = 1;

/// Initialize the database schema
///
/// Safe to call on every start-up: all statements are idempotent.
pub fn initialize_database(conn: &Connection) -> Result<(), StorageError> {
    let version = get_schema_version(conn)?;

    if version > SCHEMA_VERSION {
        return Err(StorageError::Schema(format!(
            "database schema version {} is newer than supported version {}",
            version, SCHEMA_VERSION
        )));
    }

    create_tables(conn)?;
    create_indexes(conn)?;

    if version < SCHEMA_VERSION {
        conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
        tracing::info!("Initialized database schema v{}", SCHEMA_VERSION);
    }

    Ok(())
}

/// Get the schema version recorded in the database header
fn get_schema_version(conn: &Connection) -> Result<i32, StorageError> {
    let version = conn.query_row("PRAGMA user_version", [], |row| row.get::<_, i32>(0))?;
    Ok(version)
}

fn create_tables(conn: &Connection) -> Result<(), StorageError> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY,
            username TEXT NOT NULL UNIQUE,
            created_at TEXT NOT NULL
        )",
        [],
    )?;

    // Dates are always stored as ISO yyyy-mm-dd text; NULL means no date
    conn.execute(
        "CREATE TABLE IF NOT EXISTS weights (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            weight REAL NOT NULL,
            date TEXT,
            unit TEXT CHECK (unit IN ('kg', 'lbs')),
            note TEXT,
            user_id TEXT,
            FOREIGN KEY (user_id) REFERENCES users (id) ON DELETE CASCADE
        )",
        [],
    )?;

    Ok(())
}

fn create_indexes(conn: &Connection) -> Result<(), StorageError> {
    // Range filters and the default date ordering
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_weights_date ON weights (date)",
        [],
    )?;

    // Per-user listings
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_weights_user ON weights (user_id, date)",
        [],
    )?;

    Ok(())
}
