use rusqlite::{Connection, OptionalExtension};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    SqliteError(#[from] rusqlite::Error),
    #[error("Failed to create storage directory: {0}")]
    DirectoryError(String),
}

/// Durable key-value storage backed by SQLite. Each slot holds one opaque
/// string value; writes always overwrite the whole value.
pub struct Storage {
    conn: Connection,
}

impl Storage {
    /// Open (or create) the storage file and initialize the schema
    pub fn new(path: &str) -> Result<Self, StorageError> {
        let db_path = PathBuf::from(path);

        // Create parent directory if it doesn't exist
        if let Some(parent) = db_path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| StorageError::DirectoryError(e.to_string()))?;
            }
        }

        let conn = Connection::open(&db_path)?;

        let storage = Storage { conn };
        storage.initialize_schema()?;

        Ok(storage)
    }

    /// Open an in-memory storage instance (used by tests)
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        let storage = Storage { conn };
        storage.initialize_schema()?;
        Ok(storage)
    }

    fn initialize_schema(&self) -> Result<(), StorageError> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS slots (
                key     TEXT PRIMARY KEY,
                value   TEXT NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    /// Read a slot's raw value, or None if the slot has never been written
    pub fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM slots WHERE key = ?1",
                rusqlite::params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Overwrite a slot's value, creating the slot if needed
    pub fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT INTO slots (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            rusqlite::params![key, value],
        )?;
        Ok(())
    }

    /// Remove a slot entirely. No-op if the slot does not exist.
    pub fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.conn
            .execute("DELETE FROM slots WHERE key = ?1", rusqlite::params![key])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_missing_slot_returns_none() {
        let storage = Storage::open_in_memory().expect("open storage");
        assert_eq!(storage.read("activities").expect("read"), None);
    }

    #[test]
    fn write_then_read_round_trips() {
        let storage = Storage::open_in_memory().expect("open storage");
        storage.write("streak", r#"{"count":1}"#).expect("write");
        assert_eq!(
            storage.read("streak").expect("read"),
            Some(r#"{"count":1}"#.to_string())
        );
    }

    #[test]
    fn write_overwrites_existing_value() {
        let storage = Storage::open_in_memory().expect("open storage");
        storage.write("k", "a").expect("write");
        storage.write("k", "b").expect("write");
        assert_eq!(storage.read("k").expect("read"), Some("b".to_string()));
    }

    #[test]
    fn remove_clears_slot_and_tolerates_missing() {
        let storage = Storage::open_in_memory().expect("open storage");
        storage.write("k", "a").expect("write");
        storage.remove("k").expect("remove");
        assert_eq!(storage.read("k").expect("read"), None);
        storage.remove("k").expect("remove missing slot");
    }
}
