use super::KeyValueStore;
use crate::database;
use crate::error::AppError;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// Key-value store backed by the `kv_store` table
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens the store inside `data_dir`, creating the database if needed
    pub fn open(data_dir: &Path) -> Result<Self, AppError> {
        Ok(Self {
            conn: database::init_database(data_dir)?,
        })
    }

    /// Wraps an already opened connection, initialising the schema
    pub fn from_connection(conn: Connection) -> Result<Self, AppError> {
        database::schema::init_schema(&conn)?;
        Ok(Self { conn })
    }

    pub fn in_memory() -> Result<Self, AppError> {
        Self::from_connection(Connection::open_in_memory()?)
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        self.conn.execute(
            "INSERT INTO kv_store (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = CURRENT_TIMESTAMP",
            params![key, value],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_and_set() {
        let store = SqliteStore::in_memory().unwrap();
        assert_eq!(store.get("theme").unwrap(), None);

        store.set("theme", "light").unwrap();
        store.set("theme", "dark").unwrap();
        assert_eq!(store.get("theme").unwrap(), Some("dark".to_string()));

        let rows: i32 = store
            .conn
            .query_row("SELECT COUNT(*) FROM kv_store", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }
}
