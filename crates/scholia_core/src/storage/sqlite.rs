//! SQLite-backed slot store.
//!
//! # Responsibility
//! - Persist slots in the `slots` table of a migrated connection.
//! - Enforce an optional byte quota before each write.
//!
//! # Invariants
//! - Usage is measured in bytes (`LENGTH(CAST(... AS BLOB))`).
//! - A rejected write never touches the table.

use super::{usage_after_write, DurableStore, StorageError, StorageResult};
use crate::db::{open_db, open_db_in_memory};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// Slot store over one SQLite connection.
pub struct SqliteStore {
    conn: Connection,
    quota_bytes: Option<usize>,
}

impl SqliteStore {
    /// Opens (and migrates) a file-backed store.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        Ok(Self::from_connection(open_db(path)?))
    }

    /// Opens (and migrates) an in-memory store.
    pub fn open_in_memory() -> StorageResult<Self> {
        Ok(Self::from_connection(open_db_in_memory()?))
    }

    /// Wraps an already migrated connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn,
            quota_bytes: None,
        }
    }

    /// Sets a byte quota for subsequent writes.
    pub fn with_quota(mut self, quota_bytes: usize) -> Self {
        self.quota_bytes = Some(quota_bytes);
        self
    }

    /// Current usage in bytes across all slots.
    pub fn used_bytes(&self) -> StorageResult<usize> {
        let used: i64 = self.conn.query_row(
            "SELECT COALESCE(SUM(LENGTH(CAST(key AS BLOB)) + LENGTH(CAST(value AS BLOB))), 0)
             FROM slots;",
            [],
            |row| row.get(0),
        )?;
        Ok(usize::try_from(used).unwrap_or(0))
    }

    /// Lists stored keys in ascending order.
    pub fn keys(&self) -> StorageResult<Vec<String>> {
        let mut stmt = self.conn.prepare("SELECT key FROM slots ORDER BY key ASC;")?;
        let mut rows = stmt.query([])?;
        let mut keys = Vec::new();
        while let Some(row) = rows.next()? {
            keys.push(row.get("key")?);
        }
        Ok(keys)
    }

    fn stored_value_len(&self, key: &str) -> StorageResult<Option<usize>> {
        let len: Option<i64> = self
            .conn
            .query_row(
                "SELECT LENGTH(CAST(value AS BLOB)) FROM slots WHERE key = ?1;",
                [key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(len.map(|value| usize::try_from(value).unwrap_or(0)))
    }
}

impl DurableStore for SqliteStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM slots WHERE key = ?1;", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        if let Some(quota) = self.quota_bytes {
            let replaced = self.stored_value_len(key)?;
            let required = usage_after_write(self.used_bytes()?, key, replaced, value);
            if required > quota {
                return Err(StorageError::CapacityExceeded {
                    key: key.to_string(),
                    required,
                    available: quota,
                });
            }
        }

        self.conn.execute(
            "INSERT INTO slots (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        self.conn
            .execute("DELETE FROM slots WHERE key = ?1;", [key])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::SqliteStore;
    use crate::storage::DurableStore;

    #[test]
    fn upsert_replaces_value() {
        let mut store = SqliteStore::open_in_memory().expect("open in-memory store");
        store.set("academics", "{}").expect("first write");
        store.set("academics", "{\"a\":1}").expect("second write");
        assert_eq!(
            store.get("academics").expect("get").as_deref(),
            Some("{\"a\":1}")
        );
        assert_eq!(store.keys().expect("keys"), vec!["academics".to_string()]);
    }

    #[test]
    fn quota_is_enforced_in_bytes() {
        let mut store = SqliteStore::open_in_memory()
            .expect("open in-memory store")
            .with_quota(8);
        store.set("k", "é").expect("3 bytes fit");
        assert_eq!(store.used_bytes().expect("usage"), 3);
        let err = store.set("k", "ééééé").expect_err("11 bytes exceed quota");
        assert!(err.is_capacity_exceeded());
        assert_eq!(store.get("k").expect("get").as_deref(), Some("é"));
    }

    #[test]
    fn probe_leaves_no_residue() {
        let mut store = SqliteStore::open_in_memory().expect("open in-memory store");
        store.probe().expect("probe");
        assert!(store.keys().expect("keys").is_empty());
    }
}
