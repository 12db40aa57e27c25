//! Durable key-value slot storage.
//!
//! # Responsibility
//! - Define the key-value contract the record store persists through.
//! - Provide in-memory and SQLite-backed implementations.
//!
//! # Invariants
//! - Values are opaque UTF-8 text (JSON produced by the record store).
//! - A write that would exceed the configured quota fails with
//!   `StorageError::CapacityExceeded` and leaves the previous value intact.

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Key written and removed by [`DurableStore::probe`].
pub const PROBE_KEY: &str = "__scholia_probe__";

pub type StorageResult<T> = Result<T, StorageError>;

/// Durable store failure signal.
#[derive(Debug)]
pub enum StorageError {
    /// Write rejected because the backend quota would be exceeded.
    CapacityExceeded {
        key: String,
        required: usize,
        available: usize,
    },
    /// Backend cannot be used at all (sandboxed or disabled).
    Unavailable(String),
    Db(DbError),
}

impl StorageError {
    pub fn is_capacity_exceeded(&self) -> bool {
        matches!(self, Self::CapacityExceeded { .. })
    }
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CapacityExceeded {
                key,
                required,
                available,
            } => write!(
                f,
                "storage capacity exceeded writing `{key}`: {required} bytes required, {available} available"
            ),
            Self::Unavailable(reason) => write!(f, "durable storage unavailable: {reason}"),
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Key-value durable storage contract.
pub trait DurableStore {
    /// Reads one slot. Missing keys return `Ok(None)`.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;
    /// Writes one slot, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> StorageResult<()>;
    /// Removes one slot. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> StorageResult<()>;

    /// Checks that the backend accepts writes by round-tripping a probe key.
    fn probe(&mut self) -> StorageResult<()> {
        self.set(PROBE_KEY, PROBE_KEY)?;
        self.remove(PROBE_KEY)
    }
}

impl<S: DurableStore + ?Sized> DurableStore for Box<S> {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        (**self).remove(key)
    }

    fn probe(&mut self) -> StorageResult<()> {
        (**self).probe()
    }
}

/// Computes the usage after replacing `key` with `value`, given current usage
/// and the byte size of the value being replaced.
pub(crate) fn usage_after_write(
    current_usage: usize,
    key: &str,
    replaced_value_len: Option<usize>,
    value: &str,
) -> usize {
    match replaced_value_len {
        Some(old_len) => current_usage - old_len + value.len(),
        None => current_usage + key.len() + value.len(),
    }
}
