//! Key-value storage capability behind the persistence adapter.
//!
//! # Responsibility
//! - Abstract browser-local style storage as `get/set(key) -> bytes`.
//! - Provide an in-memory store and a SQLite-backed store.
//!
//! # Invariants
//! - `set` overwrites the whole value for a key.
//! - Stores never interpret the bytes they hold.

use crate::db::DbError;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod sqlite_store;

pub use sqlite_store::SqliteKeyValueStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage-level failure.
#[derive(Debug)]
pub enum StoreError {
    /// Backing storage cannot be reached.
    Unavailable(String),
    /// Write would exceed the configured capacity.
    QuotaExceeded {
        key: String,
        requested: usize,
        limit: usize,
    },
    Db(DbError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(reason) => write!(f, "storage unavailable: {reason}"),
            Self::QuotaExceeded {
                key,
                requested,
                limit,
            } => write!(
                f,
                "storage quota exceeded writing `{key}`: {requested} bytes requested, limit {limit}"
            ),
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Minimal byte-level key-value capability.
pub trait KeyValueStore {
    /// Returns the stored bytes, or `None` when the key was never written.
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>>;

    /// Overwrites the value stored under `key`.
    fn set(&mut self, key: &str, value: &[u8]) -> StoreResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &[u8]) -> StoreResult<()> {
        (**self).set(key, value)
    }
}

/// In-process store, optionally bounded like browser local storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, Vec<u8>>,
    quota_bytes: Option<usize>,
    unavailable: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store whose total stored bytes may not exceed `quota_bytes`.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            quota_bytes: Some(quota_bytes),
            ..Self::default()
        }
    }

    /// Creates a store where every read and write fails.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    /// Seeds raw bytes, bypassing quota checks.
    pub fn insert_raw(&mut self, key: impl Into<String>, value: impl Into<Vec<u8>>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn raw(&self, key: &str) -> Option<&[u8]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    fn used_bytes_excluding(&self, key: &str) -> usize {
        self.entries
            .iter()
            .filter(|(existing, _)| existing.as_str() != key)
            .map(|(existing, value)| existing.len() + value.len())
            .sum()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        if self.unavailable {
            return Err(StoreError::Unavailable("memory store disabled".to_string()));
        }
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &[u8]) -> StoreResult<()> {
        if self.unavailable {
            return Err(StoreError::Unavailable("memory store disabled".to_string()));
        }
        if let Some(limit) = self.quota_bytes {
            let requested = self.used_bytes_excluding(key) + key.len() + value.len();
            if requested > limit {
                return Err(StoreError::QuotaExceeded {
                    key: key.to_string(),
                    requested,
                    limit,
                });
            }
        }
        self.entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{KeyValueStore, MemoryStore, StoreError};

    #[test]
    fn memory_store_overwrites_values() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);

        store.set("k", b"one").unwrap();
        store.set("k", b"two").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some(&b"two"[..]));
    }

    #[test]
    fn quota_counts_other_keys_but_not_the_replaced_value() {
        let mut store = MemoryStore::with_quota(10);
        store.set("a", b"1234").unwrap();
        store.set("a", b"12345678").unwrap();

        let err = store.set("b", b"xyz").unwrap_err();
        assert!(matches!(err, StoreError::QuotaExceeded { limit: 10, .. }));
        assert_eq!(store.raw("b"), None);
    }

    #[test]
    fn unavailable_store_fails_every_call() {
        let mut store = MemoryStore::unavailable();
        assert!(store.get("k").is_err());
        assert!(store.set("k", b"v").is_err());
    }
}
