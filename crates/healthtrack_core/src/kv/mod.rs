//! Durable key-value persistence port.
//!
//! # Responsibility
//! - Define the `getItem`/`setItem`/`removeItem` contract the app's local
//!   state layer is written against.
//! - Provide the in-memory implementation used by tests and ephemeral
//!   sessions.
//!
//! # Invariants
//! - Keys are non-empty strings.
//! - `remove_item` on a missing key succeeds.
//!
//! # See also
//! - docs/architecture/persistence.md

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;

pub mod sqlite_kv;

pub use sqlite_kv::SqliteKvStore;

/// Result alias for key-value operations.
pub type KvResult<T> = Result<T, KvError>;

/// Errors surfaced by key-value store implementations.
#[derive(Debug)]
pub enum KvError {
    /// Caller passed an empty or whitespace-only key.
    EmptyKey,
    /// Underlying SQLite transport failure.
    Db(rusqlite::Error),
}

impl fmt::Display for KvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KvError::EmptyKey => write!(f, "key cannot be empty"),
            KvError::Db(err) => write!(f, "key-value store failure: {err}"),
        }
    }
}

impl std::error::Error for KvError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            KvError::Db(err) => Some(err),
            KvError::EmptyKey => None,
        }
    }
}

impl From<rusqlite::Error> for KvError {
    fn from(err: rusqlite::Error) -> Self {
        KvError::Db(err)
    }
}

/// String-to-string persistence contract.
///
/// Implementations are durable across process restarts unless documented
/// otherwise; none are durable across device loss.
pub trait KeyValueStore {
    /// Reads the value stored under `key`, if any.
    fn get_item(&self, key: &str) -> KvResult<Option<String>>;

    /// Writes `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> KvResult<()>;

    /// Deletes the value under `key`. Missing keys are not an error.
    fn remove_item(&self, key: &str) -> KvResult<()>;
}

impl<K: KeyValueStore + ?Sized> KeyValueStore for &K {
    fn get_item(&self, key: &str) -> KvResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> KvResult<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> KvResult<()> {
        (**self).remove_item(key)
    }
}

pub(crate) fn require_key(key: &str) -> KvResult<()> {
    if key.trim().is_empty() {
        return Err(KvError::EmptyKey);
    }
    Ok(())
}

/// Non-durable in-memory store.
///
/// Interior mutability keeps it single-threaded; callers share it by
/// reference under the app's one-logical-writer model.
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    entries: RefCell<BTreeMap<String, String>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKvStore {
    fn get_item(&self, key: &str) -> KvResult<Option<String>> {
        require_key(key)?;
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> KvResult<()> {
        require_key(key)?;
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> KvResult<()> {
        require_key(key)?;
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}
