//! Snapshot stores over the key-value persistence port.
//!
//! # Responsibility
//! - Serialize whole domain collections into single named records.
//! - Shield callers from storage faults on the read path: a missing or
//!   corrupt snapshot reads as the empty default, never as an error.
//!
//! # Invariants
//! - Each store owns exactly one record key.
//! - Writes replace the full snapshot; there is no partial update.
//!
//! # See also
//! - docs/architecture/persistence.md

use std::fmt;

use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::kv::{KeyValueStore, KvError};

pub mod family_store;
pub mod reminder_store;
pub mod session_store;
pub mod wellness_store;

pub use family_store::FamilyStore;
pub use reminder_store::ReminderStore;
pub use session_store::SessionStore;
pub use wellness_store::WellnessStore;

/// Result alias for snapshot writes.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced by snapshot stores on the write path.
#[derive(Debug)]
pub enum StoreError {
    Kv(KvError),
    Encode(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Kv(err) => write!(f, "snapshot write failed: {err}"),
            StoreError::Encode(err) => write!(f, "snapshot encoding failed: {err}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Kv(err) => Some(err),
            StoreError::Encode(err) => Some(err),
        }
    }
}

impl From<KvError> for StoreError {
    fn from(err: KvError) -> Self {
        StoreError::Kv(err)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Encode(err)
    }
}

/// Reads a snapshot record, falling back to `T::default()` on any fault.
///
/// Read faults and corrupt payloads are logged and swallowed; the current
/// session continues from the default and the next write repairs the
/// record.
pub(crate) fn read_snapshot<T, K>(kv: &K, record: &str) -> T
where
    T: DeserializeOwned + Default,
    K: KeyValueStore,
{
    let raw = match kv.get_item(record) {
        Ok(Some(raw)) => raw,
        Ok(None) => return T::default(),
        Err(err) => {
            warn!("event=snapshot_read module=store status=error record={record} error={err}");
            return T::default();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(err) => {
            warn!("event=snapshot_corrupt module=store status=error record={record} error={err}");
            T::default()
        }
    }
}

/// Serializes `value` and overwrites the snapshot record.
pub(crate) fn write_snapshot<T, K>(kv: &K, record: &str, value: &T) -> StoreResult<()>
where
    T: Serialize,
    K: KeyValueStore,
{
    let raw = serde_json::to_string(value)?;
    kv.set_item(record, &raw)?;
    Ok(())
}
