//! Persistent reminder snapshot.
//!
//! # Responsibility
//! - Load and save the full reminder collection under one record key.
//!
//! # Invariants
//! - `load` never fails: corrupt or missing data reads as an empty list.
//! - `save` reports failures for the caller to log; it never partially
//!   writes individual reminders.

use crate::kv::KeyValueStore;
use crate::model::reminder::Reminder;
use crate::store::{read_snapshot, write_snapshot, StoreResult};

/// Record key holding the serialized reminder array.
pub const REMINDERS_RECORD: &str = "reminders";

/// Snapshot store for the reminder collection.
#[derive(Debug)]
pub struct ReminderStore<K: KeyValueStore> {
    kv: K,
}

impl<K: KeyValueStore> ReminderStore<K> {
    pub fn new(kv: K) -> Self {
        Self { kv }
    }

    /// Reads the stored collection; absent or unreadable data is empty.
    pub fn load(&self) -> Vec<Reminder> {
        read_snapshot(&self.kv, REMINDERS_RECORD)
    }

    /// Overwrites the stored collection with `reminders`.
    pub fn save(&self, reminders: &[Reminder]) -> StoreResult<()> {
        write_snapshot(&self.kv, REMINDERS_RECORD, &reminders)
    }
}
