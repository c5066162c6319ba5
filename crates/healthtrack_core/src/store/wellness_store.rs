//! Wellness day-log snapshot.
//!
//! One record holds every logged day, keyed by calendar date. Day keys
//! serialize as `YYYY-MM-DD` strings.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::kv::KeyValueStore;
use crate::model::wellness::DayLog;
use crate::store::{read_snapshot, write_snapshot, StoreResult};

/// Record key holding the serialized day-log map.
pub const WELLNESS_RECORD: &str = "wellness_days";

#[derive(Debug)]
pub struct WellnessStore<K: KeyValueStore> {
    kv: K,
}

impl<K: KeyValueStore> WellnessStore<K> {
    pub fn new(kv: K) -> Self {
        Self { kv }
    }

    /// Reads all logged days; absent or unreadable data is an empty map.
    pub fn load(&self) -> BTreeMap<NaiveDate, DayLog> {
        read_snapshot(&self.kv, WELLNESS_RECORD)
    }

    pub fn save(&self, days: &BTreeMap<NaiveDate, DayLog>) -> StoreResult<()> {
        write_snapshot(&self.kv, WELLNESS_RECORD, days)
    }
}
