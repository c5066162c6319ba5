//! Family roster snapshot.

use crate::kv::KeyValueStore;
use crate::model::family::FamilyMember;
use crate::store::{read_snapshot, write_snapshot, StoreResult};

/// Record key holding the serialized roster array.
pub const FAMILY_RECORD: &str = "family_members";

#[derive(Debug)]
pub struct FamilyStore<K: KeyValueStore> {
    kv: K,
}

impl<K: KeyValueStore> FamilyStore<K> {
    pub fn new(kv: K) -> Self {
        Self { kv }
    }

    /// Reads the stored roster; absent or unreadable data is empty.
    pub fn load(&self) -> Vec<FamilyMember> {
        read_snapshot(&self.kv, FAMILY_RECORD)
    }

    pub fn save(&self, members: &[FamilyMember]) -> StoreResult<()> {
        write_snapshot(&self.kv, FAMILY_RECORD, &members)
    }
}
