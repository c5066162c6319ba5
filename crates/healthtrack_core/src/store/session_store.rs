//! Account session snapshot.
//!
//! Persists the logged-in account record between launches and clears it on
//! logout.

use log::warn;

use crate::kv::KeyValueStore;
use crate::model::account::Account;
use crate::store::{write_snapshot, StoreResult};

/// Record key holding the serialized account session.
pub const ACCOUNT_RECORD: &str = "account";

#[derive(Debug)]
pub struct SessionStore<K: KeyValueStore> {
    kv: K,
}

impl<K: KeyValueStore> SessionStore<K> {
    pub fn new(kv: K) -> Self {
        Self { kv }
    }

    /// Reads the stored session; absent or unreadable data means logged out.
    pub fn load(&self) -> Option<Account> {
        let raw = match self.kv.get_item(ACCOUNT_RECORD) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                warn!("event=session_read module=store status=error error={err}");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(account) => Some(account),
            Err(err) => {
                warn!("event=session_corrupt module=store status=error error={err}");
                None
            }
        }
    }

    pub fn save(&self, account: &Account) -> StoreResult<()> {
        write_snapshot(&self.kv, ACCOUNT_RECORD, account)
    }

    /// Removes the stored session. Logging out twice is harmless.
    pub fn clear(&self) -> StoreResult<()> {
        self.kv.remove_item(ACCOUNT_RECORD)?;
        Ok(())
    }
}
