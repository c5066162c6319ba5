//! SQLite-backed key-value store.
//!
//! # Responsibility
//! - Persist string records in the `kv_entries` table with upsert writes.
//!
//! # Invariants
//! - Requires a connection bootstrapped by `db::open_db`, which guarantees
//!   the `kv_entries` table exists.

use rusqlite::{params, Connection, OptionalExtension};

use crate::kv::{require_key, KeyValueStore, KvResult};

const GET_SQL: &str = "SELECT value FROM kv_entries WHERE key = ?1;";

const SET_SQL: &str = "
INSERT INTO kv_entries (key, value, updated_at)
VALUES (?1, ?2, strftime('%s', 'now') * 1000)
ON CONFLICT(key) DO UPDATE SET
    value = excluded.value,
    updated_at = excluded.updated_at;
";

const REMOVE_SQL: &str = "DELETE FROM kv_entries WHERE key = ?1;";

/// Key-value store over a bootstrapped SQLite connection.
#[derive(Debug, Clone, Copy)]
pub struct SqliteKvStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKvStore<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl KeyValueStore for SqliteKvStore<'_> {
    fn get_item(&self, key: &str) -> KvResult<Option<String>> {
        require_key(key)?;
        let value = self
            .conn
            .query_row(GET_SQL, params![key], |row| row.get::<_, String>(0))
            .optional()?;
        Ok(value)
    }

    fn set_item(&self, key: &str, value: &str) -> KvResult<()> {
        require_key(key)?;
        self.conn.execute(SET_SQL, params![key, value])?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> KvResult<()> {
        require_key(key)?;
        self.conn.execute(REMOVE_SQL, params![key])?;
        Ok(())
    }
}
