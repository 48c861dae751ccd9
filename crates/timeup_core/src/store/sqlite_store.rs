//! SQLite-backed key-value store.

use super::{KeyValueStore, StoreError, StoreResult};
use crate::db::ensure_current_schema;
use rusqlite::{params, Connection, OptionalExtension};

/// Key-value store over the `kv_entries` table.
pub struct SqliteKeyValueStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKeyValueStore<'conn> {
    /// Wraps a connection opened through `db::open_db*`.
    ///
    /// # Errors
    /// - `DbError::SchemaOutdated` when the connection was never migrated.
    /// - `DbError::SchemaTooNew` when a newer build wrote the file.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        ensure_current_schema(conn)?;
        Ok(Self { conn })
    }

    /// Lists stored keys in ascending order.
    pub fn keys(&self) -> StoreResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT key FROM kv_entries ORDER BY key ASC;")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        let mut keys = Vec::new();
        for key in rows {
            keys.push(key?);
        }
        Ok(keys)
    }
}

impl KeyValueStore for SqliteKeyValueStore<'_> {
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, Vec<u8>>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &[u8]) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }
}
