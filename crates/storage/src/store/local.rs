#![forbid(unsafe_code)]

use super::StoreError;
use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;
use std::time::Duration;

const DB_FILE: &str = "lineage.db";

/// Quota-bound key/value area backed by SQLite.
///
/// Each item is charged `key.len() + value.len()` bytes against the quota.
#[derive(Debug)]
pub struct LocalStorage {
    conn: Connection,
    quota_bytes: u64,
}

impl LocalStorage {
    pub fn open(storage_dir: impl AsRef<Path>, quota_bytes: u64) -> Result<Self, StoreError> {
        let storage_dir = storage_dir.as_ref();
        std::fs::create_dir_all(storage_dir)?;
        let conn = Connection::open(storage_dir.join(DB_FILE))?;
        conn.busy_timeout(Duration::from_secs(5))?;
        Self::with_connection(conn, quota_bytes)
    }

    pub fn open_in_memory(quota_bytes: u64) -> Result<Self, StoreError> {
        Self::with_connection(Connection::open_in_memory()?, quota_bytes)
    }

    fn with_connection(conn: Connection, quota_bytes: u64) -> Result<Self, StoreError> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS local_storage (
              key TEXT PRIMARY KEY,
              value TEXT NOT NULL,
              bytes INTEGER NOT NULL,
              updated_at_ms INTEGER NOT NULL
            );
            "#,
        )?;
        Ok(Self { conn, quota_bytes })
    }

    pub fn quota_bytes(&self) -> u64 {
        self.quota_bytes
    }

    pub fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self
            .conn
            .query_row(
                "SELECT value FROM local_storage WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?)
    }

    pub fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let item_bytes = (key.len() + value.len()) as u64;
        let tx = self.conn.transaction()?;
        let used = used_bytes_conn(&tx)?;
        let replaced = tx
            .query_row(
                "SELECT bytes FROM local_storage WHERE key = ?1",
                params![key],
                |row| row.get::<_, i64>(0),
            )
            .optional()?
            .unwrap_or(0)
            .max(0) as u64;
        let required = used.saturating_sub(replaced) + item_bytes;
        if required > self.quota_bytes {
            return Err(StoreError::QuotaExceeded {
                required,
                quota: self.quota_bytes,
            });
        }
        tx.execute(
            "INSERT INTO local_storage(key, value, bytes, updated_at_ms) VALUES (?1, ?2, ?3, ?4) \
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, bytes = excluded.bytes, \
             updated_at_ms = excluded.updated_at_ms",
            params![key, value, item_bytes as i64, now_ms()],
        )?;
        tx.commit()?;
        Ok(())
    }

    pub fn remove_item(&mut self, key: &str) -> Result<bool, StoreError> {
        let removed = self
            .conn
            .execute("DELETE FROM local_storage WHERE key = ?1", params![key])?;
        Ok(removed > 0)
    }

    pub fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT key FROM local_storage WHERE substr(key, 1, ?2) = ?1 ORDER BY key")?;
        let rows = stmt.query_map(params![prefix, prefix.chars().count() as i64], |row| {
            row.get::<_, String>(0)
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Size in bytes of the stored value alone.
    pub fn value_bytes(&self, key: &str) -> Result<Option<u64>, StoreError> {
        let bytes = self
            .conn
            .query_row(
                "SELECT length(CAST(value AS BLOB)) FROM local_storage WHERE key = ?1",
                params![key],
                |row| row.get::<_, i64>(0),
            )
            .optional()?;
        Ok(bytes.map(|b| b.max(0) as u64))
    }

    pub fn used_bytes(&self) -> Result<u64, StoreError> {
        used_bytes_conn(&self.conn)
    }
}

fn used_bytes_conn(conn: &Connection) -> Result<u64, StoreError> {
    let used = conn.query_row(
        "SELECT COALESCE(SUM(bytes), 0) FROM local_storage",
        [],
        |row| row.get::<_, i64>(0),
    )?;
    Ok(used.max(0) as u64)
}

fn now_ms() -> i64 {
    ln_core::dates::now_ms(ln_core::dates::now_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove_round_trip() {
        let mut local = LocalStorage::open_in_memory(1024).unwrap();
        assert_eq!(local.get_item("a").unwrap(), None);
        local.set_item("a", "hello").unwrap();
        assert_eq!(local.get_item("a").unwrap().as_deref(), Some("hello"));
        assert_eq!(local.used_bytes().unwrap(), 6);
        local.set_item("a", "hi").unwrap();
        assert_eq!(local.used_bytes().unwrap(), 3);
        assert!(local.remove_item("a").unwrap());
        assert!(!local.remove_item("a").unwrap());
        assert_eq!(local.used_bytes().unwrap(), 0);
    }

    #[test]
    fn quota_counts_replaced_value_once() {
        let mut local = LocalStorage::open_in_memory(10).unwrap();
        local.set_item("k", "123456789").unwrap();
        local.set_item("k", "987654321").unwrap();
        let err = local.set_item("x", "1").unwrap_err();
        assert!(matches!(
            err,
            StoreError::QuotaExceeded {
                required: 12,
                quota: 10
            }
        ));
        assert_eq!(local.get_item("x").unwrap(), None);
    }

    #[test]
    fn prefix_listing_and_value_size() {
        let mut local = LocalStorage::open_in_memory(1024).unwrap();
        local.set_item("backup_2", "b").unwrap();
        local.set_item("backup_1", "aé").unwrap();
        local.set_item("other", "c").unwrap();
        assert_eq!(
            local.keys_with_prefix("backup_").unwrap(),
            vec!["backup_1".to_string(), "backup_2".to_string()]
        );
        assert_eq!(local.value_bytes("backup_1").unwrap(), Some(3));
        assert_eq!(local.value_bytes("missing").unwrap(), None);
    }
}
