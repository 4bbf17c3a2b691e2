use chrono::NaiveDateTime;
use rusqlite::params;

use crate::db::DbPool;

use super::StateStore;

/// SQLite-backed implementation of the StateStore trait.
/// Wraps an r2d2 connection pool over the `state` key/value table.
pub struct SqliteStore {
    pub pool: DbPool,
}

impl SqliteStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Open the database at `path` and run migrations on it.
    pub fn open_at(path: &str) -> Result<Self, String> {
        let pool = crate::db::init_pool_at(path)?;
        crate::db::run_migrations(&pool)?;
        Ok(Self { pool })
    }
}

impl StateStore for SqliteStore {
    fn get(&self, key: &str) -> Option<String> {
        let conn = self.pool.get().ok()?;
        conn.query_row(
            "SELECT value FROM state WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .ok()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        let conn = self.pool.get().map_err(|e| e.to_string())?;
        conn.execute(
            "INSERT INTO state (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = CURRENT_TIMESTAMP",
            params![key, value],
        )
        .map_err(|e| e.to_string())?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), String> {
        let conn = self.pool.get().map_err(|e| e.to_string())?;
        conn.execute("DELETE FROM state WHERE key = ?1", params![key])
            .map_err(|e| e.to_string())?;
        Ok(())
    }

    fn last_saved(&self, key: &str) -> Option<NaiveDateTime> {
        let conn = self.pool.get().ok()?;
        conn.query_row(
            "SELECT updated_at FROM state WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .ok()
    }
}
