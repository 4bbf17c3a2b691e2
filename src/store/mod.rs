use chrono::NaiveDateTime;

pub mod file;
pub mod sqlite;

/// Raw text storage for configuration state. One JSON document per key.
/// Implementations: `SqliteStore` (wraps rusqlite/r2d2) and `FileStore`
/// (one file per key). Parsing stored text is the caller's concern.
pub trait StateStore: Send + Sync {
    /// Stored text for a key, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Write (or overwrite) the text stored under a key.
    fn set(&self, key: &str, value: &str) -> Result<(), String>;

    /// Delete a key. Deleting a key that was never written is not an error.
    fn remove(&self, key: &str) -> Result<(), String>;

    /// When the key was last written, if the backend tracks it.
    fn last_saved(&self, key: &str) -> Option<NaiveDateTime>;
}

#[cfg(test)]
mod tests {
    use super::file::FileStore;
    use super::sqlite::SqliteStore;
    use super::StateStore;

    /// Atomic counter for unique test directories so parallel tests don't collide.
    static TEST_DIR_COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(0);

    /// Create a fresh in-memory SqliteStore with the state table migrated.
    fn sqlite_store() -> SqliteStore {
        let manager = r2d2_sqlite::SqliteConnectionManager::memory();
        let pool = r2d2::Pool::builder()
            .max_size(1)
            .build(manager)
            .expect("Failed to create in-memory pool");
        crate::db::run_migrations(&pool).expect("migrations failed");
        SqliteStore::new(pool)
    }

    /// Create a FileStore under a unique temp directory.
    fn file_store() -> FileStore {
        let id = TEST_DIR_COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        let dir = std::env::temp_dir().join(format!("linkplate-store-{}-{}", std::process::id(), id));
        FileStore::open(&dir).expect("Failed to create file store")
    }

    fn check_get_set(store: &dyn StateStore) {
        assert!(store.get("nonexistent_key_xyz").is_none());
        store.set("userBackground", r#"{"type":"solid"}"#).unwrap();
        assert_eq!(
            store.get("userBackground"),
            Some(r#"{"type":"solid"}"#.to_string())
        );
    }

    fn check_upsert(store: &dyn StateStore) {
        store.set("profile", "first").unwrap();
        store.set("profile", "second").unwrap();
        assert_eq!(store.get("profile"), Some("second".to_string()));
    }

    fn check_remove(store: &dyn StateStore) {
        store.set("userSocialLinks", "{}").unwrap();
        assert!(store.get("userSocialLinks").is_some());
        store.remove("userSocialLinks").unwrap();
        assert!(store.get("userSocialLinks").is_none());
        // removing again is fine
        store.remove("userSocialLinks").unwrap();
    }

    fn check_last_saved(store: &dyn StateStore) {
        assert!(store.last_saved("never_written").is_none());
        store.set("socialLinksSettings", "{}").unwrap();
        assert!(store.last_saved("socialLinksSettings").is_some());
    }

    #[test]
    fn sqlite_get_set() {
        check_get_set(&sqlite_store());
    }

    #[test]
    fn sqlite_upsert() {
        check_upsert(&sqlite_store());
    }

    #[test]
    fn sqlite_remove() {
        check_remove(&sqlite_store());
    }

    #[test]
    fn sqlite_last_saved() {
        check_last_saved(&sqlite_store());
    }

    #[test]
    fn file_get_set() {
        check_get_set(&file_store());
    }

    #[test]
    fn file_upsert() {
        check_upsert(&file_store());
    }

    #[test]
    fn file_remove() {
        check_remove(&file_store());
    }

    #[test]
    fn file_last_saved() {
        check_last_saved(&file_store());
    }

    #[test]
    fn file_rejects_path_separators() {
        let store = file_store();
        assert!(store.set("../escape", "x").is_err());
        assert!(store.set("a/b", "x").is_err());
        assert!(store.get("../escape").is_none());
    }

    #[test]
    fn file_survives_reopen() {
        let id = TEST_DIR_COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        let dir = std::env::temp_dir().join(format!("linkplate-reopen-{}-{}", std::process::id(), id));
        {
            let store = FileStore::open(&dir).unwrap();
            store.set("profile", r#"{"image":{"src":"","size":96}}"#).unwrap();
        }
        let store = FileStore::open(&dir).unwrap();
        assert_eq!(
            store.get("profile"),
            Some(r#"{"image":{"src":"","size":96}}"#.to_string())
        );
    }
}
