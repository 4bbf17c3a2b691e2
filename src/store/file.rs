use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDateTime, Utc};

use super::StateStore;

/// Filesystem-backed implementation of the StateStore trait.
/// Each key lives in its own `<key>.json` file under one directory, so state
/// can be inspected and backed up with ordinary file tools.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open the store directory, creating it if missing.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, String> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)
            .map_err(|e| format!("Failed to create state directory {}: {}", dir.display(), e))?;
        Ok(Self { dir })
    }

    /// File path for a key. Keys must not contain path components.
    fn path_for(&self, key: &str) -> Result<PathBuf, String> {
        if key.is_empty() || key.contains('/') || key.contains('\\') || key.contains("..") {
            return Err(format!("Invalid state key: {:?}", key));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl StateStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        let path = self.path_for(key).ok()?;
        fs::read_to_string(path).ok()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        let path = self.path_for(key)?;
        fs::write(&path, value)
            .map_err(|e| format!("Failed to write {}: {}", path.display(), e))
    }

    fn remove(&self, key: &str) -> Result<(), String> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(format!("Failed to remove {}: {}", path.display(), e)),
        }
    }

    fn last_saved(&self, key: &str) -> Option<NaiveDateTime> {
        let path = self.path_for(key).ok()?;
        let modified = fs::metadata(path).ok()?.modified().ok()?;
        Some(DateTime::<Utc>::from(modified).naive_utc())
    }
}
