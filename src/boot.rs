use log::{info, warn};
use std::fs;

use crate::config::AppConfig;

/// Prepare the data directory before the store opens: create it if missing
/// and verify it is writable. Returns an error instead of aborting so the
/// embedding shell can surface it.
pub fn prepare(config: &AppConfig) -> Result<(), String> {
    let dir = config.data_dir();

    if !dir.exists() {
        fs::create_dir_all(&dir)
            .map_err(|e| format!("Failed to create data directory {}: {}", dir.display(), e))?;
        info!("Created data directory: {}", dir.display());
    }

    let test_file = dir.join(".write_test");
    match fs::write(&test_file, "test") {
        Ok(_) => {
            let _ = fs::remove_file(&test_file);
        }
        Err(e) => {
            warn!("Data directory {} not writable: {}", dir.display(), e);
            return Err(format!(
                "Data directory {} not writable: {}",
                dir.display(),
                e
            ));
        }
    }

    Ok(())
}
