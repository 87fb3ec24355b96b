use super::{validate_key, StateStorage, StorageError, StorageResult};
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// Stores each key as `<dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    dir: PathBuf,
}

impl JsonFileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the blob for `key`
    pub fn path_for(&self, key: &str) -> StorageResult<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{}.json", key)))
    }

    /// Path a corrupt blob for `key` is moved to
    pub fn backup_path_for(&self, key: &str) -> StorageResult<PathBuf> {
        Ok(self.path_for(key)?.with_extension("json.bak"))
    }
}

impl StateStorage for JsonFileStorage {
    fn load(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.path_for(key)?;
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)?;
        Ok(Some(content))
    }

    /// Atomic write: temp file in the same directory, then persist over the target
    fn save(&self, key: &str, blob: &str) -> StorageResult<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;

        let mut temp_file = NamedTempFile::new_in(&self.dir)?;
        temp_file.write_all(blob.as_bytes())?;
        temp_file.flush()?;

        temp_file.persist(&path).map_err(|e| StorageError::Persist {
            key: key.to_string(),
            message: e.to_string(),
        })?;

        debug!(key, path = %path.display(), bytes = blob.len(), "state saved");
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let path = self.path_for(key)?;
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }

    fn quarantine(&self, key: &str) -> StorageResult<()> {
        let path = self.path_for(key)?;
        if !path.exists() {
            return Ok(());
        }

        let backup = self.backup_path_for(key)?;
        fs::rename(&path, &backup)?;
        warn!(key, backup = %backup.display(), "backed up unreadable state");
        Ok(())
    }
}
