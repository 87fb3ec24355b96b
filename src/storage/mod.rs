//! Key/value persistence for store state
//!
//! Each store saves its whole state as one JSON blob under a fixed key after
//! every dispatched action, and reads it back when it is opened.

mod file;
mod memory;

pub use file::JsonFileStorage;
pub use memory::MemoryStorage;

/// Storage key for the progress store
pub const PROGRESS_KEY: &str = "learning-progress-storage";
/// Storage key for the onboarding store
pub const ONBOARDING_KEY: &str = "onboarding-storage";
/// Storage key for the student store
pub const STUDENT_KEY: &str = "student-storage";

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors raised by a storage backend
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize state: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to persist '{key}': {message}")]
    Persist { key: String, message: String },

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),
}

/// Backend a store saves its serialized state to
pub trait StateStorage {
    /// Read the blob stored under `key`, if any
    fn load(&self, key: &str) -> StorageResult<Option<String>>;

    /// Replace the blob stored under `key`
    fn save(&self, key: &str, blob: &str) -> StorageResult<()>;

    /// Delete the blob stored under `key`; missing keys are fine
    fn remove(&self, key: &str) -> StorageResult<()>;

    /// Move an unreadable blob out of the way so the store can start fresh.
    ///
    /// Backends that can keep a copy should; the default just removes it.
    fn quarantine(&self, key: &str) -> StorageResult<()> {
        self.remove(key)
    }
}

/// Keys become file names, so only a conservative character set is accepted
pub(crate) fn validate_key(key: &str) -> StorageResult<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_keys_are_valid() {
        for key in [PROGRESS_KEY, ONBOARDING_KEY, STUDENT_KEY] {
            assert!(validate_key(key).is_ok());
        }
    }

    #[test]
    fn test_path_like_keys_are_rejected() {
        assert!(matches!(
            validate_key("../etc/passwd"),
            Err(StorageError::InvalidKey(_))
        ));
        assert!(validate_key("").is_err());
        assert!(validate_key("a/b").is_err());
    }
}
