use super::{validate_key, StateStorage, StorageResult};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// In-process storage; clones share the same map
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw blob stored under `key`
    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    /// Seed a raw blob, bypassing any store
    pub fn insert(&self, key: impl Into<String>, blob: impl Into<String>) {
        self.entries.borrow_mut().insert(key.into(), blob.into());
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl StateStorage for MemoryStorage {
    fn load(&self, key: &str) -> StorageResult<Option<String>> {
        validate_key(key)?;
        Ok(self.get(key))
    }

    fn save(&self, key: &str, blob: &str) -> StorageResult<()> {
        validate_key(key)?;
        self.insert(key, blob);
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        validate_key(key)?;
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_entries() {
        let storage = MemoryStorage::new();
        let other = storage.clone();

        storage.save("k", "{}").unwrap();
        assert_eq!(other.load("k").unwrap().as_deref(), Some("{}"));
        assert_eq!(other.len(), 1);

        other.remove("k").unwrap();
        assert!(storage.is_empty());
    }

    #[test]
    fn test_default_quarantine_removes() {
        let storage = MemoryStorage::new();
        storage.insert("k", "garbage");
        storage.quarantine("k").unwrap();
        assert_eq!(storage.get("k"), None);
    }
}
