// In-memory storage adapter - Key/value store that lives as long as the process

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::ports::StoragePort;

/// In-process key/value storage
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl StoragePort for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries.write().insert(key.to_string(), value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_overwrites() {
        let storage = MemoryStorage::new();
        assert!(storage.get("k").is_none());
        storage.set("k", "1");
        storage.set("k", "2");
        assert_eq!(storage.get("k").as_deref(), Some("2"));
        assert_eq!(storage.len(), 1);
    }
}
