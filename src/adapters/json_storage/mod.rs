// JSON storage adapter - Device-local key/value file

use std::collections::BTreeMap;
use std::path::PathBuf;

use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::error::ClipTrimResult;
use crate::ports::StoragePort;

/// Key/value storage persisted as a flat JSON object of strings
///
/// Every write rewrites the file. Write failures are logged and otherwise
/// ignored; the in-memory view stays authoritative for the running process.
pub struct JsonFileStorage {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, String>>,
}

impl JsonFileStorage {
    /// Open the store at `path`, starting empty when the file is missing or unreadable
    pub fn open(path: impl Into<PathBuf>) -> ClipTrimResult<Self> {
        let path = path.into();
        let entries: BTreeMap<String, String> = match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Storage file malformed; starting empty");
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };

        debug!(path = %path.display(), entries = entries.len(), "Storage opened");
        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> ClipTrimResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

impl StoragePort for JsonFileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut entries = self.entries.write();
        entries.insert(key.to_string(), value.to_string());
        if let Err(e) = self.persist(&entries) {
            warn!(path = %self.path.display(), key, error = %e, "Failed to persist storage");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_values_survive_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("trims.json");

        let storage = JsonFileStorage::open(&path).unwrap();
        storage.set("trimStart-a", "25");
        storage.set("trimEnd-a", "75");
        drop(storage);

        let reopened = JsonFileStorage::open(&path).unwrap();
        assert_eq!(reopened.get("trimStart-a").as_deref(), Some("25"));
        assert_eq!(reopened.get("trimEnd-a").as_deref(), Some("75"));
    }

    #[test]
    fn test_malformed_file_starts_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("trims.json");
        std::fs::write(&path, "not json").unwrap();

        let storage = JsonFileStorage::open(&path).unwrap();
        assert!(storage.get("anything").is_none());
        storage.set("k", "v");
        assert_eq!(JsonFileStorage::open(&path).unwrap().get("k").as_deref(), Some("v"));
    }
}
