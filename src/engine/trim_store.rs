//! Per-clip trim persistence

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::model::{Boundary, ClipId, TrimWindow, FULL_RANGE_END, FULL_RANGE_START};
use crate::ports::StoragePort;

/// Persists trim windows as `<boundary-name>-<clipId>` keys holding percent text
pub struct TrimStore {
    storage: Arc<dyn StoragePort>,
}

impl TrimStore {
    pub fn new(storage: Arc<dyn StoragePort>) -> Self {
        Self { storage }
    }

    /// Storage key of one boundary of `clip`
    pub fn key(boundary: Boundary, clip: &ClipId) -> String {
        format!("{}-{}", boundary.storage_name(), clip)
    }

    fn read(&self, boundary: Boundary, clip: &ClipId) -> Option<f64> {
        let key = Self::key(boundary, clip);
        let raw = self.storage.get(&key)?;
        match raw.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => Some(value),
            _ => {
                warn!(key = %key, value = %raw, "Ignoring unparsable trim value");
                None
            }
        }
    }

    /// Stored window for `clip`, or the full range when nothing usable is stored
    pub fn load(&self, clip: &ClipId) -> TrimWindow {
        let start = self.read(Boundary::Start, clip).unwrap_or(FULL_RANGE_START);
        let end = self.read(Boundary::End, clip).unwrap_or(FULL_RANGE_END);

        match TrimWindow::new(start, end) {
            Ok(window) => {
                debug!(clip = %clip, %window, "Trim window restored");
                window
            }
            Err(e) => {
                warn!(clip = %clip, error = %e, "Stored trim window rejected; using full range");
                TrimWindow::full()
            }
        }
    }

    /// Persist one boundary of `clip`
    pub fn save(&self, clip: &ClipId, boundary: Boundary, value: f64) {
        self.storage.set(&Self::key(boundary, clip), &value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryStorage;

    fn store() -> (Arc<MemoryStorage>, TrimStore) {
        let storage = Arc::new(MemoryStorage::new());
        (storage.clone(), TrimStore::new(storage))
    }

    fn clip(id: &str) -> ClipId {
        ClipId::new(id).unwrap()
    }

    #[test]
    fn test_untrimmed_clip_loads_full_range() {
        let (_, store) = store();
        assert_eq!(store.load(&clip("fresh")), TrimWindow::full());
    }

    #[test]
    fn test_saved_window_restores_exactly() {
        let (_, store) = store();
        let window = TrimWindow::new(25.0, 75.0).unwrap();
        store.save(&clip("a"), Boundary::Start, window.start());
        store.save(&clip("a"), Boundary::End, window.end());
        assert_eq!(store.load(&clip("a")), window);
        assert_eq!(store.load(&clip("b")), TrimWindow::full());
    }

    #[test]
    fn test_key_format() {
        assert_eq!(TrimStore::key(Boundary::Start, &clip("xyz")), "trimStart-xyz");
        assert_eq!(TrimStore::key(Boundary::End, &clip("xyz")), "trimEnd-xyz");
    }

    #[test]
    fn test_single_stored_boundary_keeps_default_for_other() {
        let (storage, store) = store();
        storage.set("trimStart-a", "30");
        let window = store.load(&clip("a"));
        assert_eq!(window.start(), 30.0);
        assert_eq!(window.end(), 100.0);
    }

    #[test]
    fn test_corrupt_values_fall_back() {
        let (storage, store) = store();
        storage.set("trimStart-a", "abc");
        storage.set("trimEnd-a", "60");
        assert_eq!(store.load(&clip("a")).start(), 0.0);

        storage.set("trimStart-b", "80");
        storage.set("trimEnd-b", "20");
        assert_eq!(store.load(&clip("b")), TrimWindow::full());
    }
}
