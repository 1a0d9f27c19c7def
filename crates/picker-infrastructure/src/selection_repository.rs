//! Selection repository implementation.
//!
//! Persists the selected product ids into one slot of a [`KeyValueStore`],
//! serialized as a JSON array such as `[3,1,7]`.

use crate::storage::KeyValueStore;
use async_trait::async_trait;
use picker_core::error::{PickerError, Result};
use picker_core::selection::{SelectionRepository, SelectionSet};
use std::sync::Arc;
use tracing::{debug, warn};

/// Key of the slot holding the selection.
pub const SELECTION_KEY: &str = "selectedProducts";

/// Selection persistence over a key-value slot.
///
/// Store access runs on the blocking pool so file-backed stores never stall
/// the async runtime.
#[derive(Clone)]
pub struct SelectionStore {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl SelectionStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(store, SELECTION_KEY)
    }

    pub fn with_key(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    fn read_slot(store: &dyn KeyValueStore, key: &str) -> SelectionSet {
        let raw = match store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return SelectionSet::new(),
            Err(e) => {
                warn!("Failed to read selection slot '{}': {}", key, e);
                return SelectionSet::new();
            }
        };

        match serde_json::from_str::<SelectionSet>(&raw) {
            Ok(selection) => selection,
            Err(e) => {
                warn!("Ignoring malformed selection slot '{}': {}", key, e);
                SelectionSet::new()
            }
        }
    }
}

#[async_trait]
impl SelectionRepository for SelectionStore {
    async fn load(&self) -> SelectionSet {
        let store = self.store.clone();
        let key = self.key.clone();

        match tokio::task::spawn_blocking(move || Self::read_slot(store.as_ref(), &key)).await {
            Ok(selection) => {
                debug!("Loaded {} selected product(s)", selection.len());
                selection
            }
            Err(e) => {
                warn!("Selection load task failed: {}", e);
                SelectionSet::new()
            }
        }
    }

    async fn save(&self, selection: &SelectionSet) -> Result<()> {
        let payload = serde_json::to_string(selection)?;
        let store = self.store.clone();
        let key = self.key.clone();

        tokio::task::spawn_blocking(move || store.set(&key, &payload))
            .await
            .map_err(|e| PickerError::internal(format!("Failed to join task: {}", e)))??;

        debug!("Saved {} selected product(s)", selection.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileKeyValueStore, MemoryKeyValueStore};
    use tempfile::TempDir;

    fn memory_store() -> (Arc<MemoryKeyValueStore>, SelectionStore) {
        let backend = Arc::new(MemoryKeyValueStore::new());
        let store = SelectionStore::new(backend.clone());
        (backend, store)
    }

    #[tokio::test]
    async fn test_load_missing_slot_is_empty() {
        let (_, store) = memory_store();
        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_save_writes_ordered_id_array() {
        let (backend, store) = memory_store();
        store.save(&SelectionSet::from_ids([3, 1, 7])).await.unwrap();
        assert_eq!(backend.get(SELECTION_KEY).unwrap().as_deref(), Some("[3,1,7]"));
    }

    #[tokio::test]
    async fn test_malformed_slot_loads_empty() {
        let (backend, store) = memory_store();
        for junk in ["not json", "{\"a\":1}", "[1,\"two\"]", "-5"] {
            backend.set(SELECTION_KEY, junk).unwrap();
            assert!(store.load().await.is_empty(), "slot {junk:?} should load as empty");
        }
    }

    #[tokio::test]
    async fn test_round_trip_after_toggles() {
        let (_, store) = memory_store();
        let mut selection = SelectionSet::new();

        for id in [5, 2, 9, 2, 11, 5, 3] {
            selection.toggle(id);
            store.save(&selection).await.unwrap();
            assert_eq!(store.load().await, selection);
        }
        assert_eq!(selection.ids(), &[9, 11, 3]);
    }

    #[tokio::test]
    async fn test_corrupt_store_file_loads_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("store.json");
        std::fs::write(&path, "{{{").unwrap();

        let store = SelectionStore::new(Arc::new(FileKeyValueStore::new(path)));
        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_save_recovers_corrupt_store_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("store.json");
        std::fs::write(&path, "{{{").unwrap();

        let store = SelectionStore::new(Arc::new(FileKeyValueStore::new(path.clone())));
        assert!(store.load().await.is_empty());
        store.save(&SelectionSet::from_ids([1])).await.unwrap();

        let reopened = SelectionStore::new(Arc::new(FileKeyValueStore::new(path)));
        assert_eq!(reopened.load().await.ids(), &[1]);
    }

    #[tokio::test]
    async fn test_duplicate_ids_in_slot_are_collapsed() {
        let (backend, store) = memory_store();
        backend.set(SELECTION_KEY, "[2,2,3,2]").unwrap();

        let selection = store.load().await;
        assert_eq!(selection.ids(), &[2, 3]);
        assert_eq!(selection.len(), 2);
    }

    #[tokio::test]
    async fn test_file_backed_selection_survives_restart() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("store.json");

        let first = SelectionStore::new(Arc::new(FileKeyValueStore::new(path.clone())));
        first.save(&SelectionSet::from_ids([4, 2])).await.unwrap();

        let second = SelectionStore::new(Arc::new(FileKeyValueStore::new(path)));
        assert_eq!(second.load().await.ids(), &[4, 2]);
    }
}
