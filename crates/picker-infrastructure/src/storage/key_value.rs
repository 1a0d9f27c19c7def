//! String key-value slot stores.
//!
//! Values are opaque strings, the same contract a browser's persistent
//! storage offers; callers serialize their own payloads into them.

use super::atomic_json::AtomicJsonFile;
use picker_core::error::{PickerError, Result};
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::Mutex;

/// Persistent string slots addressed by key.
pub trait KeyValueStore: Send + Sync {
    /// Returns the stored value, or `None` when the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrites the slot.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    fn remove(&self, key: &str) -> Result<()>;
}

/// Key-value store backed by a single JSON object file.
///
/// Every write is a locked read-modify-write of the whole file, so writers in
/// other processes never see a half-written document. Concurrent writers to
/// the same key are last-write-wins. A file that no longer parses is
/// overwritten by the next write.
pub struct FileKeyValueStore {
    file: AtomicJsonFile<BTreeMap<String, String>>,
}

impl FileKeyValueStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: AtomicJsonFile::new(path),
        }
    }

    pub fn path(&self) -> &std::path::Path {
        self.file.path()
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self
            .file
            .load()?
            .and_then(|mut slots| slots.remove(key)))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.file.update_or_reset(BTreeMap::new(), |slots| {
            slots.insert(key.to_string(), value.to_string());
            Ok(())
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.file.update_or_reset(BTreeMap::new(), |slots| {
            slots.remove(key);
            Ok(())
        })
    }
}

/// In-process store, used by tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryKeyValueStore {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.slots
            .lock()
            .map_err(|e| PickerError::internal(format!("Key-value store lock poisoned: {}", e)))
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}
