//! Storage layer: atomic JSON files and the key-value slot store built on them.

mod atomic_json;
mod key_value;

pub use atomic_json::AtomicJsonFile;
pub use key_value::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};
