pub mod catalog_loader;
pub mod config_service;
pub mod paths;
pub mod selection_repository;
pub mod storage;

pub use crate::catalog_loader::{FileCatalogLoader, HttpCatalogLoader, catalog_loader_for};
pub use crate::config_service::ConfigService;
pub use crate::selection_repository::{SELECTION_KEY, SelectionStore};
pub use crate::storage::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};
