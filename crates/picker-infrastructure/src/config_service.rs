//! Client configuration loading.
//!
//! Reads `picker.toml` from an explicit path or the platform config dir. A
//! missing file means defaults; a present but invalid file is an error.

use crate::paths::PickerPaths;
use picker_core::config::ClientConfig;
use picker_core::error::{PickerError, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub struct ConfigService;

impl ConfigService {
    /// Loads the client configuration.
    ///
    /// # Arguments
    ///
    /// * `path` - Explicit config file. When None the platform default is used.
    pub fn load(path: Option<&Path>) -> Result<ClientConfig> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::default_path()?,
        };

        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Ok(ClientConfig::default());
        }

        let content = std::fs::read_to_string(&path)?;
        let config = ClientConfig::from_toml(&content)?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Where the selection store lives for `config`.
    pub fn store_path(config: &ClientConfig) -> Result<PathBuf> {
        match &config.store_path {
            Some(path) => Ok(path.clone()),
            None => PickerPaths::store_file().map_err(|e| PickerError::config(e.to_string())),
        }
    }

    fn default_path() -> Result<PathBuf> {
        PickerPaths::config_file().map_err(|e| PickerError::config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_default() {
        let temp_dir = TempDir::new().unwrap();
        let config = ConfigService::load(Some(&temp_dir.path().join("picker.toml"))).unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_reads_file_values() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("picker.toml");
        std::fs::write(
            &path,
            "catalog = \"https://cdn.example.com/products.json\"\nstore_path = \"/tmp/sel.json\"\n",
        )
        .unwrap();

        let config = ConfigService::load(Some(&path)).unwrap();
        assert_eq!(config.catalog, "https://cdn.example.com/products.json");
        assert_eq!(
            ConfigService::store_path(&config).unwrap(),
            PathBuf::from("/tmp/sel.json")
        );
    }

    #[test]
    fn test_invalid_file_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("picker.toml");
        std::fs::write(&path, "relay_endpoint = 5").unwrap();

        assert!(ConfigService::load(Some(&path)).unwrap_err().is_serialization());
    }
}
