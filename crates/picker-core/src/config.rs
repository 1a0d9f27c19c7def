//! Client configuration models.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_CATALOG_LOCATION: &str = "products.json";
pub const DEFAULT_RELAY_ENDPOINT: &str = "http://localhost:3000/openai";

/// Settings for a picker front end, read from `picker.toml`.
///
/// Every field is optional in the file; missing ones take the defaults.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ClientConfig {
    /// Path or http(s) URL of the catalog document.
    pub catalog: String,
    /// Relay endpoint chat requests are posted to.
    pub relay_endpoint: String,
    /// File backing the key-value store. None means the platform data dir.
    pub store_path: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            catalog: DEFAULT_CATALOG_LOCATION.to_string(),
            relay_endpoint: DEFAULT_RELAY_ENDPOINT.to_string(),
            store_path: None,
        }
    }
}

impl ClientConfig {
    pub fn from_toml(content: &str) -> crate::error::Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(ClientConfig::from_toml("").unwrap(), ClientConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config = ClientConfig::from_toml(r#"relay_endpoint = "http://relay:8080/openai""#).unwrap();
        assert_eq!(config.relay_endpoint, "http://relay:8080/openai");
        assert_eq!(config.catalog, DEFAULT_CATALOG_LOCATION);
        assert!(config.store_path.is_none());
    }

    #[test]
    fn test_invalid_toml_is_serialization_error() {
        let err = ClientConfig::from_toml("catalog = [").unwrap_err();
        assert!(err.is_serialization());
    }
}
