//! Catalog loader implementations.
//!
//! Both loaders re-fetch on every call; there is no cache.

use async_trait::async_trait;
use picker_core::catalog::{Catalog, CatalogLoader, Product};
use picker_core::error::{PickerError, Result};
use reqwest::Client;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// Reads the catalog document from a local file.
#[derive(Debug, Clone)]
pub struct FileCatalogLoader {
    path: PathBuf,
}

impl FileCatalogLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CatalogLoader for FileCatalogLoader {
    async fn load_catalog(&self) -> Result<Vec<Product>> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            PickerError::fetch(format!("Failed to read catalog {}: {}", self.path.display(), e))
        })?;

        let catalog = Catalog::from_json(&content)?;
        debug!(
            "Loaded {} product(s) from {}",
            catalog.products.len(),
            self.path.display()
        );
        Ok(catalog.into_products())
    }
}

/// Fetches the catalog document over HTTP.
#[derive(Debug, Clone)]
pub struct HttpCatalogLoader {
    client: Client,
    url: String,
}

impl HttpCatalogLoader {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl CatalogLoader for HttpCatalogLoader {
    async fn load_catalog(&self) -> Result<Vec<Product>> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| PickerError::fetch(format!("Catalog request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(PickerError::fetch(format!(
                "Catalog request to {} returned HTTP {}",
                self.url,
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| PickerError::fetch(format!("Failed to read catalog body: {}", e)))?;

        let catalog = Catalog::from_json(&body)?;
        debug!("Fetched {} product(s) from {}", catalog.products.len(), self.url);
        Ok(catalog.into_products())
    }
}

/// Picks the loader for a catalog location: http(s) URLs are fetched, anything
/// else is treated as a file path.
pub fn catalog_loader_for(location: &str) -> Arc<dyn CatalogLoader> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Arc::new(HttpCatalogLoader::new(location))
    } else {
        Arc::new(FileCatalogLoader::new(location))
    }
}
