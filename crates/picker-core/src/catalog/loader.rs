//! Catalog loader trait.

use async_trait::async_trait;

use super::model::Product;
use crate::error::Result;

/// Source of the product catalog.
///
/// Implementations fetch on every call; nothing is cached. A payload that is
/// not valid JSON is an error, while a document without `products` yields an
/// empty list.
#[async_trait]
pub trait CatalogLoader: Send + Sync {
    async fn load_catalog(&self) -> Result<Vec<Product>>;
}
