//! Catalog domain module.
//!
//! - `model`: product records and the catalog document (`Product`, `Catalog`)
//! - `loader`: the loader trait implemented by infrastructure (`CatalogLoader`)

mod loader;
pub(crate) mod model;

pub use loader::CatalogLoader;
pub use model::{Catalog, Product, ProductId, filter_by_category};
