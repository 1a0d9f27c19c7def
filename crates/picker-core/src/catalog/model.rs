//! Product catalog models.

use serde::{Deserialize, Serialize};

/// Identifier of a product in the catalog.
pub type ProductId = u32;

/// A single catalog record.
///
/// Products are sourced entirely from the external catalog file and are
/// never created or mutated by the picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub brand: String,
    pub category: String,
    /// Image URL shown on the product card.
    pub image: String,
    pub description: String,
}

/// The catalog document, `{ "products": [...] }`.
///
/// A document without a `products` field decodes as an empty catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Parses a catalog document from JSON text.
    pub fn from_json(content: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Resolves a product by id.
    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for product in &self.products {
            if !categories.contains(&product.category.as_str()) {
                categories.push(&product.category);
            }
        }
        categories
    }

    pub fn into_products(self) -> Vec<Product> {
        self.products
    }
}

/// Keeps the products whose category equals `category`, in catalog order.
pub fn filter_by_category<'a>(products: &'a [Product], category: &str) -> Vec<&'a Product> {
    products
        .iter()
        .filter(|product| product.category == category)
        .collect()
}
