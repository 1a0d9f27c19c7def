//! Pure projections from catalog and selection state to display models.
//!
//! Nothing here knows how a region is drawn; presenters turn these models
//! into HTML, terminal output, or anything else.

use serde::Serialize;
use std::fmt;

use crate::catalog::{Product, ProductId, filter_by_category};
use crate::selection::SelectionSet;

pub const NO_CATEGORY_MESSAGE: &str = "Select a category to view products";
pub const NO_PRODUCTS_MESSAGE: &str = "No products found in this category";
pub const NO_SELECTION_MESSAGE: &str = "No products selected yet";

/// One product card in the catalog region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductCard {
    pub id: ProductId,
    pub name: String,
    pub brand: String,
    pub image: String,
    pub selected: bool,
}

impl ProductCard {
    pub fn new(product: &Product, selected: bool) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            brand: product.brand.clone(),
            image: product.image.clone(),
            selected,
        }
    }

    /// Label of the select/deselect control.
    pub fn toggle_label(&self) -> &'static str {
        if self.selected { "Remove" } else { "Select" }
    }
}

/// Contents of the catalog region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CatalogView {
    /// No category chosen yet.
    Placeholder,
    /// The active category has no products.
    Empty { category: String },
    Cards {
        category: String,
        cards: Vec<ProductCard>,
    },
}

impl CatalogView {
    /// Projects the products of `category` with their membership in `selection`.
    ///
    /// Cards keep catalog order.
    pub fn project(products: &[Product], category: Option<&str>, selection: &SelectionSet) -> Self {
        let Some(category) = category else {
            return CatalogView::Placeholder;
        };

        let cards: Vec<ProductCard> = filter_by_category(products, category)
            .into_iter()
            .map(|product| ProductCard::new(product, selection.contains(product.id)))
            .collect();

        if cards.is_empty() {
            CatalogView::Empty {
                category: category.to_string(),
            }
        } else {
            CatalogView::Cards {
                category: category.to_string(),
                cards,
            }
        }
    }

    pub fn cards(&self) -> &[ProductCard] {
        match self {
            CatalogView::Cards { cards, .. } => cards,
            _ => &[],
        }
    }

    /// Human-readable message for the non-card states.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            CatalogView::Placeholder => Some(NO_CATEGORY_MESSAGE),
            CatalogView::Empty { .. } => Some(NO_PRODUCTS_MESSAGE),
            CatalogView::Cards { .. } => None,
        }
    }
}

/// One row of the selected-products panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionEntry {
    pub id: ProductId,
    pub name: String,
    pub brand: String,
}

/// Contents of the selected-products panel, in selection order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SelectionView {
    pub entries: Vec<SelectionEntry>,
}

impl SelectionView {
    /// Ids that no longer resolve to a product are left out.
    pub fn project(selection: &SelectionSet, products: &[Product]) -> Self {
        let entries = selection
            .resolve(products)
            .into_iter()
            .map(|product| SelectionEntry {
                id: product.id,
                name: product.name.clone(),
                brand: product.brand.clone(),
            })
            .collect();
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Full attributes of one product, shown on request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductDetails {
    pub name: String,
    pub brand: String,
    pub category: String,
    pub description: String,
}

impl From<&Product> for ProductDetails {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            brand: product.brand.clone(),
            category: product.category.clone(),
            description: product.description.clone(),
        }
    }
}

impl fmt::Display for ProductDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(f, "Brand: {}", self.brand)?;
        writeln!(f, "Category: {}", self.category)?;
        write!(f, "{}", self.description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::model::fixtures::sample_products;

    #[test]
    fn test_no_category_is_placeholder() {
        let view = CatalogView::project(&sample_products(), None, &SelectionSet::new());
        assert_eq!(view, CatalogView::Placeholder);
        assert_eq!(view.message(), Some(NO_CATEGORY_MESSAGE));
    }

    #[test]
    fn test_cards_match_category_in_catalog_order() {
        let products = sample_products();
        let view = CatalogView::project(&products, Some("cleanser"), &SelectionSet::from_ids([3]));

        let cards = view.cards();
        assert_eq!(cards.iter().map(|c| c.id).collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(cards[0].toggle_label(), "Select");
        assert_eq!(cards[1].toggle_label(), "Remove");
    }

    #[test]
    fn test_category_without_products_is_empty_state() {
        let view = CatalogView::project(&sample_products(), Some("fragrance"), &SelectionSet::new());
        assert!(view.cards().is_empty());
        assert_eq!(view.message(), Some(NO_PRODUCTS_MESSAGE));
    }

    #[test]
    fn test_selection_view_omits_dangling_ids() {
        let view = SelectionView::project(&SelectionSet::from_ids([77, 2]), &sample_products());
        assert_eq!(view.entries.len(), 1);
        assert_eq!(view.entries[0].name, "Hydrating Serum");
    }

    #[test]
    fn test_details_show_all_four_fields() {
        let products = sample_products();
        let details = ProductDetails::from(&products[1]);
        let text = details.to_string();
        assert!(text.contains("Hydrating Serum"));
        assert!(text.contains("Garnier"));
        assert!(text.contains("skincare"));
        assert!(text.contains("Hydrating Serum description"));
    }
}
