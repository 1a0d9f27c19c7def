//! Selected-product set.

use serde::{Deserialize, Serialize};

use crate::catalog::{Product, ProductId};

/// The ids of the products the user has chosen.
///
/// Ids are unique and kept in insertion order, which is the order the
/// selection panel displays them in. Serialized as a plain JSON array;
/// repeated ids in a stored array are collapsed on the way in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<ProductId>", into = "Vec<ProductId>")]
pub struct SelectionSet {
    ids: Vec<ProductId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from ids, dropping repeats after their first occurrence.
    pub fn from_ids(ids: impl IntoIterator<Item = ProductId>) -> Self {
        let mut set = Self::new();
        for id in ids {
            set.insert(id);
        }
        set
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.ids.contains(&id)
    }

    /// Adds `id`. Returns false when it was already present.
    pub fn insert(&mut self, id: ProductId) -> bool {
        if self.contains(id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    /// Removes `id`. Returns false when it was not present.
    pub fn remove(&mut self, id: ProductId) -> bool {
        let before = self.ids.len();
        self.ids.retain(|existing| *existing != id);
        self.ids.len() != before
    }

    /// Removes `id` if present, adds it otherwise.
    ///
    /// Returns whether `id` is selected afterwards. Persisting the result is
    /// the caller's job.
    pub fn toggle(&mut self, id: ProductId) -> bool {
        if self.remove(id) {
            false
        } else {
            self.ids.push(id);
            true
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn ids(&self) -> &[ProductId] {
        &self.ids
    }

    pub fn iter(&self) -> impl Iterator<Item = ProductId> + '_ {
        self.ids.iter().copied()
    }

    /// Selected products in selection order. Ids with no matching product are skipped.
    pub fn resolve<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        self.ids
            .iter()
            .filter_map(|id| products.iter().find(|product| product.id == *id))
            .collect()
    }
}

impl From<Vec<ProductId>> for SelectionSet {
    fn from(ids: Vec<ProductId>) -> Self {
        Self::from_ids(ids)
    }
}

impl From<SelectionSet> for Vec<ProductId> {
    fn from(set: SelectionSet) -> Self {
        set.ids
    }
}
