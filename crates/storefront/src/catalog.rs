//! Transient product catalog for the current page view.
//!
//! Holds the last successfully fetched product list so the detail modal and
//! card actions can resolve products without another request. Replaced
//! wholesale on every non-empty fetch; never persisted.

use tindi_core::{Product, ProductId};

#[derive(Debug, Clone, Default)]
pub struct ProductCatalog {
    products: Vec<Product>,
}

impl ProductCatalog {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            products: Vec::new(),
        }
    }

    /// Replace the whole catalog.
    pub fn replace(&mut self, products: Vec<Product>) {
        self.products = products;
    }

    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
