//! Product detail modal controller.
//!
//! Opening the modal resolves the product from the transient catalog, never
//! from the network. For products in stock it arms a one-shot add action:
//! the first trigger takes it, later triggers do nothing until the modal is
//! opened again.

use tindi_core::{Product, ProductId};

use crate::cart::AddToCart;
use crate::catalog::ProductCatalog;

/// Fields shown in the detail modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub id: ProductId,
    pub image: String,
    pub name: String,
    pub price: String,
    pub description: String,
    pub add_label: String,
    pub add_enabled: bool,
}

impl From<&Product> for DetailView {
    fn from(product: &Product) -> Self {
        let available = product.stock_level().is_available();
        Self {
            id: product.id.clone(),
            image: product.image_or_default().to_string(),
            name: product.name.clone(),
            price: product.price.display(),
            description: product.description_or_default().to_string(),
            add_label: if available { "Add to Cart" } else { "Out of Stock" }.to_string(),
            add_enabled: available,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DetailModal {
    pending: Option<AddToCart>,
}

impl DetailModal {
    #[must_use]
    pub const fn new() -> Self {
        Self { pending: None }
    }

    /// Populate the modal for `id`.
    ///
    /// Returns `None`, leaving any armed action in place, if the product is
    /// not in the catalog.
    pub fn open(&mut self, catalog: &ProductCatalog, id: &ProductId) -> Option<DetailView> {
        let product = catalog.get(id)?;

        self.pending = product.stock_ceiling().map(|stock| {
            AddToCart::new(
                product.name.clone(),
                product.price,
                product.image.clone().unwrap_or_default(),
            )
            .with_max_stock(stock)
        });

        Some(DetailView::from(product))
    }

    /// Take the armed add action, disarming it.
    pub fn take_pending(&mut self) -> Option<AddToCart> {
        self.pending.take()
    }

    /// Drop the armed add action; the modal was closed.
    pub fn disarm(&mut self) {
        self.pending = None;
    }
}
