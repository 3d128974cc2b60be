//! Cart store: the cart persisted under a fixed storage key.
//!
//! Reads never fail. A missing, unreadable or corrupt stored cart is treated
//! as an empty cart and is overwritten by the next successful add.

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use tindi_core::{Cart, CartAddition, CartError, Price, Quantity};

use crate::storage::{KeyValueStore, StorageError};

/// Storage key holding the serialized cart.
pub const CART_KEY: &str = "cart";

/// Request to add a product to the cart, as submitted by a card or modal.
///
/// `quantity` is the raw input text; it is validated when the add runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddToCart {
    pub name: String,
    pub price: Price,
    pub image: String,
    pub max_stock: Option<u32>,
    pub quantity: String,
}

impl AddToCart {
    /// A single unit with no stock ceiling.
    #[must_use]
    pub fn new(name: impl Into<String>, price: Price, image: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            price,
            image: image.into(),
            max_stock: None,
            quantity: "1".to_string(),
        }
    }

    #[must_use]
    pub fn with_max_stock(mut self, max_stock: u32) -> Self {
        self.max_stock = Some(max_stock);
        self
    }

    #[must_use]
    pub fn with_quantity(mut self, quantity: impl Into<String>) -> Self {
        self.quantity = quantity.into();
        self
    }
}

/// Why an add did not happen.
#[derive(Debug, Error)]
pub enum AddToCartError {
    /// The add broke a cart rule. Nothing was written.
    #[error(transparent)]
    Rejected(#[from] CartError),

    /// The cart could not be written.
    #[error("Unable to add item to cart. Please try again.")]
    Storage(#[from] StorageError),

    /// The cart could not be encoded.
    #[error("Unable to add item to cart. Please try again.")]
    Encode(#[from] serde_json::Error),
}

impl AddToCartError {
    /// Whether this is a validation rejection rather than a storage failure.
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}

/// A successful add.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddedToCart {
    pub name: String,
    pub quantity: Quantity,
    /// Quantity of the product's line after the add.
    pub line_quantity: u32,
}

impl AddedToCart {
    /// Customer-facing confirmation.
    #[must_use]
    pub fn message(&self) -> String {
        format!("{} x {} added to cart!", self.quantity, self.name)
    }
}

/// Cart persisted in a [`KeyValueStore`].
#[derive(Debug)]
pub struct CartStore<S> {
    storage: S,
}

impl<S: KeyValueStore> CartStore<S> {
    pub const fn new(storage: S) -> Self {
        Self { storage }
    }

    /// The backing store.
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Read the stored cart, treating any failure as an empty cart.
    pub fn load(&self) -> Cart {
        let raw = match self.storage.get(CART_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Cart::new(),
            Err(e) => {
                warn!(error = %e, "Failed to read stored cart, treating as empty");
                return Cart::new();
            }
        };

        match serde_json::from_str::<Option<Cart>>(&raw) {
            Ok(cart) => cart.unwrap_or_default(),
            Err(e) => {
                warn!(error = %e, "Stored cart is corrupt, treating as empty");
                Cart::new()
            }
        }
    }

    /// Total units in the stored cart.
    pub fn count(&self) -> u32 {
        self.load().total_quantity()
    }

    /// Delete the stored cart.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot delete the key.
    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.storage.remove(CART_KEY)?;
        info!("Cleared cart");
        Ok(())
    }

    /// Add units of a product and persist the updated cart.
    ///
    /// # Errors
    ///
    /// Returns [`AddToCartError::Rejected`] if the quantity is invalid or the
    /// stock ceiling would be exceeded, and a storage or encoding error if
    /// the cart cannot be written. The stored cart is unchanged on error.
    #[instrument(skip(self, request), fields(name = %request.name, quantity = %request.quantity))]
    pub fn add_to_cart(&mut self, request: AddToCart) -> Result<AddedToCart, AddToCartError> {
        let quantity = Quantity::parse(&request.quantity).map_err(CartError::from)?;

        let mut cart = self.load();
        let line_quantity = cart
            .add(CartAddition {
                name: request.name.clone(),
                price: request.price,
                image: request.image,
                max_stock: request.max_stock,
                quantity,
            })
            .inspect_err(|e| debug!(error = %e, "Cart add rejected"))?;

        let encoded = serde_json::to_string(&cart)?;
        self.storage.set(CART_KEY, &encoded)?;

        info!(line_quantity, "Added to cart");
        Ok(AddedToCart {
            name: request.name,
            quantity,
            line_quantity,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tindi_core::LineItem;

    use super::*;
    use crate::storage::MemoryStore;

    fn router(qty: &str) -> AddToCart {
        AddToCart::new("Router", Price::from_whole(1500), "img.png")
            .with_max_stock(5)
            .with_quantity(qty)
    }

    /// Store whose writes always fail.
    struct ReadOnlyStore(MemoryStore);

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.0.get(key)
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Io(std::io::Error::other("quota exceeded")))
        }

        fn remove(&mut self, _key: &str) -> Result<(), StorageError> {
            Ok(())
        }
    }

    #[test]
    fn test_add_to_empty_cart_persists() {
        let mut store = CartStore::new(MemoryStore::new());
        let added = store.add_to_cart(router("3")).unwrap();

        assert_eq!(added.line_quantity, 3);
        assert_eq!(added.message(), "3 x Router added to cart!");

        let cart = store.load();
        assert_eq!(
            cart.items(),
            &[LineItem {
                name: "Router".to_string(),
                price: Price::from_whole(1500),
                image: "img.png".to_string(),
                quantity: 3,
                max_stock: Some(5),
            }]
        );
    }

    #[test]
    fn test_rejected_add_leaves_storage_untouched() {
        let mut store = CartStore::new(MemoryStore::new());
        store.add_to_cart(router("3")).unwrap();
        let before = store.storage().get(CART_KEY).unwrap();

        let err = store.add_to_cart(router("3")).unwrap_err();
        assert!(err.is_rejection());
        assert!(err.to_string().starts_with("Stock Limit Reached!"));

        assert_eq!(store.storage().get(CART_KEY).unwrap(), before);
        assert_eq!(store.count(), 3);
    }

    #[test]
    fn test_invalid_quantity_rejected() {
        let mut store = CartStore::new(MemoryStore::new());
        for qty in ["0", "-2", "", "many"] {
            let err = store.add_to_cart(router(qty)).unwrap_err();
            assert_eq!(err.to_string(), "Please enter a valid quantity.");
        }
        assert_eq!(store.storage().get(CART_KEY).unwrap(), None);
    }

    #[test]
    fn test_count_increases_by_quantity() {
        let mut store = CartStore::new(MemoryStore::new());
        store.add_to_cart(router("2")).unwrap();
        let before = store.count();
        store
            .add_to_cart(AddToCart::new("Switch", Price::from_whole(900), "s.png").with_quantity("4"))
            .unwrap();
        assert_eq!(store.count(), before + 4);
    }

    #[test]
    fn test_corrupt_cart_reads_empty() {
        for raw in ["not json", "null", "{\"name\":1}", ""] {
            let store = CartStore::new(MemoryStore::new().with_entry(CART_KEY, raw));
            assert_eq!(store.count(), 0, "raw = {raw:?}");
        }
    }

    #[test]
    fn test_add_over_corrupt_cart_replaces_it() {
        let mut store = CartStore::new(MemoryStore::new().with_entry(CART_KEY, "garbage"));
        store.add_to_cart(router("1")).unwrap();
        assert_eq!(store.count(), 1);
    }

    #[test]
    fn test_storage_failure_reported() {
        let mut store = CartStore::new(ReadOnlyStore(MemoryStore::new()));
        let err = store.add_to_cart(router("1")).unwrap_err();
        assert!(!err.is_rejection());
        assert_eq!(
            err.to_string(),
            "Unable to add item to cart. Please try again."
        );
    }

    #[test]
    fn test_items_and_clear() {
        let mut store = CartStore::new(MemoryStore::new());
        store.add_to_cart(router("2")).unwrap();
        assert_eq!(store.load().items().len(), 1);
        assert_eq!(store.load().find("Router").unwrap().quantity, 2);

        store.clear().unwrap();
        assert!(store.load().is_empty());
        assert_eq!(store.storage().get(CART_KEY).unwrap(), None);
    }
}
