//! The shopping cart and its stock-limit rules.
//!
//! A cart is an ordered list of [`LineItem`]s, unique by product name.
//! Every add is validated against the product's stock ceiling before anything
//! is applied: an add that would push a line past its ceiling is rejected as a
//! whole, never clamped.
//!
//! The serialized form is a bare JSON array of camelCase line items:
//!
//! ```json
//! [{"name":"Router","price":1500,"image":"img.png","quantity":3,"maxStock":5}]
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use super::price::Price;
use super::quantity::{Quantity, QuantityError};

/// Reasons an add is rejected. The messages are shown to customers as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// Quantity input was not a positive integer.
    #[error("Please enter a valid quantity.")]
    InvalidQuantity(#[from] QuantityError),

    /// The requested quantity alone exceeds the stock ceiling.
    #[error("Sorry, you cannot order more than {limit} items.\n(Available Stock: {limit})")]
    ExceedsStock { limit: u32 },

    /// The line already in the cart plus the requested quantity exceeds the
    /// stock ceiling.
    #[error(
        "Stock Limit Reached!\n\nYou already have {in_cart} in your cart.\nAdding {requested} would exceed the available stock of {limit}."
    )]
    StockLimitReached {
        in_cart: u32,
        requested: u32,
        limit: u32,
    },
}

/// One product entry in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: Price,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image: String,
    /// Zero only for carts written by older clients that omitted it.
    #[serde(default, deserialize_with = "null_as_default")]
    pub quantity: u32,
    /// Stock ceiling mirrored from the product at the most recent add.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_stock: Option<u32>,
}

impl LineItem {
    /// Units this line contributes to the cart badge. A missing quantity
    /// counts as one.
    #[must_use]
    pub const fn counted_quantity(&self) -> u32 {
        if self.quantity == 0 { 1 } else { self.quantity }
    }
}

/// A validated request to add units of a product to the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartAddition {
    pub name: String,
    pub price: Price,
    pub image: String,
    /// `None` means the product has no known ceiling.
    pub max_stock: Option<u32>,
    pub quantity: Quantity,
}

/// An ordered list of line items, unique by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Find the line for a product name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&LineItem> {
        self.items.iter().find(|item| item.name == name)
    }

    /// Total units across all lines, as shown on the cart badge.
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.items
            .iter()
            .fold(0_u32, |acc, item| acc.saturating_add(item.counted_quantity()))
    }

    /// Add units of a product.
    ///
    /// Merges into the existing line with the same name, or appends a new
    /// line. Returns the line's quantity after the add.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ExceedsStock`] if the requested quantity alone is
    /// over the ceiling, or [`CartError::StockLimitReached`] if the merged
    /// total would be. The cart is unchanged on error.
    pub fn add(&mut self, addition: CartAddition) -> Result<u32, CartError> {
        let requested = addition.quantity.get();

        if let Some(limit) = addition.max_stock
            && requested > limit
        {
            return Err(CartError::ExceedsStock { limit });
        }

        if let Some(existing) = self.items.iter_mut().find(|i| i.name == addition.name) {
            let in_cart = existing.quantity;
            let new_total = in_cart.saturating_add(requested);

            if let Some(limit) = addition.max_stock
                && new_total > limit
            {
                return Err(CartError::StockLimitReached {
                    in_cart,
                    requested,
                    limit,
                });
            }

            existing.quantity = new_total;
            existing.max_stock = addition.max_stock;
            return Ok(new_total);
        }

        self.items.push(LineItem {
            name: addition.name,
            price: addition.price,
            image: addition.image,
            quantity: requested,
            max_stock: addition.max_stock,
        });
        Ok(requested)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn router(qty: u32, max_stock: Option<u32>) -> CartAddition {
        CartAddition {
            name: "Router".to_string(),
            price: Price::from_whole(1500),
            image: "img.png".to_string(),
            max_stock,
            quantity: Quantity::new(qty).unwrap(),
        }
    }

    #[test]
    fn test_add_to_empty_cart() {
        let mut cart = Cart::new();
        assert_eq!(cart.add(router(3, Some(5))).unwrap(), 3);

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
    fn test_add_merges_by_name() {
        let mut cart = Cart::new();
        cart.add(router(1, Some(5))).unwrap();
        cart.add(router(2, Some(5))).unwrap();

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.find("Router").unwrap().quantity, 3);
        assert_eq!(cart.total_quantity(), 3);
    }

    #[test]
    fn test_add_over_stock_rejected() {
        let mut cart = Cart::new();
        let err = cart.add(router(6, Some(5))).unwrap_err();
        assert_eq!(err, CartError::ExceedsStock { limit: 5 });
        assert!(cart.is_empty());
    }

    #[test]
    fn test_merged_total_over_stock_rejected_without_partial_apply() {
        let mut cart = Cart::new();
        cart.add(router(3, Some(5))).unwrap();
        let before = cart.clone();

        let err = cart.add(router(3, Some(5))).unwrap_err();
        assert_eq!(
            err,
            CartError::StockLimitReached {
                in_cart: 3,
                requested: 3,
                limit: 5
            }
        );
        assert_eq!(cart, before);
    }

    #[test]
    fn test_merge_refreshes_max_stock() {
        let mut cart = Cart::new();
        cart.add(router(1, Some(5))).unwrap();
        cart.add(router(1, Some(8))).unwrap();
        assert_eq!(cart.find("Router").unwrap().max_stock, Some(8));
    }

    #[test]
    fn test_unbounded_without_max_stock() {
        let mut cart = Cart::new();
        cart.add(router(500, None)).unwrap();
        cart.add(router(500, None)).unwrap();
        assert_eq!(cart.total_quantity(), 1000);
    }

    #[test]
    fn test_total_counts_missing_quantity_as_one() {
        let json = r#"[{"name":"A","price":10,"image":"a.png"},{"name":"B","price":5,"image":"b.png","quantity":4}]"#;
        let cart: Cart = serde_json::from_str(json).unwrap();
        assert_eq!(cart.total_quantity(), 5);
    }

    #[test]
    fn test_missing_quantity_counts_as_zero_when_merging() {
        let json = r#"[{"name":"Router","price":1500,"image":"img.png","maxStock":5}]"#;
        let mut cart: Cart = serde_json::from_str(json).unwrap();
        assert_eq!(cart.add(router(5, Some(5))).unwrap(), 5);
    }

    #[test]
    fn test_serialized_shape() {
        let mut cart = Cart::new();
        cart.add(router(3, Some(5))).unwrap();

        let value = serde_json::to_value(&cart).unwrap();
        let item = value.get(0).unwrap();
        assert_eq!(item.get("name").unwrap(), "Router");
        assert_eq!(item.get("image").unwrap(), "img.png");
        assert_eq!(item.get("quantity").unwrap(), 3);
        assert_eq!(item.get("maxStock").unwrap(), 5);
        assert_eq!(item.get("price").unwrap().as_f64(), Some(1500.0));
    }

    #[test]
    fn test_tolerates_null_fields() {
        let json = r#"[{"name":"Router","price":"1500","image":null,"quantity":2,"maxStock":null}]"#;
        let cart: Cart = serde_json::from_str(json).unwrap();
        let item = cart.find("Router").unwrap();
        assert_eq!(item.image, "");
        assert_eq!(item.max_stock, None);
        assert_eq!(item.price, Price::from_whole(1500));
    }

    #[test]
    fn test_round_trip_preserves_items() {
        let mut cart = Cart::new();
        cart.add(router(2, Some(5))).unwrap();
        cart.add(CartAddition {
            name: "Switch".to_string(),
            price: Price::from_whole(4200),
            image: "switch.png".to_string(),
            max_stock: None,
            quantity: Quantity::ONE,
        })
        .unwrap();

        let json = serde_json::to_string(&cart).unwrap();
        let restored: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, cart);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CartError::ExceedsStock { limit: 5 }.to_string(),
            "Sorry, you cannot order more than 5 items.\n(Available Stock: 5)"
        );
        assert_eq!(
            CartError::InvalidQuantity(QuantityError::Invalid("x".to_string())).to_string(),
            "Please enter a valid quantity."
        );
    }
}
