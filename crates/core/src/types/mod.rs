//! Core types for the Tindi storefront.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod email;
pub mod id;
pub mod price;
pub mod product;
pub mod quantity;

pub use cart::{Cart, CartAddition, CartError, LineItem};
pub use email::{Email, EmailError};
pub use id::ProductId;
pub use price::Price;
pub use product::{DEFAULT_PRODUCT_IMAGE, Product, StockLevel};
pub use quantity::{Quantity, QuantityError, parse_leading_int};
