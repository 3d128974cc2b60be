//! Tindi Storefront library.
//!
//! The storefront widget as a library: a product grid fetched from the Tindi
//! API, a quote-request flow, a product detail modal and a cart persisted in
//! a local key-value store. Hosts drive it through [`Storefront`] and render
//! whatever it pushes to their [`Surface`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod detail;
pub mod error;
pub mod events;
pub mod filters;
pub mod quote;
pub mod render;
pub mod session;
pub mod storage;
pub mod surface;

pub use error::WidgetError;
pub use session::{Storefront, is_quote_link};
pub use surface::Surface;
