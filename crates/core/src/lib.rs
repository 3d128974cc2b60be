//! Tindi Core - Shared types library.
//!
//! This crate provides the types used across all Tindi storefront components:
//! - `storefront` - Widget library (cart store, product grid, quote form)
//! - `cli` - Terminal host for the widget
//!
//! # Architecture
//!
//! The core crate contains only types and pure cart logic - no I/O, no
//! storage access, no HTTP clients. Stock-limit enforcement lives here so it
//! can be tested without a storage backend.
//!
//! # Modules
//!
//! - [`types`] - Product ids, prices, quantities, emails, products and the cart

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
