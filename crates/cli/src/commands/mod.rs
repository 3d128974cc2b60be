//! Command implementations.
//!
//! Each command drives one [`Storefront`] session backed by the file store
//! and prints through a [`TerminalSurface`].

pub mod cart;
pub mod detail;
pub mod products;
pub mod quote;

use thiserror::Error;

use tindi_storefront::{Storefront, WidgetError};

use crate::terminal::TerminalSurface;

/// A page session as the CLI runs it.
pub type Session<S, W> = Storefront<S, TerminalSurface<W>>;

/// Errors that end a command with a non-zero exit status.
///
/// The customer-facing message for a failed action has already been printed
/// by the time one of these is returned.
#[derive(Debug, Error)]
pub enum CliError {
    /// Session setup or a storefront operation failed.
    #[error(transparent)]
    Widget(#[from] WidgetError),

    /// No product with this id in the current listing.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// The product cannot be added from its detail view.
    #[error("Product is out of stock: {0}")]
    OutOfStock(String),

    /// The storefront reported the action as failed.
    #[error("{0}")]
    Failed(&'static str),
}
