//! Unified error type for hosts driving the storefront.
//!
//! Each component has its own error enum; `WidgetError` wraps them so a host
//! can propagate any of them with `?`.

use thiserror::Error;

use crate::api::ApiError;
use crate::cart::AddToCartError;
use crate::config::ConfigError;
use crate::storage::StorageError;

#[derive(Debug, Error)]
pub enum WidgetError {
    /// Configuration could not be resolved.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Storefront API call failed.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Storage backend failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Cart add did not happen.
    #[error(transparent)]
    Cart(#[from] AddToCartError),
}

impl WidgetError {
    /// Whether the error is worth reporting to error tracking.
    ///
    /// Cart rejections are customer input mistakes, not faults.
    #[must_use]
    pub const fn is_reportable(&self) -> bool {
        !matches!(self, Self::Cart(AddToCartError::Rejected(_)))
    }
}
