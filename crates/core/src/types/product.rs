//! Catalog products as seen by the widget.
//!
//! Products are supplied by the remote API and are read-only here. The raw
//! API shape is normalized into [`Product`] at the ingestion boundary.

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;

/// Image shown when a product has none.
pub const DEFAULT_PRODUCT_IMAGE: &str = "img/pics/default-product.png";

/// Category shown when a product has none.
pub const DEFAULT_CATEGORY: &str = "Product";

/// Description shown when a product has none.
pub const DEFAULT_DESCRIPTION: &str = "No description.";

/// Stock above this count is shown as plentiful rather than as an exact count.
pub const LOW_STOCK_THRESHOLD: i64 = 10;

/// A product in the remote catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub image: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    /// Units available. Zero when the API did not report stock.
    pub stock: i64,
}

impl Product {
    /// Image URL, falling back to [`DEFAULT_PRODUCT_IMAGE`].
    #[must_use]
    pub fn image_or_default(&self) -> &str {
        self.image
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_PRODUCT_IMAGE)
    }

    /// Category, falling back to [`DEFAULT_CATEGORY`].
    #[must_use]
    pub fn category_or_default(&self) -> &str {
        self.category
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_CATEGORY)
    }

    /// Description, falling back to [`DEFAULT_DESCRIPTION`].
    #[must_use]
    pub fn description_or_default(&self) -> &str {
        self.description
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_DESCRIPTION)
    }

    #[must_use]
    pub const fn stock_level(&self) -> StockLevel {
        StockLevel::from_stock(self.stock)
    }

    /// Stock as a cart ceiling. `None` when nothing can be ordered.
    #[must_use]
    pub fn stock_ceiling(&self) -> Option<u32> {
        u32::try_from(self.stock).ok().filter(|&s| s > 0)
    }
}

/// Three-tier stock indicator shown on product cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StockLevel {
    /// Nothing left; add controls are disabled.
    OutOfStock,
    /// Between 1 and [`LOW_STOCK_THRESHOLD`] units left.
    Low(u32),
    /// More than [`LOW_STOCK_THRESHOLD`] units.
    InStock,
}

impl StockLevel {
    #[must_use]
    pub const fn from_stock(stock: i64) -> Self {
        if stock <= 0 {
            Self::OutOfStock
        } else if stock > LOW_STOCK_THRESHOLD {
            Self::InStock
        } else {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // 1..=10
            Self::Low(stock as u32)
        }
    }

    /// Whether the product can be added to the cart.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        !matches!(self, Self::OutOfStock)
    }

    /// Customer-facing label.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::OutOfStock => "Out of Stock".to_string(),
            Self::Low(left) => format!("Low Stock (Only {left} left!)"),
            Self::InStock => format!("In Stock ({LOW_STOCK_THRESHOLD}+ available)"),
        }
    }

    /// CSS modifier for the label.
    #[must_use]
    pub const fn css_class(&self) -> &'static str {
        match self {
            Self::OutOfStock => "stock-out",
            Self::Low(_) => "stock-low",
            Self::InStock => "stock-in",
        }
    }
}
