//! Product grid rendering.
//!
//! The grid is always in exactly one of four states: loading, a list of
//! product cards, the "no products" placeholder, or a connection-failure
//! panel naming the API endpoint that could not be reached.

use askama::Template;

use tindi_core::Product;

use crate::filters;

/// Product card display data for templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCardView {
    pub id: String,
    pub name: String,
    pub price: String,
    pub category: String,
    pub image: String,
    pub stock_label: String,
    pub stock_class: &'static str,
    /// Whether add-to-cart controls are enabled.
    pub available: bool,
    /// Upper bound of the quantity input.
    pub max_quantity: u32,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        let level = product.stock_level();
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            price: product.price.display(),
            category: product.category_or_default().to_string(),
            image: product.image_or_default().to_string(),
            stock_label: level.label(),
            stock_class: level.css_class(),
            available: level.is_available(),
            max_quantity: product.stock_ceiling().unwrap_or(0),
        }
    }
}

/// Grid of product cards.
#[derive(Template)]
#[template(path = "products/grid.html", escape = "none")]
pub struct ProductGridTemplate<'a> {
    pub cards: &'a [ProductCardView],
}

/// Placeholder shown while products are loading.
#[derive(Template)]
#[template(path = "partials/grid_loading.html", escape = "none")]
pub struct LoadingTemplate;

/// Placeholder shown when a fetch returns no products.
#[derive(Template)]
#[template(path = "partials/grid_empty.html", escape = "none")]
pub struct NoProductsTemplate;

/// Panel shown when the API cannot be reached.
#[derive(Template)]
#[template(path = "partials/connection_failed.html", escape = "none")]
pub struct ConnectionFailedTemplate<'a> {
    pub target: &'a str,
}

/// What the product grid currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridState {
    Loading,
    Products(Vec<ProductCardView>),
    Empty,
    ConnectionFailed { target: String },
}

impl GridState {
    /// Build the grid for a set of products.
    #[must_use]
    pub fn from_products(products: &[Product]) -> Self {
        if products.is_empty() {
            Self::Empty
        } else {
            Self::Products(products.iter().map(ProductCardView::from).collect())
        }
    }

    /// Render to an HTML fragment.
    ///
    /// # Errors
    ///
    /// Returns an error if a template fails to render.
    pub fn render(&self) -> askama::Result<String> {
        match self {
            Self::Loading => LoadingTemplate.render(),
            Self::Products(cards) => ProductGridTemplate { cards }.render(),
            Self::Empty => NoProductsTemplate.render(),
            Self::ConnectionFailed { target } => ConnectionFailedTemplate { target }.render(),
        }
    }

    /// Number of product cards shown.
    #[must_use]
    pub fn card_count(&self) -> usize {
        match self {
            Self::Products(cards) => cards.len(),
            _ => 0,
        }
    }
}
