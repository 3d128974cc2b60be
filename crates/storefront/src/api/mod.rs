//! Storefront API client.
//!
//! # Endpoints
//!
//! - `GET {API_URL}/products[?search=<query>]` → `{ success, data: Product[] }`
//! - `POST {API_URL}/quote` with a JSON map of form fields → `{ success, error? }`
//!
//! The response body decides the outcome, not the HTTP status: a 4xx/5xx
//! carrying a well-formed envelope is returned as that envelope. Only
//! transport failures and unparsable bodies are errors, as is a listing that
//! claims success but carries no `data` array.

mod conversions;
pub mod types;

use std::sync::Arc;

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, instrument, warn};
use url::Url;

use tindi_core::Product;

pub use conversions::{convert_product, convert_products};
pub use types::{ApiProduct, ProductsEnvelope, QuoteRequest, QuoteResponse};

/// Errors that can occur when calling the storefront API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not the expected JSON.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A successful listing carried no product list.
    #[error("product listing has no data")]
    MissingData,
}

/// Products returned by a listing call, already normalized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductListing {
    /// The API's own success flag.
    pub success: bool,
    pub products: Vec<Product>,
}

/// Client for the storefront API.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone, Debug)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

#[derive(Debug)]
struct ApiClientInner {
    client: reqwest::Client,
    /// Base URL without a trailing slash.
    base: String,
}

impl ApiClient {
    /// Create a client for the API rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(base_url: &Url) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder().build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                client,
                base: base_url.as_str().trim_end_matches('/').to_string(),
            }),
        })
    }

    /// The API base URL, as shown in connection-failure messages.
    #[must_use]
    pub fn target(&self) -> &str {
        &self.inner.base
    }

    /// URL of the product listing, with the search parameter when `query`
    /// is non-empty.
    #[must_use]
    pub fn products_url(&self, query: &str) -> String {
        if query.is_empty() {
            format!("{}/products", self.inner.base)
        } else {
            format!(
                "{}/products?search={}",
                self.inner.base,
                urlencoding::encode(query)
            )
        }
    }

    #[must_use]
    pub fn quote_url(&self) -> String {
        format!("{}/quote", self.inner.base)
    }

    /// List products, optionally filtered by a search query.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not a product
    /// envelope.
    #[instrument(skip(self), fields(endpoint = %self.inner.base))]
    pub async fn list_products(&self, query: &str) -> Result<ProductListing, ApiError> {
        let response = self
            .inner
            .client
            .get(self.products_url(query))
            .send()
            .await?;

        let envelope: ProductsEnvelope = read_json(response).await?;
        let data = match envelope.data {
            Some(data) => data,
            None if envelope.success => {
                warn!("Successful product listing has no data");
                return Err(ApiError::MissingData);
            }
            None => Vec::new(),
        };
        let products = conversions::convert_products(data);

        debug!(
            success = envelope.success,
            count = products.len(),
            "Fetched products"
        );

        Ok(ProductListing {
            success: envelope.success,
            products,
        })
    }

    /// Submit a quote request.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not a quote
    /// response.
    #[instrument(skip(self, request), fields(endpoint = %self.inner.base, field_count = request.0.len()))]
    pub async fn submit_quote(&self, request: &QuoteRequest) -> Result<QuoteResponse, ApiError> {
        let response = self
            .inner
            .client
            .post(self.quote_url())
            .json(request)
            .send()
            .await?;

        read_json(response).await
    }
}

/// Read a response body as JSON regardless of status.
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        warn!(
            status = %status,
            body = %body.chars().take(200).collect::<String>(),
            "API returned non-success status"
        );
    }

    serde_json::from_str(&body).map_err(|e| {
        warn!(
            error = %e,
            body = %body.chars().take(500).collect::<String>(),
            "Failed to parse API response"
        );
        ApiError::Parse(e)
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(&Url::parse(base).unwrap()).unwrap()
    }

    #[test]
    fn test_products_url_without_query() {
        let api = client("http://127.0.0.1:5000");
        assert_eq!(api.products_url(""), "http://127.0.0.1:5000/products");
    }

    #[test]
    fn test_products_url_encodes_query() {
        let api = client("https://api.tinditech.com/");
        assert_eq!(
            api.products_url("wifi & cctv"),
            "https://api.tinditech.com/products?search=wifi%20%26%20cctv"
        );
    }

    #[test]
    fn test_target_strips_trailing_slash() {
        let api = client("https://api.tinditech.com/v1/");
        assert_eq!(api.target(), "https://api.tinditech.com/v1");
        assert_eq!(api.quote_url(), "https://api.tinditech.com/v1/quote");
    }

    #[test]
    fn test_api_error_display() {
        let err = ApiError::Parse(serde_json::from_str::<QuoteResponse>("nope").unwrap_err());
        assert!(err.to_string().starts_with("JSON parse error:"));
        assert_eq!(
            ApiError::MissingData.to_string(),
            "product listing has no data"
        );
    }
}
