//! Wire types for the storefront API.
//!
//! These mirror the JSON the API returns, including its looseness: ids under
//! either `_id` or `id`, prices and stock as numbers or strings, and fields
//! that may be `null`. See `conversions` for normalization into
//! [`tindi_core::Product`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// `GET /products` response.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductsEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<Vec<ApiProduct>>,
}

/// A product as returned by the API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiProduct {
    /// Document-store id; preferred over `id` when both are present.
    #[serde(rename = "_id", default)]
    pub document_id: Option<serde_json::Value>,
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<serde_json::Value>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub stock: Option<serde_json::Value>,
}

/// `POST /quote` request body: form field names to values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuoteRequest(pub BTreeMap<String, String>);

/// `POST /quote` response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct QuoteResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}
