//! Product identifiers.
//!
//! The product API has historically returned either `_id` (document store
//! ids) or `id`. Both are normalized to a single [`ProductId`] when products
//! are ingested, so nothing downstream needs to care which one was present.

use serde::{Deserialize, Serialize};

/// Opaque identifier of a product in the remote catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create a new product ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the underlying string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ::core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<ProductId> for String {
    fn from(id: ProductId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_id_serializes_transparently() {
        let id = ProductId::new("65f1c0ffee");
        let json = serde_json::to_string(&id).unwrap_or_default();
        assert_eq!(json, "\"65f1c0ffee\"");
    }

    #[test]
    fn test_product_id_display() {
        assert_eq!(ProductId::from("abc").to_string(), "abc");
    }
}
