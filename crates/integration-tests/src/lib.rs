//! Integration tests for the Tindi storefront.
//!
//! Tests drive a real [`Storefront`] session over HTTP against an in-process
//! mock of the storefront API, so no backend needs to be running.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p tindi-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `products` - Product grid fetch, search and failure panels
//! - `quote` - Quote and contact form submission
//! - `cart` - Cart persistence and the detail modal add flow

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::Value;
use tokio::net::TcpListener;
use url::Url;

use tindi_storefront::config::WidgetConfig;
use tindi_storefront::storage::KeyValueStore;
use tindi_storefront::surface::RecordingSurface;
use tindi_storefront::{Storefront, WidgetError};

/// A canned API response.
#[derive(Debug, Clone)]
pub struct MockResponse {
    status: StatusCode,
    body: String,
}

impl MockResponse {
    /// `200 OK` with a JSON body.
    #[must_use]
    pub fn json(body: &Value) -> Self {
        Self {
            status: StatusCode::OK,
            body: body.to_string(),
        }
    }

    /// Any status with a raw body.
    #[must_use]
    pub fn raw(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    #[must_use]
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }
}

impl IntoResponse for MockResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            self.body,
        )
            .into_response()
    }
}

#[derive(Debug)]
struct MockState {
    products: MockResponse,
    quote: MockResponse,
    searches: Vec<Option<String>>,
    quotes: Vec<Value>,
}

type Shared = Arc<Mutex<MockState>>;

/// In-process stand-in for the storefront API.
#[derive(Debug)]
pub struct MockApi {
    url: Url,
    state: Shared,
}

impl MockApi {
    /// Serve `products` for every listing and `quote` for every quote post.
    ///
    /// # Errors
    ///
    /// Returns an error if no local port can be bound.
    pub async fn start(products: MockResponse, quote: MockResponse) -> std::io::Result<Self> {
        let state = Arc::new(Mutex::new(MockState {
            products,
            quote,
            searches: Vec::new(),
            quotes: Vec::new(),
        }));

        let app = Router::new()
            .route("/products", get(list_products))
            .route("/quote", post(submit_quote))
            .with_state(Arc::clone(&state));

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!(error = %e, "Mock API stopped");
            }
        });

        let url = Url::parse(&format!("http://{addr}"))
            .map_err(|e| std::io::Error::other(e.to_string()))?;
        Ok(Self { url, state })
    }

    /// API that lists `products` and accepts every quote.
    ///
    /// # Errors
    ///
    /// Returns an error if no local port can be bound.
    pub async fn with_products(products: &Value) -> std::io::Result<Self> {
        Self::start(
            MockResponse::json(&serde_json::json!({ "success": true, "data": products })),
            MockResponse::json(&serde_json::json!({ "success": true })),
        )
        .await
    }

    /// Serve `response` for listings from now on.
    pub fn set_products(&self, response: MockResponse) {
        lock(&self.state).products = response;
    }

    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    /// `search` parameter of every listing request, in order.
    #[must_use]
    pub fn searches(&self) -> Vec<Option<String>> {
        lock(&self.state).searches.clone()
    }

    /// Body of every quote request, in order.
    #[must_use]
    pub fn quotes(&self) -> Vec<Value> {
        lock(&self.state).quotes.clone()
    }
}

async fn list_products(
    State(state): State<Shared>,
    Query(params): Query<HashMap<String, String>>,
) -> MockResponse {
    let mut state = lock(&state);
    state.searches.push(params.get("search").cloned());
    state.products.clone()
}

async fn submit_quote(State(state): State<Shared>, Json(body): Json<Value>) -> MockResponse {
    let mut state = lock(&state);
    state.quotes.push(body);
    state.quote.clone()
}

fn lock(state: &Mutex<MockState>) -> MutexGuard<'_, MockState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A base URL nothing listens on.
///
/// # Errors
///
/// Never in practice; the literal is a valid URL.
pub fn unreachable_url() -> Result<Url, url::ParseError> {
    Url::parse("http://127.0.0.1:9")
}

/// A page session against `api_url` with a recording surface.
///
/// # Errors
///
/// Returns an error if the session's HTTP client cannot be built.
pub fn session<S: KeyValueStore>(
    api_url: &Url,
    storage: S,
) -> Result<Storefront<S, RecordingSurface>, WidgetError> {
    let config = WidgetConfig::for_hostname("localhost")?.with_api_url(api_url.clone());
    Storefront::new(config, storage, RecordingSurface::new())
}
