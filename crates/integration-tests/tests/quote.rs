//! Integration tests for quote and contact form submission.

use axum::http::StatusCode;
use serde_json::json;

use tindi_integration_tests::{MockApi, MockResponse, session, unreachable_url};
use tindi_storefront::quote::{
    ACCEPTED_MESSAGE, BUSY_LABEL, CONNECTION_FAILED_MESSAGE, QuoteForm, QuoteOutcome, SUBMIT_LABEL,
};
use tindi_storefront::storage::MemoryStore;
use tindi_storefront::surface::{Modal, NoticeKind, RecordingSurface, SubmitControl};

fn quote_form() -> QuoteForm {
    [
        ("name", "Wanjiku Kamau"),
        ("email", "wanjiku@example.co.ke"),
        ("phone", "+254700000000"),
        ("service", "CCTV Installation"),
        ("message", "Four cameras for a shop in Westlands"),
    ]
    .into_iter()
    .collect()
}

async fn quote_api(response: MockResponse) -> MockApi {
    MockApi::start(
        MockResponse::json(&json!({ "success": true, "data": [] })),
        response,
    )
    .await
    .expect("Failed to start mock API")
}

/// The control went busy once and came back as it was.
fn assert_control_restored(surface: &RecordingSurface) {
    assert_eq!(
        surface.submit_history,
        vec![
            SubmitControl {
                label: BUSY_LABEL.to_string(),
                disabled: true,
            },
            SubmitControl::enabled(SUBMIT_LABEL),
        ]
    );
    assert_eq!(surface.submit, SubmitControl::enabled(SUBMIT_LABEL));
}

// ============================================================================
// Quote form
// ============================================================================

#[tokio::test]
async fn test_accepted_quote_resets_and_closes() {
    let api = quote_api(MockResponse::json(&json!({ "success": true }))).await;
    let mut store = session(api.url(), MemoryStore::new()).expect("Failed to open session");
    store.open_quote_modal();

    let outcome = store.submit_quote(&quote_form()).await;

    assert_eq!(outcome, QuoteOutcome::Accepted);
    assert_eq!(
        api.quotes(),
        vec![json!({
            "name": "Wanjiku Kamau",
            "email": "wanjiku@example.co.ke",
            "phone": "+254700000000",
            "service": "CCTV Installation",
            "message": "Four cameras for a shop in Westlands"
        })]
    );

    let surface = store.surface();
    assert_eq!(surface.last_message(), Some(ACCEPTED_MESSAGE));
    assert_eq!(surface.form_resets, 1);
    assert!(!surface.is_open(Modal::Quote));
    assert!(!store.is_open(Modal::Quote));
    assert_control_restored(surface);
}

#[tokio::test]
async fn test_rejected_quote_shows_server_error() {
    let api = quote_api(MockResponse::json(
        &json!({ "success": false, "error": "Invalid phone number" }),
    ))
    .await;
    let mut store = session(api.url(), MemoryStore::new()).expect("Failed to open session");
    store.open_quote_modal();

    let outcome = store.submit_quote(&quote_form()).await;

    assert_eq!(
        outcome,
        QuoteOutcome::Rejected("Invalid phone number".to_string())
    );
    let surface = store.surface();
    assert_eq!(surface.last_message(), Some("Error: Invalid phone number"));
    assert_eq!(surface.form_resets, 0);
    assert!(store.is_open(Modal::Quote));
    assert_control_restored(surface);
}

#[tokio::test]
async fn test_rejected_quote_without_error_text() {
    let api = quote_api(MockResponse::json(&json!({ "success": false }))).await;
    let mut store = session(api.url(), MemoryStore::new()).expect("Failed to open session");

    store.submit_quote(&quote_form()).await;

    assert_eq!(
        store.surface().last_message(),
        Some("Error: Unknown error occurred")
    );
}

#[tokio::test]
async fn test_error_status_envelope_is_explicit_failure() {
    let api = quote_api(
        MockResponse::json(&json!({ "success": false, "error": "Missing fields" }))
            .with_status(StatusCode::BAD_REQUEST),
    )
    .await;
    let mut store = session(api.url(), MemoryStore::new()).expect("Failed to open session");

    let outcome = store.submit_quote(&quote_form()).await;

    assert_eq!(outcome, QuoteOutcome::Rejected("Missing fields".to_string()));
}

#[tokio::test]
async fn test_unreadable_response_is_connection_failure() {
    let api = quote_api(MockResponse::raw(
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal Server Error",
    ))
    .await;
    let mut store = session(api.url(), MemoryStore::new()).expect("Failed to open session");

    let outcome = store.submit_quote(&quote_form()).await;

    assert_eq!(outcome, QuoteOutcome::ConnectionFailed);
    assert_eq!(api.quotes().len(), 1);
}

#[tokio::test]
async fn test_unreachable_api_restores_control() {
    let url = unreachable_url().expect("valid URL");
    let mut store = session(&url, MemoryStore::new()).expect("Failed to open session");
    store.open_quote_modal();

    let outcome = store.submit_quote(&quote_form()).await;

    assert_eq!(outcome, QuoteOutcome::ConnectionFailed);
    let surface = store.surface();
    let notice = surface.notices.last().expect("notified");
    assert_eq!(notice.kind, NoticeKind::Warning);
    assert_eq!(notice.message, CONNECTION_FAILED_MESSAGE);
    assert_eq!(surface.form_resets, 0);
    assert!(store.is_open(Modal::Quote));
    assert_control_restored(surface);
}

#[tokio::test]
async fn test_incomplete_quote_is_not_sent() {
    let api = quote_api(MockResponse::json(&json!({ "success": true }))).await;
    let mut store = session(api.url(), MemoryStore::new()).expect("Failed to open session");

    let mut form = quote_form();
    form.insert("message", "");
    let outcome = store.submit_quote(&form).await;

    assert!(matches!(outcome, QuoteOutcome::Invalid(_)));
    assert!(api.quotes().is_empty());
    assert!(store.surface().submit_history.is_empty());
}

// ============================================================================
// Contact form
// ============================================================================

#[tokio::test]
async fn test_contact_form_reuses_quote_endpoint() {
    let api = quote_api(MockResponse::json(&json!({ "success": true }))).await;
    let mut store = session(api.url(), MemoryStore::new()).expect("Failed to open session");

    let form: QuoteForm = [("email", "otieno@example.com"), ("message", "Call me back")]
        .into_iter()
        .collect();
    let outcome = store.submit_contact(&form).await;

    assert!(outcome.is_accepted());
    assert_eq!(
        api.quotes(),
        vec![json!({ "email": "otieno@example.com", "message": "Call me back" })]
    );
    assert_eq!(store.surface().form_resets, 1);
}
