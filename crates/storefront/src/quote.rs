//! Quote request form handling.
//!
//! A submitted form is flattened to a field-name → value map and posted to
//! the API. While the request is in flight the submit control is disabled
//! and shows [`BUSY_LABEL`]; [`SubmitGuard`] restores it when dropped, so it
//! comes back on success, explicit failure and transport failure alike.

use std::collections::BTreeMap;

use thiserror::Error;

use tindi_core::Email;

use crate::api::{ApiError, QuoteRequest, QuoteResponse};
use crate::surface::{Notice, SubmitControl, Surface};

/// Idle label of the quote modal's submit control.
pub const SUBMIT_LABEL: &str = "Request Quote";

/// Label shown while a submission is in flight.
pub const BUSY_LABEL: &str = "Sending...";

pub const ACCEPTED_MESSAGE: &str =
    "Request Received!\n\nWe have received your quote request and will contact you shortly.";

pub const CONNECTION_FAILED_MESSAGE: &str =
    "Connection Failed. Please ensure the backend is running.";

const UNKNOWN_ERROR: &str = "Unknown error occurred";

/// Fields the quote modal marks as required.
pub const QUOTE_REQUIRED_FIELDS: &[&str] = &["name", "email", "phone", "message"];

/// Client-side form validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuoteFormError {
    #[error("Please fill in the {0} field.")]
    MissingField(String),
    #[error("Please enter a valid email address.")]
    InvalidEmail,
}

/// A submitted form's fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteForm {
    fields: BTreeMap<String, String>,
}

impl QuoteForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, replacing any previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    #[must_use]
    pub const fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }

    /// Check that `required` fields are non-blank and any `email` field is
    /// plausible.
    ///
    /// # Errors
    ///
    /// Returns the first failing check.
    pub fn validate(&self, required: &[&str]) -> Result<(), QuoteFormError> {
        for field in required {
            if self.get(field).is_none_or(|v| v.trim().is_empty()) {
                return Err(QuoteFormError::MissingField((*field).to_string()));
            }
        }
        if let Some(email) = self.get("email")
            && !email.trim().is_empty()
            && Email::parse(email).is_err()
        {
            return Err(QuoteFormError::InvalidEmail);
        }
        Ok(())
    }

    /// The request body for this form.
    #[must_use]
    pub fn to_request(&self) -> QuoteRequest {
        QuoteRequest(self.fields.clone())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QuoteForm {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Result of a quote submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuoteOutcome {
    /// Server accepted the request.
    Accepted,
    /// Form failed client-side validation; nothing was sent.
    Invalid(QuoteFormError),
    /// Server answered with `success: false`.
    Rejected(String),
    /// Request failed or the response was unreadable.
    ConnectionFailed,
}

impl QuoteOutcome {
    /// Interpret an API response.
    #[must_use]
    pub fn from_response(result: Result<QuoteResponse, ApiError>) -> Self {
        match result {
            Ok(response) if response.success => Self::Accepted,
            Ok(response) => Self::Rejected(
                response
                    .error
                    .filter(|e| !e.is_empty())
                    .unwrap_or_else(|| UNKNOWN_ERROR.to_string()),
            ),
            Err(_) => Self::ConnectionFailed,
        }
    }

    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }

    /// Customer-facing message for this outcome.
    #[must_use]
    pub fn notice(&self) -> Notice {
        match self {
            Self::Accepted => Notice::success(ACCEPTED_MESSAGE),
            Self::Invalid(e) => Notice::error(e.to_string()),
            Self::Rejected(error) => Notice::error(format!("Error: {error}")),
            Self::ConnectionFailed => Notice::warning(CONNECTION_FAILED_MESSAGE),
        }
    }
}

/// Holds a surface's submit control in the busy state until dropped.
pub struct SubmitGuard<'a, V: Surface + ?Sized> {
    surface: &'a mut V,
    original: SubmitControl,
}

impl<'a, V: Surface + ?Sized> SubmitGuard<'a, V> {
    /// Disable the submit control and show [`BUSY_LABEL`].
    pub fn engage(surface: &'a mut V) -> Self {
        let original = surface.submit_control();
        surface.set_submit_control(&SubmitControl {
            label: BUSY_LABEL.to_string(),
            disabled: true,
        });
        Self { surface, original }
    }

    /// The surface, for updates made while the control is busy.
    pub fn surface(&mut self) -> &mut V {
        self.surface
    }
}

impl<V: Surface + ?Sized> Drop for SubmitGuard<'_, V> {
    fn drop(&mut self) {
        self.surface.set_submit_control(&self.original);
    }
}
