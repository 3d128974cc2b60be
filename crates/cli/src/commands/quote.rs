//! Quote and contact form submission.
//!
//! # Usage
//!
//! ```bash
//! tindi quote -f name="Jane" -f email=jane@example.com -f phone=0700000000 \
//!     -f service=CCTV -f message="Four cameras"
//! tindi quote --contact -f email=jane@example.com -f message="Call me"
//! ```

use std::io::Write;

use tindi_storefront::quote::QuoteForm;
use tindi_storefront::storage::KeyValueStore;

use super::{CliError, Session};

/// Parse a `key=value` form field.
///
/// # Errors
///
/// Returns a message if there is no `=` or the key is empty.
pub fn parse_field(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got {raw:?}"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty field name in {raw:?}"));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Submit the fields as a quote request, or as the contact form.
///
/// # Errors
///
/// Returns `CliError::Failed` unless the request was accepted.
pub async fn submit<S: KeyValueStore, W: Write>(
    session: &mut Session<S, W>,
    fields: Vec<(String, String)>,
    contact: bool,
) -> Result<(), CliError> {
    let form: QuoteForm = fields.into_iter().collect();

    let outcome = if contact {
        session.submit_contact(&form).await
    } else {
        session.open_quote_modal();
        session.submit_quote(&form).await
    };

    if outcome.is_accepted() {
        Ok(())
    } else {
        Err(CliError::Failed("quote request not accepted"))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_field() {
        assert_eq!(
            parse_field("message=a=b").unwrap(),
            ("message".to_string(), "a=b".to_string())
        );
        assert_eq!(
            parse_field(" name =Jane").unwrap(),
            ("name".to_string(), "Jane".to_string())
        );
        assert_eq!(
            parse_field("phone=").unwrap(),
            ("phone".to_string(), String::new())
        );
    }

    #[test]
    fn test_parse_field_rejects_malformed() {
        assert!(parse_field("name").is_err());
        assert!(parse_field("=value").is_err());
    }
}
