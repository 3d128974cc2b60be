//! Custom Askama template filters.
//!
//! Templates are rendered with autoescaping off; product text goes through
//! [`escape_html`] explicitly.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Replace `&`, `<` and `>` with their entities.
///
/// Quotes are left alone, so the output is safe in element content but not
/// inside quoted attribute values that may contain `"`.
#[must_use]
pub fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Escapes product-supplied text.
///
/// Usage in templates: `{{ card.name|escape_html }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn escape_html(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(escape_text(&value.to_string()))
}
