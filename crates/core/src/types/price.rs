//! Type-safe price representation using decimal arithmetic.
//!
//! All storefront prices are in Kenyan shillings. Prices are written to cart
//! storage as plain JSON numbers so carts stay readable by any other client
//! sharing the same storage, and are read back from either numbers or numeric
//! strings.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Currency suffix used when displaying prices.
pub const CURRENCY_SUFFIX: &str = "KES";

/// Maximum fraction digits shown when displaying a price.
const DISPLAY_FRACTION_DIGITS: u32 = 3;

/// A price in the storefront currency.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(#[serde(serialize_with = "rust_decimal::serde::float::serialize")] Decimal);

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from a whole number of shillings.
    #[must_use]
    pub fn from_whole(amount: i64) -> Self {
        Self(Decimal::from(amount))
    }

    /// The decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Format for display with thousands separators, e.g. `1,500 KES`.
    #[must_use]
    pub fn display(&self) -> String {
        format!("{} {CURRENCY_SUFFIX}", group_thousands(self.0))
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// Render a decimal with `,` between thousands groups and at most
/// [`DISPLAY_FRACTION_DIGITS`] fraction digits, trailing zeros dropped.
fn group_thousands(amount: Decimal) -> String {
    let rounded = amount.round_dp(DISPLAY_FRACTION_DIGITS).normalize();
    let text = rounded.abs().to_string();
    let (whole, fraction) = text.split_once('.').map_or((text.as_str(), None), |(w, f)| (w, Some(f)));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3 + 1);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        grouped.push('-');
    }
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }
    grouped
}
