//! Purchase quantities.
//!
//! Quantities arrive as free text from number inputs, so parsing follows the
//! lenient leading-integer rules browsers apply to such inputs: leading
//! whitespace is skipped, an optional sign and the leading run of digits are
//! read, and anything after the digits is ignored (`"2.5"` reads as 2).

use std::num::NonZeroU32;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from parsing a [`Quantity`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuantityError {
    /// Input was not a positive integer.
    #[error("invalid quantity: {0:?}")]
    Invalid(String),
}

/// A positive purchase quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(NonZeroU32);

impl Quantity {
    /// A single unit.
    pub const ONE: Self = Self(NonZeroU32::MIN);

    /// Create a quantity, returning `None` for zero.
    #[must_use]
    pub const fn new(value: u32) -> Option<Self> {
        match NonZeroU32::new(value) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }

    /// Get the underlying value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// Parse user input into a quantity.
    ///
    /// # Errors
    ///
    /// Returns [`QuantityError::Invalid`] when the input has no leading
    /// integer, or the integer is zero, negative or out of range.
    pub fn parse(input: &str) -> Result<Self, QuantityError> {
        parse_leading_int(input)
            .and_then(|n| u32::try_from(n).ok())
            .and_then(Self::new)
            .ok_or_else(|| QuantityError::Invalid(input.to_string()))
    }
}

impl FromStr for Quantity {
    type Err = QuantityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Read the leading integer of `input`.
///
/// Returns `None` when no digits follow the optional sign. Values beyond the
/// `i64` range saturate.
#[must_use]
pub fn parse_leading_int(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, trimmed.get(1..)?),
        Some(b'+') => (false, trimmed.get(1..)?),
        _ => (false, trimmed),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }

    let magnitude = rest
        .bytes()
        .take(digits_len)
        .fold(0_i64, |acc, b| acc.saturating_mul(10).saturating_add(i64::from(b - b'0')));

    Some(if negative { -magnitude } else { magnitude })
}
