//! Shared helpers for temperature values.
//!
//! Temperatures travel as strings in both upstream sources ("12", "8.5",
//! "13.2)") and are held as `Decimal` so deltas render without binary
//! floating-point noise.

use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

use crate::errors::AppError;

/// Parse a temperature token into a Decimal.
///
/// `what` names the value in the error message.
pub(crate) fn parse_decimal(token: &str, what: &str) -> Result<Decimal, AppError> {
    let trimmed = token.trim();
    Decimal::from_str(trimmed)
        .map_err(|e| AppError::DataFormat(format!("{} '{}' is not a number: {}", what, trimmed, e)))
}

/// Round to one decimal place, halves away from zero (0.05 → 0.1).
pub(crate) fn round_1dp(v: Decimal) -> Decimal {
    v.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

/// Render a signed delta with an explicit sign and one decimal place.
///
/// `+1.2℃`, `-0.5℃`, and `±0℃` when the rounded value is zero.
pub(crate) fn format_signed_delta(delta: Decimal) -> String {
    let rounded = round_1dp(delta);
    if rounded.is_zero() {
        "±0℃".to_string()
    } else if rounded.is_sign_positive() {
        format!("+{:.1}℃", rounded)
    } else {
        format!("{:.1}℃", rounded)
    }
}
