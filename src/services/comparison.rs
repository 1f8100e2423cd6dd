//! Tomorrow-vs-today temperature comparison.
//!
//! Today's observed extremes are only meaningful late in the day, so the
//! comparison is gated by a cutoff hour. Before the cutoff, or when no
//! observation could be obtained, both deltas are unavailable and the
//! report carries the forecast alone.

use rust_decimal::Decimal;

use crate::helpers::format_signed_delta;
use crate::services::observation::ActualObservation;

/// Signed forecast-minus-actual deltas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonResult {
    Available { max_delta: Decimal, min_delta: Decimal },
    Unavailable,
}

impl ComparisonResult {
    /// Rendered (max, min) deltas, e.g. `("+1.2℃", "±0℃")`.
    pub fn rendered(&self) -> Option<(String, String)> {
        match self {
            ComparisonResult::Available {
                max_delta,
                min_delta,
            } => Some((format_signed_delta(*max_delta), format_signed_delta(*min_delta))),
            ComparisonResult::Unavailable => None,
        }
    }
}

/// Whether the comparison runs at `hour` (local, 0-23).
pub fn comparison_enabled(hour: u32, cutoff_hour: u32) -> bool {
    hour >= cutoff_hour
}

/// Compare forecast extremes against today's observation.
pub fn compare(
    forecast_max: Decimal,
    forecast_min: Decimal,
    actual: Option<&ActualObservation>,
    gate: bool,
) -> ComparisonResult {
    match actual {
        Some(actual) if gate => ComparisonResult::Available {
            max_delta: forecast_max - actual.max_temp,
            min_delta: forecast_min - actual.min_temp,
        },
        _ => ComparisonResult::Unavailable,
    }
}
