//! Global rate settings.
//!
//! Settings are a flat `key -> text` mapping with no history. Whatever is
//! stored when a bill is computed is what the bill uses, including when an
//! older, unconfigured period is recomputed.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Keys and defaults
// ---------------------------------------------------------------------------

/// Settings key for the per-student, per-day charge.
pub const KEY_PER_DAY_RATE: &str = "per_day_rate";
/// Settings key for the GST percentage.
pub const KEY_GST_PERCENT: &str = "gst_percent";

/// Rate used when the settings table has no usable value.
pub const DEFAULT_PER_DAY_RATE: Decimal = dec!(120);
/// GST used when the settings table has no usable value.
pub const DEFAULT_GST_PERCENT: Decimal = dec!(5);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// The two live rates read by every bill computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateSettings {
    pub per_day_rate: Decimal,
    pub gst_percent: Decimal,
}

impl Default for RateSettings {
    fn default() -> Self {
        Self {
            per_day_rate: DEFAULT_PER_DAY_RATE,
            gst_percent: DEFAULT_GST_PERCENT,
        }
    }
}

// ---------------------------------------------------------------------------
// Parsing and validation
// ---------------------------------------------------------------------------

/// Parse a stored setting value, falling back to `default` when the value
/// is missing or not a number.
pub fn parse_setting(key: &str, raw: Option<&str>, default: Decimal) -> Decimal {
    match raw {
        Some(text) => text.trim().parse::<Decimal>().unwrap_or_else(|_| {
            tracing::warn!(key, value = text, "Unparsable setting, using default");
            default
        }),
        None => default,
    }
}

/// Validate rates before they are written: the rate must be positive and
/// GST must not be negative.
pub fn validate_rates(rates: &RateSettings) -> Result<(), CoreError> {
    if rates.per_day_rate <= Decimal::ZERO {
        return Err(CoreError::Validation(format!(
            "per_day_rate must be positive, got {}",
            rates.per_day_rate
        )));
    }
    if rates.gst_percent < Decimal::ZERO {
        return Err(CoreError::Validation(format!(
            "gst_percent must not be negative, got {}",
            rates.gst_percent
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn parses_stored_text() {
        assert_eq!(
            parse_setting(KEY_PER_DAY_RATE, Some(" 132.5 "), DEFAULT_PER_DAY_RATE),
            dec!(132.5)
        );
    }

    #[test]
    fn falls_back_on_missing_or_garbage() {
        assert_eq!(
            parse_setting(KEY_GST_PERCENT, None, DEFAULT_GST_PERCENT),
            dec!(5)
        );
        assert_eq!(
            parse_setting(KEY_GST_PERCENT, Some("five"), DEFAULT_GST_PERCENT),
            dec!(5)
        );
    }

    #[test]
    fn zero_gst_is_allowed() {
        let rates = RateSettings {
            per_day_rate: dec!(1),
            gst_percent: Decimal::ZERO,
        };
        assert!(validate_rates(&rates).is_ok());
    }

    #[test]
    fn rejects_non_positive_rate_and_negative_gst() {
        let zero_rate = RateSettings {
            per_day_rate: Decimal::ZERO,
            gst_percent: dec!(5),
        };
        assert_matches!(validate_rates(&zero_rate), Err(CoreError::Validation(_)));

        let negative_gst = RateSettings {
            per_day_rate: dec!(120),
            gst_percent: dec!(-1),
        };
        assert_matches!(validate_rates(&negative_gst), Err(CoreError::Validation(_)));
    }
}
