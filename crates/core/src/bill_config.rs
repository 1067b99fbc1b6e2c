//! Per-period bill configuration and operating-day resolution.
//!
//! A saved [`BillConfig`] freezes the date range, operating-day count and
//! fine of one mess period. It does not freeze the rate or GST, which are
//! always read live from settings. Reopening an old bill after a rate change
//! therefore yields a different subtotal.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::period::{default_range, inclusive_days, validate_date_range, validate_period};

// ---------------------------------------------------------------------------
// BillConfig
// ---------------------------------------------------------------------------

/// The frozen billing window of one (mess, month, year).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillConfig {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub operating_days: i64,
    pub fine_amount: Decimal,
}

impl BillConfig {
    /// Window for an operator-chosen date range: operating days are the
    /// inclusive length of the range.
    pub fn for_range(start_date: NaiveDate, end_date: NaiveDate, fine_amount: Decimal) -> Self {
        Self {
            start_date,
            end_date,
            operating_days: inclusive_days(start_date, end_date),
            fine_amount,
        }
    }

    /// The full calendar month with no fine; what the billing screen shows
    /// before anything has been saved.
    pub fn calendar_default(month: u32, year: i32) -> Result<Self, CoreError> {
        let (start, end) = default_range(month, year)?;
        Ok(Self::for_range(start, end, Decimal::ZERO))
    }
}

/// Validate a configuration before it is persisted.
pub fn validate_bill_config(month: u32, year: i32, config: &BillConfig) -> Result<(), CoreError> {
    validate_period(month, year)?;
    validate_date_range(config.start_date, config.end_date)?;
    if config.operating_days < 0 {
        return Err(CoreError::Validation(format!(
            "operating_days must not be negative, got {}",
            config.operating_days
        )));
    }
    if config.fine_amount < Decimal::ZERO {
        return Err(CoreError::Validation(format!(
            "fine_amount must not be negative, got {}",
            config.fine_amount
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Operating-day source
// ---------------------------------------------------------------------------

/// Where a period's operating-day count came from, in precedence order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "source")]
pub enum OperatingDaysSource {
    /// A saved bill configuration; used verbatim.
    Configured(BillConfig),
    /// The legacy single-value override table.
    LegacyOverride { operating_days: i64 },
    /// No stored value; the real length of the calendar month.
    CalendarDefault { operating_days: i64 },
}

impl OperatingDaysSource {
    pub fn operating_days(&self) -> i64 {
        match self {
            Self::Configured(config) => config.operating_days,
            Self::LegacyOverride { operating_days } | Self::CalendarDefault { operating_days } => {
                *operating_days
            }
        }
    }

    /// Short label for logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Configured(_) => "configured",
            Self::LegacyOverride { .. } => "legacy_override",
            Self::CalendarDefault { .. } => "calendar_default",
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
