//! Mess bill calculation.
//!
//! Converts attendance aggregates and live rates into an itemized bill. The
//! arithmetic runs on [`Decimal`] at full precision; rounding to paise only
//! happens through [`BillBreakdown::rounded`] when a figure is displayed, and
//! when a total is condensed into [`MessStats`].

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::settings::{validate_rates, RateSettings};

/// Decimal places used when presenting money.
pub const MONEY_DP: u32 = 2;

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// Everything the calculator needs for one bill.
///
/// Externally supplied inputs go through [`validate_bill_inputs`] first.
/// [`compute_bill`] itself only handles absence exceeding the possible
/// student-days and arithmetic overflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillInputs {
    pub operating_days: i64,
    pub active_students: i64,
    pub total_absent_days: i64,
    pub per_day_rate: Decimal,
    pub gst_percent: Decimal,
    #[serde(default)]
    pub fine_amount: Decimal,
}

// ---------------------------------------------------------------------------
// Breakdown
// ---------------------------------------------------------------------------

/// Itemized result of [`compute_bill`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillBreakdown {
    pub operating_days: i64,
    pub active_students: i64,
    pub total_possible_days: i64,
    pub total_absent_days: i64,
    pub net_mess_days: i64,
    pub per_day_rate: Decimal,
    pub gst_percent: Decimal,
    pub subtotal: Decimal,
    pub gst_amount: Decimal,
    pub fine_amount: Decimal,
    pub total: Decimal,
}

impl BillBreakdown {
    /// Copy with every money field rounded to [`MONEY_DP`] places,
    /// midpoints away from zero.
    pub fn rounded(&self) -> Self {
        Self {
            per_day_rate: round_money(self.per_day_rate),
            subtotal: round_money(self.subtotal),
            gst_amount: round_money(self.gst_amount),
            fine_amount: round_money(self.fine_amount),
            total: round_money(self.total),
            ..self.clone()
        }
    }
}

/// Round a money value for display. The result always carries exactly
/// [`MONEY_DP`] places, so `120` renders as `120.00`.
pub fn round_money(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(MONEY_DP, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(MONEY_DP);
    rounded
}

// ---------------------------------------------------------------------------
// Calculation
// ---------------------------------------------------------------------------

/// Reject inputs no real bill can have: negative counts, a non-positive
/// rate, negative GST or a negative fine.
pub fn validate_bill_inputs(inputs: &BillInputs) -> Result<(), CoreError> {
    if inputs.operating_days < 0 || inputs.active_students < 0 || inputs.total_absent_days < 0 {
        return Err(CoreError::Validation(
            "day and student counts must not be negative".to_string(),
        ));
    }
    validate_rates(&RateSettings {
        per_day_rate: inputs.per_day_rate,
        gst_percent: inputs.gst_percent,
    })?;
    if inputs.fine_amount < Decimal::ZERO {
        return Err(CoreError::Validation(format!(
            "fine_amount must not be negative, got {}",
            inputs.fine_amount
        )));
    }
    Ok(())
}

fn out_of_range(figure: &str) -> CoreError {
    CoreError::Validation(format!("{figure} is too large to compute"))
}

/// Compute an itemized bill. Pure; performs no I/O.
///
/// ```text
/// possible = operating_days * active_students
/// net      = max(0, possible - absent)
/// subtotal = net * rate
/// gst      = subtotal * gst_percent / 100
/// total    = subtotal + gst + fine
/// ```
///
/// Every step is checked; a figure that does not fit is a validation
/// error rather than a truncated or panicking result.
pub fn compute_bill(inputs: &BillInputs) -> Result<BillBreakdown, CoreError> {
    let total_possible_days = inputs
        .operating_days
        .checked_mul(inputs.active_students)
        .ok_or_else(|| out_of_range("possible mess days"))?;
    let net_mess_days = total_possible_days
        .checked_sub(inputs.total_absent_days)
        .ok_or_else(|| out_of_range("net mess days"))?
        .max(0);

    let subtotal = Decimal::from(net_mess_days)
        .checked_mul(inputs.per_day_rate)
        .ok_or_else(|| out_of_range("subtotal"))?;
    let gst_amount = subtotal
        .checked_mul(inputs.gst_percent)
        .and_then(|taxed| taxed.checked_div(Decimal::ONE_HUNDRED))
        .ok_or_else(|| out_of_range("GST amount"))?;
    let total = subtotal
        .checked_add(gst_amount)
        .and_then(|sum| sum.checked_add(inputs.fine_amount))
        .ok_or_else(|| out_of_range("total"))?;

    Ok(BillBreakdown {
        operating_days: inputs.operating_days,
        active_students: inputs.active_students,
        total_possible_days,
        total_absent_days: inputs.total_absent_days,
        net_mess_days,
        per_day_rate: inputs.per_day_rate,
        gst_percent: inputs.gst_percent,
        subtotal,
        gst_amount,
        fine_amount: inputs.fine_amount,
        total,
    })
}

// ---------------------------------------------------------------------------
// Aggregate stats
// ---------------------------------------------------------------------------

/// The aggregate figures kept in the stats cache for one mess period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessStats {
    pub operating_days: i64,
    pub active_students: i64,
    pub total_absent_days: i64,
    pub net_mess_days: i64,
    /// Rounded to [`MONEY_DP`] places.
    pub total: Decimal,
}

impl MessStats {
    /// Stats reported when a computation could not be completed.
    pub fn zero() -> Self {
        Self {
            operating_days: 0,
            active_students: 0,
            total_absent_days: 0,
            net_mess_days: 0,
            total: Decimal::ZERO,
        }
    }
}

impl From<&BillBreakdown> for MessStats {
    fn from(bill: &BillBreakdown) -> Self {
        Self {
            operating_days: bill.operating_days,
            active_students: bill.active_students,
            total_absent_days: bill.total_absent_days,
            net_mess_days: bill.net_mess_days,
            total: round_money(bill.total),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
