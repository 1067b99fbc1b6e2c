//! Calendar helpers for billing periods.
//!
//! A billing period is a (month, year) pair. Operating days default to the
//! real length of the calendar month; a curated period may instead cover an
//! explicit inclusive date range.

use chrono::{Datelike, NaiveDate};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Earliest year accepted for a billing period.
pub const MIN_YEAR: i32 = 1900;
/// Latest year accepted for a billing period.
pub const MAX_YEAR: i32 = 9999;

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate that `month` is 1-12 and `year` lies in `[MIN_YEAR, MAX_YEAR]`.
pub fn validate_period(month: u32, year: i32) -> Result<(), CoreError> {
    if !(1..=12).contains(&month) {
        return Err(CoreError::Validation(format!(
            "month must be between 1 and 12, got {month}"
        )));
    }
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(CoreError::Validation(format!(
            "year must be between {MIN_YEAR} and {MAX_YEAR}, got {year}"
        )));
    }
    Ok(())
}

/// Reject a range whose start falls after its end.
pub fn validate_date_range(start: NaiveDate, end: NaiveDate) -> Result<(), CoreError> {
    if start > end {
        return Err(CoreError::Validation(format!(
            "start date {start} must not be after end date {end}"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Calendar arithmetic
// ---------------------------------------------------------------------------

/// First day of the given month.
pub fn first_day(month: u32, year: i32) -> Result<NaiveDate, CoreError> {
    validate_period(month, year)?;
    NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| CoreError::Validation(format!("invalid period {year}-{month:02}")))
}

/// Number of days in the calendar month, leap years included.
pub fn days_in_month(month: u32, year: i32) -> Result<i64, CoreError> {
    let start = first_day(month, year)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(|| CoreError::Internal(format!("no month after {year}-{month:02}")))?;
    Ok((next - start).num_days())
}

/// The full-month window `[first day, last day]` used when a period has no
/// saved configuration.
pub fn default_range(month: u32, year: i32) -> Result<(NaiveDate, NaiveDate), CoreError> {
    let start = first_day(month, year)?;
    let len = days_in_month(month, year)?;
    let end = start
        .with_day(len as u32)
        .ok_or_else(|| CoreError::Internal(format!("bad month length {len}")))?;
    Ok((start, end))
}

/// Number of days covered by an inclusive range. Zero when `end < start`.
pub fn inclusive_days(start: NaiveDate, end: NaiveDate) -> i64 {
    ((end - start).num_days() + 1).max(0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn february_follows_leap_years() {
        assert_eq!(days_in_month(2, 2024).unwrap(), 29);
        assert_eq!(days_in_month(2, 2023).unwrap(), 28);
        assert_eq!(days_in_month(2, 2000).unwrap(), 29);
        assert_eq!(days_in_month(2, 1900).unwrap(), 28);
    }

    #[test]
    fn month_lengths() {
        assert_eq!(days_in_month(1, 2024).unwrap(), 31);
        assert_eq!(days_in_month(4, 2024).unwrap(), 30);
        assert_eq!(days_in_month(12, 2024).unwrap(), 31);
    }

    #[test]
    fn rejects_out_of_range_month() {
        assert_matches!(validate_period(0, 2024), Err(CoreError::Validation(_)));
        assert_matches!(validate_period(13, 2024), Err(CoreError::Validation(_)));
        assert_matches!(days_in_month(13, 2024), Err(CoreError::Validation(_)));
    }

    #[test]
    fn rejects_unreasonable_year() {
        assert_matches!(validate_period(1, -4), Err(CoreError::Validation(_)));
        assert_matches!(validate_period(1, 0), Err(CoreError::Validation(_)));
        assert!(validate_period(1, MIN_YEAR).is_ok());
        assert!(validate_period(12, MAX_YEAR).is_ok());
    }

    #[test]
    fn default_range_spans_the_month() {
        let (start, end) = default_range(2, 2024).unwrap();
        assert_eq!(start, date(2024, 2, 1));
        assert_eq!(end, date(2024, 2, 29));
        assert_eq!(inclusive_days(start, end), 29);
    }

    #[test]
    fn inclusive_days_counts_both_ends() {
        assert_eq!(inclusive_days(date(2024, 3, 5), date(2024, 3, 5)), 1);
        assert_eq!(inclusive_days(date(2024, 3, 5), date(2024, 3, 24)), 20);
        assert_eq!(inclusive_days(date(2024, 3, 5), date(2024, 3, 4)), 0);
    }

    #[test]
    fn date_range_order_is_enforced() {
        assert!(validate_date_range(date(2024, 3, 1), date(2024, 3, 1)).is_ok());
        assert_matches!(
            validate_date_range(date(2024, 3, 2), date(2024, 3, 1)),
            Err(CoreError::Validation(_))
        );
    }
}
