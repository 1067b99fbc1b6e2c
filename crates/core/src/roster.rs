//! Roster and per-student attendance helpers.

use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// A billing unit. One mess may feed several hostels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mess {
    pub id: DbId,
    pub name: String,
    pub code: String,
}

/// Student-count summary for a set of hostels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentCounts {
    /// Every student on the roster, active or not.
    pub total: i64,
    /// Students still billed.
    pub active: i64,
}

/// One active student's attendance for a period.
///
/// `mess_days` is the stored value when a record exists, otherwise the
/// period's operating days. It is not re-derived from `absent_days`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRow {
    pub student_id: DbId,
    pub entry_number: String,
    pub name: String,
    pub room_number: Option<String>,
    pub mess_days: i64,
    pub absent_days: i64,
}

/// Which students a printed attendance report includes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportFilter {
    #[default]
    All,
    /// At least one absent day.
    Absent,
    /// No absent days.
    Present,
}

impl ReportFilter {
    pub fn matches(self, row: &AttendanceRow) -> bool {
        match self {
            Self::All => true,
            Self::Absent => row.absent_days > 0,
            Self::Present => row.absent_days == 0,
        }
    }
}

/// Admission year encoded in the first two digits of an entry number
/// (`"23BCS079"` -> 2023).
pub fn admission_year(entry_number: &str) -> Option<i32> {
    let prefix = entry_number.get(..2)?;
    if !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    prefix.parse::<i32>().ok().map(|yy| 2000 + yy)
}

/// Distinct admission years present in `rows`, newest first.
pub fn available_batches(rows: &[AttendanceRow]) -> Vec<i32> {
    let mut years: Vec<i32> = rows
        .iter()
        .filter_map(|r| admission_year(&r.entry_number))
        .collect();
    years.sort_unstable_by(|a, b| b.cmp(a));
    years.dedup();
    years
}

/// Apply a report filter and an optional batch restriction.
pub fn filter_rows(
    rows: Vec<AttendanceRow>,
    filter: ReportFilter,
    batch: Option<i32>,
) -> Vec<AttendanceRow> {
    rows.into_iter()
        .filter(|r| filter.matches(r))
        .filter(|r| match batch {
            Some(year) => admission_year(&r.entry_number) == Some(year),
            None => true,
        })
        .collect()
}
