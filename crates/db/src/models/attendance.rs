//! Student attendance model.

use messbill_core::roster::AttendanceRow;
use messbill_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `student_attendance` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct StudentAttendance {
    pub id: DbId,
    pub student_id: DbId,
    pub month: i64,
    pub year: i64,
    pub total_days: i64,
    pub mess_days: i64,
    pub absent_days: i64,
    pub updated_at: Timestamp,
}

/// DTO for recording one student's attendance for a month.
///
/// `mess_days` is derived as `operating_days - absent_days` on write, with
/// absent days held to `0..=operating_days`.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordAttendance {
    pub student_id: DbId,
    pub month: u32,
    pub year: i32,
    pub operating_days: i64,
    pub absent_days: i64,
}

impl RecordAttendance {
    /// Absent days as stored.
    pub fn bounded_absent_days(&self) -> i64 {
        self.absent_days.clamp(0, self.operating_days.max(0))
    }

    /// Mess days as stored; never negative.
    pub fn mess_days(&self) -> i64 {
        self.operating_days.max(0) - self.bounded_absent_days()
    }
}

/// A roster row joined with the student's attendance for one period.
#[derive(Debug, Clone, FromRow)]
pub struct AttendanceListingRow {
    pub student_id: DbId,
    pub entry_number: String,
    pub name: String,
    pub room_number: Option<String>,
    pub mess_days: i64,
    pub absent_days: i64,
}

impl From<AttendanceListingRow> for AttendanceRow {
    fn from(row: AttendanceListingRow) -> Self {
        AttendanceRow {
            student_id: row.student_id,
            entry_number: row.entry_number,
            name: row.name,
            room_number: row.room_number,
            mess_days: row.mess_days,
            absent_days: row.absent_days,
        }
    }
}
