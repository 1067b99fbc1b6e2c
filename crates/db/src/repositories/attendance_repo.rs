//! Repository for the `student_attendance` table.

use messbill_core::types::DbId;
use sqlx::SqlitePool;

use crate::models::attendance::{AttendanceListingRow, RecordAttendance, StudentAttendance};
use crate::repositories::json_ids;

/// Column list for student_attendance queries.
const COLUMNS: &str =
    "id, student_id, month, year, total_days, mess_days, absent_days, updated_at";

pub struct AttendanceRepo;

impl AttendanceRepo {
    /// Insert or replace one student's attendance for a month.
    pub async fn upsert(
        pool: &SqlitePool,
        input: &RecordAttendance,
    ) -> Result<StudentAttendance, sqlx::Error> {
        let query = format!(
            "INSERT INTO student_attendance
                (student_id, month, year, total_days, mess_days, absent_days)
             VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT (student_id, month, year) DO UPDATE SET
                total_days = excluded.total_days,
                mess_days = excluded.mess_days,
                absent_days = excluded.absent_days,
                updated_at = CURRENT_TIMESTAMP
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StudentAttendance>(&query)
            .bind(input.student_id)
            .bind(input.month)
            .bind(input.year)
            .bind(input.operating_days)
            .bind(input.mess_days())
            .bind(input.bounded_absent_days())
            .fetch_one(pool)
            .await
    }

    pub async fn find(
        pool: &SqlitePool,
        student_id: DbId,
        month: u32,
        year: i32,
    ) -> Result<Option<StudentAttendance>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM student_attendance
             WHERE student_id = $1 AND month = $2 AND year = $3"
        );
        sqlx::query_as::<_, StudentAttendance>(&query)
            .bind(student_id)
            .bind(month)
            .bind(year)
            .fetch_optional(pool)
            .await
    }

    /// Absent days summed over the active students of `hostel_ids`.
    /// Students without a record contribute zero.
    pub async fn total_absent_days(
        pool: &SqlitePool,
        hostel_ids: &[DbId],
        month: u32,
        year: i32,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COALESCE(SUM(a.absent_days), 0) \
             FROM students s \
             LEFT JOIN student_attendance a \
               ON a.student_id = s.id AND a.month = $2 AND a.year = $3 \
             WHERE s.is_active = 1 \
               AND s.hostel_id IN (SELECT value FROM json_each($1))",
        )
        .bind(json_ids(hostel_ids))
        .bind(month)
        .bind(year)
        .fetch_one(pool)
        .await
    }

    /// One row per active student of `hostel_ids`, ordered by entry number.
    /// Missing records read as `default_mess_days` mess days, zero absent.
    pub async fn listing(
        pool: &SqlitePool,
        hostel_ids: &[DbId],
        month: u32,
        year: i32,
        default_mess_days: i64,
    ) -> Result<Vec<AttendanceListingRow>, sqlx::Error> {
        sqlx::query_as::<_, AttendanceListingRow>(
            "SELECT s.id AS student_id, s.entry_number, s.name, s.room_number, \
                    COALESCE(a.mess_days, $4) AS mess_days, \
                    COALESCE(a.absent_days, 0) AS absent_days \
             FROM students s \
             LEFT JOIN student_attendance a \
               ON a.student_id = s.id AND a.month = $2 AND a.year = $3 \
             WHERE s.is_active = 1 \
               AND s.hostel_id IN (SELECT value FROM json_each($1)) \
             ORDER BY s.entry_number ASC",
        )
        .bind(json_ids(hostel_ids))
        .bind(month)
        .bind(year)
        .bind(default_mess_days)
        .fetch_all(pool)
        .await
    }
}
