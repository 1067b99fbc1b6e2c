//! Repository for the `students` table.

use messbill_core::types::DbId;
use sqlx::SqlitePool;

use crate::models::student::{CreateStudent, Student};
use crate::repositories::json_ids;

/// Column list for students queries.
const COLUMNS: &str = "id, entry_number, name, hostel_id, room_number, is_active, created_at";

pub struct StudentRepo;

impl StudentRepo {
    /// Create a new student, returning the created row.
    pub async fn create(pool: &SqlitePool, input: &CreateStudent) -> Result<Student, sqlx::Error> {
        let query = format!(
            "INSERT INTO students (entry_number, name, hostel_id, room_number, is_active)
             VALUES ($1, $2, $3, $4, COALESCE($5, 1))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Student>(&query)
            .bind(&input.entry_number)
            .bind(&input.name)
            .bind(input.hostel_id)
            .bind(&input.room_number)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    /// Mark a student active or inactive. Returns `true` if a row changed.
    pub async fn set_active(pool: &SqlitePool, id: DbId, active: bool) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE students SET is_active = $2 WHERE id = $1")
            .bind(id)
            .bind(active)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count active students living in any of `hostel_ids`.
    pub async fn count_active(pool: &SqlitePool, hostel_ids: &[DbId]) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM students \
             WHERE is_active = 1 AND hostel_id IN (SELECT value FROM json_each($1))",
        )
        .bind(json_ids(hostel_ids))
        .fetch_one(pool)
        .await
    }

    /// Count every student living in any of `hostel_ids`.
    pub async fn count_all(pool: &SqlitePool, hostel_ids: &[DbId]) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM students \
             WHERE hostel_id IN (SELECT value FROM json_each($1))",
        )
        .bind(json_ids(hostel_ids))
        .fetch_one(pool)
        .await
    }
}
