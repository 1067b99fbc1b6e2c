//! Repository for the legacy `mess_operation_days` table.

use messbill_core::types::DbId;
use sqlx::{SqliteConnection, SqlitePool};

use crate::models::operating_days::OperatingDaysOverride;

/// Column list for mess_operation_days queries.
const COLUMNS: &str = "id, mess_id, month, year, operating_days";

pub struct OperatingDaysRepo;

impl OperatingDaysRepo {
    pub async fn find(
        pool: &SqlitePool,
        mess_id: DbId,
        month: u32,
        year: i32,
    ) -> Result<Option<OperatingDaysOverride>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM mess_operation_days
             WHERE mess_id = $1 AND month = $2 AND year = $3"
        );
        sqlx::query_as::<_, OperatingDaysOverride>(&query)
            .bind(mess_id)
            .bind(month)
            .bind(year)
            .fetch_optional(pool)
            .await
    }

    pub async fn upsert(
        pool: &SqlitePool,
        mess_id: DbId,
        month: u32,
        year: i32,
        operating_days: i64,
    ) -> Result<(), sqlx::Error> {
        let mut conn = pool.acquire().await?;
        Self::upsert_on(&mut *conn, mess_id, month, year, operating_days).await
    }

    /// Same as [`Self::upsert`] on an existing connection or transaction.
    pub async fn upsert_on(
        conn: &mut SqliteConnection,
        mess_id: DbId,
        month: u32,
        year: i32,
        operating_days: i64,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO mess_operation_days (mess_id, month, year, operating_days) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (mess_id, month, year) \
             DO UPDATE SET operating_days = excluded.operating_days",
        )
        .bind(mess_id)
        .bind(month)
        .bind(year)
        .bind(operating_days)
        .execute(conn)
        .await?;
        Ok(())
    }
}
