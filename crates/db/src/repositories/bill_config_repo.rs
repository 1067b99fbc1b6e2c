//! Repository for the `bill_configurations` table.

use messbill_core::bill_config::BillConfig;
use messbill_core::types::DbId;
use sqlx::SqlitePool;

use crate::models::bill_configuration::BillConfiguration;
use crate::repositories::OperatingDaysRepo;

/// Column list for bill_configurations queries.
const COLUMNS: &str =
    "id, mess_id, month, year, start_date, end_date, operating_days, fine_amount, updated_at";

pub struct BillConfigRepo;

impl BillConfigRepo {
    pub async fn find(
        pool: &SqlitePool,
        mess_id: DbId,
        month: u32,
        year: i32,
    ) -> Result<Option<BillConfiguration>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM bill_configurations
             WHERE mess_id = $1 AND month = $2 AND year = $3"
        );
        sqlx::query_as::<_, BillConfiguration>(&query)
            .bind(mess_id)
            .bind(month)
            .bind(year)
            .fetch_optional(pool)
            .await
    }

    /// Upsert the configuration and mirror its operating days into
    /// `mess_operation_days`, both within one transaction.
    pub async fn upsert_with_mirror(
        pool: &SqlitePool,
        mess_id: DbId,
        month: u32,
        year: i32,
        config: &BillConfig,
    ) -> Result<BillConfiguration, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO bill_configurations
                (mess_id, month, year, start_date, end_date, operating_days, fine_amount)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             ON CONFLICT (mess_id, month, year) DO UPDATE SET
                start_date = excluded.start_date,
                end_date = excluded.end_date,
                operating_days = excluded.operating_days,
                fine_amount = excluded.fine_amount,
                updated_at = CURRENT_TIMESTAMP
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, BillConfiguration>(&query)
            .bind(mess_id)
            .bind(month)
            .bind(year)
            .bind(config.start_date)
            .bind(config.end_date)
            .bind(config.operating_days)
            .bind(config.fine_amount.to_string())
            .fetch_one(&mut *tx)
            .await?;

        OperatingDaysRepo::upsert_on(&mut *tx, mess_id, month, year, config.operating_days).await?;

        tx.commit().await?;
        Ok(row)
    }
}
