//! Bill configuration model.

use std::str::FromStr;

use chrono::NaiveDate;
use messbill_core::bill_config::BillConfig;
use messbill_core::error::CoreError;
use messbill_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `bill_configurations` table.
///
/// `fine_amount` is kept as text so the stored decimal is exact.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct BillConfiguration {
    pub id: DbId,
    pub mess_id: DbId,
    pub month: i64,
    pub year: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub operating_days: i64,
    pub fine_amount: String,
    pub updated_at: Timestamp,
}

impl BillConfiguration {
    /// Convert into the engine's value type.
    pub fn to_config(&self) -> Result<BillConfig, CoreError> {
        let fine_amount = Decimal::from_str(&self.fine_amount).map_err(|e| {
            CoreError::Internal(format!(
                "bill configuration {} has unreadable fine_amount '{}': {e}",
                self.id, self.fine_amount
            ))
        })?;
        Ok(BillConfig {
            start_date: self.start_date,
            end_date: self.end_date,
            operating_days: self.operating_days,
            fine_amount,
        })
    }
}
