//! Legacy operating-days override model.

use messbill_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `mess_operation_days` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct OperatingDaysOverride {
    pub id: DbId,
    pub mess_id: DbId,
    pub month: i64,
    pub year: i64,
    pub operating_days: i64,
}
