//! Setting model.

use messbill_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `settings` table. Values are raw text.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Setting {
    pub id: DbId,
    pub key: String,
    pub value: String,
    pub updated_at: Timestamp,
}
