//! Mess model.

use messbill_core::roster::Mess as CoreMess;
use messbill_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `messes` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Mess {
    pub id: DbId,
    pub name: String,
    pub code: String,
    pub created_at: Timestamp,
}

impl From<Mess> for CoreMess {
    fn from(row: Mess) -> Self {
        CoreMess {
            id: row.id,
            name: row.name,
            code: row.code,
        }
    }
}

/// DTO for creating a new mess.
#[derive(Debug, Deserialize)]
pub struct CreateMess {
    pub name: String,
    pub code: String,
}
