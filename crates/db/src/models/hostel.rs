//! Hostel model.

use messbill_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `hostels` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Hostel {
    pub id: DbId,
    pub name: String,
    /// `None` when the hostel runs its own billing.
    pub mess_id: Option<DbId>,
    pub created_at: Timestamp,
}

/// DTO for creating a new hostel.
#[derive(Debug, Deserialize)]
pub struct CreateHostel {
    pub name: String,
    pub mess_id: Option<DbId>,
}
