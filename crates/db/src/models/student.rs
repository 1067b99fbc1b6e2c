//! Student model.

use messbill_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `students` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Student {
    pub id: DbId,
    pub entry_number: String,
    pub name: String,
    pub hostel_id: DbId,
    pub room_number: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
}

/// DTO for creating a new student.
#[derive(Debug, Deserialize)]
pub struct CreateStudent {
    pub entry_number: String,
    pub name: String,
    pub hostel_id: DbId,
    pub room_number: Option<String>,
    /// Defaults to `true`.
    pub is_active: Option<bool>,
}
