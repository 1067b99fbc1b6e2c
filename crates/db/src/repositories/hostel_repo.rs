//! Repository for the `hostels` table.

use messbill_core::types::DbId;
use sqlx::SqlitePool;

use crate::models::hostel::{CreateHostel, Hostel};

/// Column list for hostels queries.
const COLUMNS: &str = "id, name, mess_id, created_at";

pub struct HostelRepo;

impl HostelRepo {
    pub async fn ids_for_mess(pool: &SqlitePool, mess_id: DbId) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>("SELECT id FROM hostels WHERE mess_id = $1 ORDER BY id")
            .bind(mess_id)
            .fetch_all(pool)
            .await
    }

    /// The `mess_id` column of one hostel.
    ///
    /// Outer `None`: no such hostel. Inner `None`: hostel has no mess.
    pub async fn find_mess_id(
        pool: &SqlitePool,
        hostel_id: DbId,
    ) -> Result<Option<Option<DbId>>, sqlx::Error> {
        sqlx::query_scalar::<_, Option<DbId>>("SELECT mess_id FROM hostels WHERE id = $1")
            .bind(hostel_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(pool: &SqlitePool, input: &CreateHostel) -> Result<Hostel, sqlx::Error> {
        let query = format!(
            "INSERT INTO hostels (name, mess_id) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Hostel>(&query)
            .bind(&input.name)
            .bind(input.mess_id)
            .fetch_one(pool)
            .await
    }
}
