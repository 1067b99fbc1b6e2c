//! Repository for the `messes` table.

use sqlx::SqlitePool;

use crate::models::mess::{CreateMess, Mess};

/// Column list for messes queries.
const COLUMNS: &str = "id, name, code, created_at";

pub struct MessRepo;

impl MessRepo {
    /// List all messes, ordered by name ascending.
    pub async fn list(pool: &SqlitePool) -> Result<Vec<Mess>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM messes ORDER BY name ASC");
        sqlx::query_as::<_, Mess>(&query).fetch_all(pool).await
    }

    /// Create a new mess, returning the created row.
    pub async fn create(pool: &SqlitePool, input: &CreateMess) -> Result<Mess, sqlx::Error> {
        let query = format!(
            "INSERT INTO messes (name, code) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Mess>(&query)
            .bind(&input.name)
            .bind(&input.code)
            .fetch_one(pool)
            .await
    }
}
