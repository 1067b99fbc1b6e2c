//! Repository for the `settings` table.

use sqlx::SqlitePool;

use crate::models::setting::Setting;

/// Column list for settings queries.
const COLUMNS: &str = "id, key, value, updated_at";

pub struct SettingRepo;

impl SettingRepo {
    /// All settings, ordered by key.
    pub async fn list(pool: &SqlitePool) -> Result<Vec<Setting>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM settings ORDER BY key ASC");
        sqlx::query_as::<_, Setting>(&query).fetch_all(pool).await
    }

    /// Raw text value of `key`, if present.
    pub async fn find_value(pool: &SqlitePool, key: &str) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>("SELECT value FROM settings WHERE key = $1")
            .bind(key)
            .fetch_optional(pool)
            .await
    }

    /// Insert or replace `key`, returning the stored row.
    pub async fn upsert(pool: &SqlitePool, key: &str, value: &str) -> Result<Setting, sqlx::Error> {
        let query = format!(
            "INSERT INTO settings (key, value) VALUES ($1, $2)
             ON CONFLICT (key) DO UPDATE SET
                value = excluded.value,
                updated_at = CURRENT_TIMESTAMP
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Setting>(&query)
            .bind(key)
            .bind(value)
            .fetch_one(pool)
            .await
    }
}
