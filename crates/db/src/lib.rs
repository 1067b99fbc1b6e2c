//! SQLite persistence for the mess billing engine.
//!
//! Repositories in [`repositories`] are thin, table-oriented query helpers.
//! [`gateway::SqliteGateway`] composes them into the gateway traits the
//! engine in `messbill_core` consumes.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

pub mod gateway;
pub mod models;
pub mod repositories;

pub use gateway::SqliteGateway;

pub type DbPool = sqlx::SqlitePool;

/// Create a connection pool from a database URL.
///
/// Connections are kept for the life of the pool so that `sqlite::memory:`
/// databases survive between queries.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
}

/// Cheap round-trip used by the health endpoint and at startup.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the embedded migrations in `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
