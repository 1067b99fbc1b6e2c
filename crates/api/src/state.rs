use std::sync::Arc;

use messbill_core::engine::BillingEngine;
use messbill_db::SqliteGateway;

use crate::config::ServerConfig;

/// The engine as wired for production: SQLite behind the gateway traits.
pub type Engine = BillingEngine<SqliteGateway>;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone; everything inside is an `Arc` or a pool handle.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: messbill_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Billing engine, owning the process-wide stats cache.
    pub engine: Arc<Engine>,
}

impl AppState {
    pub fn new(pool: messbill_db::DbPool, config: ServerConfig) -> Self {
        let engine = BillingEngine::new(SqliteGateway::new(pool.clone()));
        Self {
            pool,
            config: Arc::new(config),
            engine: Arc::new(engine),
        }
    }
}
