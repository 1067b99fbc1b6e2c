//! Route definitions for global settings, mounted at `/settings`.
//!
//! ```text
//! GET    /rates          get_rates
//! PUT    /rates          update_rates
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::settings;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/rates",
        get(settings::get_rates).put(settings::update_rates),
    )
}
