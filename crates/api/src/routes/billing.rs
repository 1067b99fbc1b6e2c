//! Stateless computation and cache maintenance routes.
//!
//! ```text
//! POST   /bills/compute   compute_bill
//! DELETE /stats           clear_all_stats
//! ```

use axum::routing::{delete, post};
use axum::Router;

use crate::handlers::billing;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/bills/compute", post(billing::compute_bill))
        .route("/stats", delete(billing::clear_all_stats))
}
