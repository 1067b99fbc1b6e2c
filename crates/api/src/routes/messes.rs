//! Route definitions for messes and their billing periods.
//!
//! ```text
//! GET    /                                         list_messes
//! GET    /overview                                 mess_overview
//! GET    /{mess_id}/periods/{year}/{month}/operating-days   get_operating_days
//! GET    /{mess_id}/periods/{year}/{month}/bill-config      get_bill_config
//! PUT    /{mess_id}/periods/{year}/{month}/bill-config      save_bill_config
//! GET    /{mess_id}/periods/{year}/{month}/bill             get_curated_bill
//! GET    /{mess_id}/periods/{year}/{month}/stats            get_stats
//! DELETE /{mess_id}/periods/{year}/{month}/stats            invalidate_stats
//! GET    /{mess_id}/periods/{year}/{month}/dashboard        get_dashboard
//! GET    /{mess_id}/periods/{year}/{month}/students         list_student_attendance
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::{messes, periods};
use crate::state::AppState;

/// Mess routes, mounted at `/messes`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(messes::list_messes))
        .route("/overview", get(messes::mess_overview))
        .nest("/{mess_id}/periods/{year}/{month}", period_router())
}

fn period_router() -> Router<AppState> {
    Router::new()
        .route("/operating-days", get(periods::get_operating_days))
        .route(
            "/bill-config",
            get(periods::get_bill_config).put(periods::save_bill_config),
        )
        .route("/bill", get(periods::get_curated_bill))
        .route(
            "/stats",
            get(periods::get_stats).delete(periods::invalidate_stats),
        )
        .route("/dashboard", get(periods::get_dashboard))
        .route("/students", get(periods::list_student_attendance))
}

/// Hostel lookup, merged at the API root.
pub fn hostel_router() -> Router<AppState> {
    Router::new().route("/hostels/{hostel_id}/mess", get(messes::mess_for_hostel))
}
