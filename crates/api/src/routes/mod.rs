pub mod billing;
pub mod health;
pub mod messes;
pub mod settings;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /messes                                          list messes
/// /messes/overview?month=&year=                    estimate per mess
/// /messes/{mess_id}/periods/{year}/{month}/...     per-period routes (see messes.rs)
///
/// /hostels/{hostel_id}/mess                        billing mess of a hostel
///
/// /settings/rates                                  get, update (clears stats cache)
///
/// /bills/compute                                   pure bill computation (POST)
/// /stats                                           clear all cached stats (DELETE)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/messes", messes::router())
        .merge(messes::hostel_router())
        .nest("/settings", settings::router())
        .merge(billing::router())
}
