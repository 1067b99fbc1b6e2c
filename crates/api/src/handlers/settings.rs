//! Handlers for the global rate settings.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use messbill_core::settings::RateSettings;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET /settings/rates
// ---------------------------------------------------------------------------

pub async fn get_rates(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let rates = state.engine.rates().await?;
    Ok(Json(DataResponse { data: rates }))
}

// ---------------------------------------------------------------------------
// PUT /settings/rates
// ---------------------------------------------------------------------------

/// Replace the per-day rate and GST percentage.
///
/// Every cached estimate was computed with the old rates, so the whole
/// stats cache is cleared after a successful write.
pub async fn update_rates(
    State(state): State<AppState>,
    Json(input): Json<RateSettings>,
) -> AppResult<impl IntoResponse> {
    state.engine.update_rates(&input).await?;
    state.engine.clear_all_stats().await;
    tracing::info!("Stats cache cleared after rate change");
    Ok(Json(DataResponse { data: input }))
}
