//! Handlers for stateless bill computation and cache maintenance.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use messbill_core::billing::{validate_bill_inputs, BillInputs};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::{AppState, Engine};

// ---------------------------------------------------------------------------
// POST /bills/compute
// ---------------------------------------------------------------------------

/// Compute a bill from explicit inputs, rounded for display.
pub async fn compute_bill(Json(input): Json<BillInputs>) -> AppResult<impl IntoResponse> {
    validate_bill_inputs(&input)?;
    let bill = Engine::compute_bill(&input)?.rounded();
    Ok(Json(DataResponse { data: bill }))
}

// ---------------------------------------------------------------------------
// DELETE /stats
// ---------------------------------------------------------------------------

pub async fn clear_all_stats(State(state): State<AppState>) -> StatusCode {
    state.engine.clear_all_stats().await;
    tracing::info!("Stats cache cleared");
    StatusCode::NO_CONTENT
}
