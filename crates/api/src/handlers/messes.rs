//! Handlers for the mess directory and hostel lookup.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use messbill_core::gateway::RosterGateway;
use messbill_core::types::DbId;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for the overview endpoint.
#[derive(Debug, Deserialize)]
pub struct OverviewParams {
    pub month: u32,
    pub year: i32,
}

#[derive(Debug, Serialize)]
pub struct HostelMess {
    pub hostel_id: DbId,
    pub mess_id: DbId,
}

// ---------------------------------------------------------------------------
// GET /messes
// ---------------------------------------------------------------------------

/// List all messes, ordered by name.
pub async fn list_messes(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let messes = state.engine.gateway().list_messes().await?;
    tracing::debug!(count = messes.len(), "Listed messes");
    Ok(Json(DataResponse { data: messes }))
}

// ---------------------------------------------------------------------------
// GET /messes/overview
// ---------------------------------------------------------------------------

/// Estimated bill for every mess that has hostels.
pub async fn mess_overview(
    State(state): State<AppState>,
    Query(params): Query<OverviewParams>,
) -> AppResult<impl IntoResponse> {
    let cards = state
        .engine
        .mess_overview(params.month, params.year)
        .await?;
    Ok(Json(DataResponse { data: cards }))
}

// ---------------------------------------------------------------------------
// GET /hostels/{hostel_id}/mess
// ---------------------------------------------------------------------------

/// The mess a hostel is billed under.
pub async fn mess_for_hostel(
    State(state): State<AppState>,
    Path(hostel_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let mess_id = state.engine.mess_for_hostel(hostel_id).await?;
    Ok(Json(DataResponse {
        data: HostelMess { hostel_id, mess_id },
    }))
}
