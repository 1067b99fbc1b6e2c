//! Handlers for one mess billing period (`/messes/{mess_id}/periods/{year}/{month}`).

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::NaiveDate;
use messbill_core::bill_config::BillConfig;
use messbill_core::engine::{CuratedBill, StatsMode};
use messbill_core::roster::ReportFilter;
use messbill_core::types::{DbId, MessPeriod};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Path and query parameters
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct PeriodPath {
    pub mess_id: DbId,
    pub year: i32,
    pub month: u32,
}

impl From<PeriodPath> for MessPeriod {
    fn from(path: PeriodPath) -> Self {
        MessPeriod::new(path.mess_id, path.month, path.year)
    }
}

#[derive(Debug, Deserialize)]
pub struct StatsParams {
    /// `estimate` (default) or `curated`.
    pub mode: Option<StatsMode>,
}

#[derive(Debug, Deserialize)]
pub struct StudentParams {
    pub filter: Option<ReportFilter>,
    /// Admission year, e.g. `2023`.
    pub batch: Option<i32>,
}

/// Request body for saving a bill configuration.
///
/// `operating_days` defaults to the inclusive length of the date range and
/// `fine_amount` to zero.
#[derive(Debug, Deserialize)]
pub struct SaveBillConfig {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub operating_days: Option<i64>,
    pub fine_amount: Option<Decimal>,
}

impl SaveBillConfig {
    fn into_config(self) -> BillConfig {
        let mut config = BillConfig::for_range(
            self.start_date,
            self.end_date,
            self.fine_amount.unwrap_or(Decimal::ZERO),
        );
        if let Some(days) = self.operating_days {
            config.operating_days = days;
        }
        config
    }
}

// ---------------------------------------------------------------------------
// Response payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct OperatingDaysView {
    pub operating_days: i64,
    /// `configured`, `legacy_override` or `calendar_default`.
    pub source: &'static str,
}

#[derive(Debug, Serialize)]
pub struct BillingWindowView {
    pub config: BillConfig,
    pub saved: bool,
}

#[derive(Debug, Serialize)]
pub struct InvalidateResult {
    pub invalidated: bool,
}

// ---------------------------------------------------------------------------
// GET .../operating-days
// ---------------------------------------------------------------------------

pub async fn get_operating_days(
    State(state): State<AppState>,
    Path(path): Path<PeriodPath>,
) -> AppResult<impl IntoResponse> {
    let source = state.engine.resolve_operating_days(path.into()).await?;
    Ok(Json(DataResponse {
        data: OperatingDaysView {
            operating_days: source.operating_days(),
            source: source.label(),
        },
    }))
}

// ---------------------------------------------------------------------------
// GET .../bill-config
// ---------------------------------------------------------------------------

/// The saved billing window, or the calendar-month default.
pub async fn get_bill_config(
    State(state): State<AppState>,
    Path(path): Path<PeriodPath>,
) -> AppResult<impl IntoResponse> {
    let (config, saved) = state.engine.billing_window(path.into()).await?;
    Ok(Json(DataResponse {
        data: BillingWindowView { config, saved },
    }))
}

// ---------------------------------------------------------------------------
// PUT .../bill-config
// ---------------------------------------------------------------------------

/// Save the billing window. Cached stats for the period are evicted.
pub async fn save_bill_config(
    State(state): State<AppState>,
    Path(path): Path<PeriodPath>,
    Json(input): Json<SaveBillConfig>,
) -> AppResult<impl IntoResponse> {
    let period: MessPeriod = path.into();
    let config = input.into_config();
    state.engine.save_bill_config(period, &config).await?;
    Ok(Json(DataResponse {
        data: BillingWindowView {
            config,
            saved: true,
        },
    }))
}

// ---------------------------------------------------------------------------
// GET .../bill
// ---------------------------------------------------------------------------

/// The billing-screen bill: saved window and fine, live rates.
pub async fn get_curated_bill(
    State(state): State<AppState>,
    Path(path): Path<PeriodPath>,
) -> AppResult<impl IntoResponse> {
    let curated = state.engine.curated_bill(path.into()).await?;
    Ok(Json(DataResponse {
        data: CuratedBill {
            bill: curated.bill.rounded(),
            ..curated
        },
    }))
}

// ---------------------------------------------------------------------------
// GET .../stats
// ---------------------------------------------------------------------------

/// Aggregate stats. Failures come back as zero stats plus `error`.
pub async fn get_stats(
    State(state): State<AppState>,
    Path(path): Path<PeriodPath>,
    Query(params): Query<StatsParams>,
) -> AppResult<impl IntoResponse> {
    let mode = params.mode.unwrap_or_default();
    let outcome = state.engine.stats_or_zero(path.into(), mode).await;
    Ok(Json(DataResponse { data: outcome }))
}

// ---------------------------------------------------------------------------
// DELETE .../stats
// ---------------------------------------------------------------------------

/// Evict the cached estimate, e.g. after attendance for the period changed.
pub async fn invalidate_stats(
    State(state): State<AppState>,
    Path(path): Path<PeriodPath>,
) -> AppResult<impl IntoResponse> {
    let period: MessPeriod = path.into();
    let invalidated = state.engine.invalidate_stats(period).await;
    tracing::debug!(%period, invalidated, "Stats invalidated");
    Ok(Json(DataResponse {
        data: InvalidateResult { invalidated },
    }))
}

// ---------------------------------------------------------------------------
// GET .../dashboard
// ---------------------------------------------------------------------------

pub async fn get_dashboard(
    State(state): State<AppState>,
    Path(path): Path<PeriodPath>,
) -> AppResult<impl IntoResponse> {
    let summary = state.engine.dashboard(path.into()).await?;
    Ok(Json(DataResponse { data: summary }))
}

// ---------------------------------------------------------------------------
// GET .../students
// ---------------------------------------------------------------------------

/// Per-student attendance with optional report filter and batch.
pub async fn list_student_attendance(
    State(state): State<AppState>,
    Path(path): Path<PeriodPath>,
    Query(params): Query<StudentParams>,
) -> AppResult<impl IntoResponse> {
    let listing = state
        .engine
        .student_attendance(
            path.into(),
            params.filter.unwrap_or_default(),
            params.batch,
        )
        .await?;
    tracing::debug!(rows = listing.rows.len(), "Listed student attendance");
    Ok(Json(DataResponse { data: listing }))
}
