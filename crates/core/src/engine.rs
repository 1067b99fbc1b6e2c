//! Billing engine: operating-day resolution, bill configuration, and the
//! cached mess-stats use case.
//!
//! Two aggregation modes exist on purpose:
//!
//! - [`StatsMode::Estimate`] is the dashboard figure. Operating days come
//!   from the legacy override table or the calendar; any saved date range
//!   and fine are ignored, and the result is cached.
//! - [`StatsMode::Curated`] is the billing-screen figure. It uses the saved
//!   [`BillConfig`] (date range, operating days, fine) and is never cached.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::bill_config::{validate_bill_config, BillConfig, OperatingDaysSource};
use crate::billing::{compute_bill, BillBreakdown, BillInputs, MessStats};
use crate::cache::StatsCache;
use crate::error::CoreError;
use crate::gateway::{BillingGateway, HostelSet};
use crate::period::{days_in_month, validate_period};
use crate::roster::{available_batches, filter_rows, AttendanceRow, Mess, ReportFilter, StudentCounts};
use crate::settings::{
    validate_rates, RateSettings, DEFAULT_GST_PERCENT, DEFAULT_PER_DAY_RATE, KEY_GST_PERCENT,
    KEY_PER_DAY_RATE,
};
use crate::types::{DbId, MessPeriod};

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Which aggregation a caller wants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatsMode {
    #[default]
    Estimate,
    Curated,
}

/// Stats plus the failure that forced a zero result, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsOutcome {
    pub stats: MessStats,
    pub error: Option<String>,
}

/// The billing-screen view of one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CuratedBill {
    pub config: BillConfig,
    /// Whether `config` was loaded from storage rather than defaulted.
    pub saved: bool,
    pub bill: BillBreakdown,
}

/// Caretaker dashboard figures for one mess period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub period: MessPeriod,
    pub students: StudentCounts,
    pub operating_days: i64,
    pub estimated_total: Decimal,
}

/// One card on the admin overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessOverview {
    pub mess: Mess,
    pub stats: MessStats,
}

/// Per-student attendance listing for one mess period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentAttendance {
    pub operating_days: i64,
    /// Admission years present before filtering, newest first.
    pub batches: Vec<i32>,
    pub rows: Vec<AttendanceRow>,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Ties the gateways, the calculator and the stats cache together.
pub struct BillingEngine<G> {
    gateway: G,
    cache: StatsCache,
}

impl<G: BillingGateway> BillingEngine<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            cache: StatsCache::new(),
        }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn cache(&self) -> &StatsCache {
        &self.cache
    }

    // -- Operating days ----------------------------------------------------

    /// Resolve operating days through the full chain: saved configuration,
    /// then legacy override, then calendar month length.
    pub async fn resolve_operating_days(
        &self,
        period: MessPeriod,
    ) -> Result<OperatingDaysSource, CoreError> {
        validate_period(period.month, period.year)?;
        if let Some(config) = self.gateway.find_bill_config(period).await? {
            return Ok(OperatingDaysSource::Configured(config));
        }
        self.estimate_operating_days(period).await
    }

    /// Operating-day count for `period` via [`Self::resolve_operating_days`].
    pub async fn get_operating_days(&self, period: MessPeriod) -> Result<i64, CoreError> {
        Ok(self.resolve_operating_days(period).await?.operating_days())
    }

    /// The estimate chain: legacy override, then calendar. A saved
    /// configuration is deliberately not consulted here.
    async fn estimate_operating_days(
        &self,
        period: MessPeriod,
    ) -> Result<OperatingDaysSource, CoreError> {
        validate_period(period.month, period.year)?;
        if let Some(operating_days) = self.gateway.find_legacy_operating_days(period).await? {
            return Ok(OperatingDaysSource::LegacyOverride { operating_days });
        }
        Ok(OperatingDaysSource::CalendarDefault {
            operating_days: days_in_month(period.month, period.year)?,
        })
    }

    // -- Bill configuration --------------------------------------------------

    pub async fn get_bill_config(
        &self,
        period: MessPeriod,
    ) -> Result<Option<BillConfig>, CoreError> {
        validate_period(period.month, period.year)?;
        self.gateway.find_bill_config(period).await
    }

    /// Validate and upsert a configuration, then drop any cached stats for
    /// the same period before returning.
    pub async fn save_bill_config(
        &self,
        period: MessPeriod,
        config: &BillConfig,
    ) -> Result<(), CoreError> {
        validate_bill_config(period.month, period.year, config)?;
        self.gateway.save_bill_config(period, config).await?;
        self.cache.invalidate(period).await;

        tracing::info!(
            mess_id = period.mess_id,
            month = period.month,
            year = period.year,
            operating_days = config.operating_days,
            fine_amount = %config.fine_amount,
            "Bill configuration saved",
        );
        Ok(())
    }

    /// The saved window for `period`, or the full calendar month with no
    /// fine. The flag is `true` when the window came from storage.
    pub async fn billing_window(&self, period: MessPeriod) -> Result<(BillConfig, bool), CoreError> {
        match self.get_bill_config(period).await? {
            Some(config) => Ok((config, true)),
            None => Ok((BillConfig::calendar_default(period.month, period.year)?, false)),
        }
    }

    // -- Rates ---------------------------------------------------------------

    pub async fn rates(&self) -> Result<RateSettings, CoreError> {
        Ok(RateSettings {
            per_day_rate: self
                .gateway
                .get_setting(KEY_PER_DAY_RATE, DEFAULT_PER_DAY_RATE)
                .await?,
            gst_percent: self
                .gateway
                .get_setting(KEY_GST_PERCENT, DEFAULT_GST_PERCENT)
                .await?,
        })
    }

    /// Validate and store new rates.
    ///
    /// Cached estimates are left untouched; the caller decides whether to
    /// clear them.
    pub async fn update_rates(&self, rates: &RateSettings) -> Result<(), CoreError> {
        validate_rates(rates)?;
        self.gateway
            .set_setting(KEY_PER_DAY_RATE, rates.per_day_rate)
            .await?;
        self.gateway
            .set_setting(KEY_GST_PERCENT, rates.gst_percent)
            .await?;
        tracing::info!(
            per_day_rate = %rates.per_day_rate,
            gst_percent = %rates.gst_percent,
            "Rates updated",
        );
        Ok(())
    }

    // -- Calculation ---------------------------------------------------------

    /// Pure bill computation; see [`compute_bill`].
    pub fn compute_bill(inputs: &BillInputs) -> Result<BillBreakdown, CoreError> {
        compute_bill(inputs)
    }

    async fn bill_for(
        &self,
        hostel_ids: &HostelSet,
        period: MessPeriod,
        operating_days: i64,
        fine_amount: Decimal,
    ) -> Result<BillBreakdown, CoreError> {
        let active_students = self.gateway.active_student_count(hostel_ids).await?;
        let total_absent_days = self
            .gateway
            .total_absent_days(hostel_ids, period.month, period.year)
            .await?;
        let rates = self.rates().await?;

        compute_bill(&BillInputs {
            operating_days,
            active_students,
            total_absent_days,
            per_day_rate: rates.per_day_rate,
            gst_percent: rates.gst_percent,
            fine_amount,
        })
    }

    /// The billing-screen bill: saved window and fine, live rates.
    pub async fn curated_bill(&self, period: MessPeriod) -> Result<CuratedBill, CoreError> {
        let (config, saved) = self.billing_window(period).await?;
        let hostel_ids = self.gateway.hostel_ids_for_mess(period.mess_id).await?;
        if hostel_ids.is_empty() {
            return Err(CoreError::NotFound {
                entity: "hostels for mess",
                id: period.mess_id,
            });
        }
        let bill = self
            .bill_for(&hostel_ids, period, config.operating_days, config.fine_amount)
            .await?;
        Ok(CuratedBill {
            config,
            saved,
            bill,
        })
    }

    // -- Stats ---------------------------------------------------------------

    /// Aggregate stats for `period` in the requested mode.
    pub async fn get_stats(&self, period: MessPeriod, mode: StatsMode) -> Result<MessStats, CoreError> {
        match mode {
            StatsMode::Estimate => self.estimated_stats(period).await,
            StatsMode::Curated => Ok(MessStats::from(&self.curated_bill(period).await?.bill)),
        }
    }

    /// Like [`Self::get_stats`], but a failure yields zero stats and the
    /// error text instead of an error.
    pub async fn stats_or_zero(&self, period: MessPeriod, mode: StatsMode) -> StatsOutcome {
        match self.get_stats(period, mode).await {
            Ok(stats) => StatsOutcome { stats, error: None },
            Err(err) => {
                tracing::warn!(%period, ?mode, error = %err, "Stats unavailable, reporting zero");
                StatsOutcome {
                    stats: MessStats::zero(),
                    error: Some(err.to_string()),
                }
            }
        }
    }

    async fn estimated_stats(&self, period: MessPeriod) -> Result<MessStats, CoreError> {
        if let Some(hit) = self.cache.get(period).await {
            tracing::debug!(%period, "Stats cache hit");
            return Ok((*hit).clone());
        }

        let ticket = self.cache.ticket(period).await;
        let source = self.estimate_operating_days(period).await?;
        let hostel_ids = self.gateway.hostel_ids_for_mess(period.mess_id).await?;
        let bill = self
            .bill_for(&hostel_ids, period, source.operating_days(), Decimal::ZERO)
            .await?;
        let stats = MessStats::from(&bill);

        tracing::debug!(
            %period,
            source = source.label(),
            operating_days = stats.operating_days,
            "Stats computed",
        );
        if !self.cache.put_if_current(period, ticket, stats.clone()).await {
            tracing::debug!(%period, "Stats invalidated while computing, not cached");
        }
        Ok(stats)
    }

    pub async fn invalidate_stats(&self, period: MessPeriod) -> bool {
        self.cache.invalidate(period).await
    }

    pub async fn clear_all_stats(&self) {
        self.cache.clear_all().await;
    }

    // -- Views ---------------------------------------------------------------

    /// Mess feeding `hostel_id`, or the hostel itself when unassigned.
    pub async fn mess_for_hostel(&self, hostel_id: DbId) -> Result<DbId, CoreError> {
        self.gateway.mess_id_for_hostel(hostel_id).await
    }

    /// Caretaker dashboard: student counts and the cached estimate.
    pub async fn dashboard(&self, period: MessPeriod) -> Result<DashboardSummary, CoreError> {
        let stats = self.estimated_stats(period).await?;
        let hostel_ids = self.gateway.hostel_ids_for_mess(period.mess_id).await?;
        let total = self.gateway.total_student_count(&hostel_ids).await?;

        Ok(DashboardSummary {
            period,
            students: StudentCounts {
                total,
                active: stats.active_students,
            },
            operating_days: stats.operating_days,
            estimated_total: stats.total,
        })
    }

    /// Estimates for every mess that has at least one hostel.
    pub async fn mess_overview(&self, month: u32, year: i32) -> Result<Vec<MessOverview>, CoreError> {
        validate_period(month, year)?;
        let mut cards = Vec::new();
        for mess in self.gateway.list_messes().await? {
            if self.gateway.hostel_ids_for_mess(mess.id).await?.is_empty() {
                continue;
            }
            let stats = self
                .estimated_stats(MessPeriod::new(mess.id, month, year))
                .await?;
            cards.push(MessOverview { mess, stats });
        }
        Ok(cards)
    }

    /// Attendance rows for the active students of a mess.
    pub async fn student_attendance(
        &self,
        period: MessPeriod,
        filter: ReportFilter,
        batch: Option<i32>,
    ) -> Result<StudentAttendance, CoreError> {
        let operating_days = self.get_operating_days(period).await?;
        let hostel_ids = self.gateway.hostel_ids_for_mess(period.mess_id).await?;
        let rows = self
            .gateway
            .student_attendance_rows(&hostel_ids, period.month, period.year, operating_days)
            .await?;

        Ok(StudentAttendance {
            operating_days,
            batches: available_batches(&rows),
            rows: filter_rows(rows, filter, batch),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
