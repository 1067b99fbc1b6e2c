//! Contracts the engine consumes from the persistence layer.
//!
//! The engine never invalidates cached stats on its own when attendance or
//! settings change. Any caller that writes attendance rows or rates through
//! these gateways must also call `invalidate_stats` / `clear_all_stats` on
//! the engine, or accept stale estimates for the rest of the session.

use std::collections::BTreeSet;
use std::future::Future;

use rust_decimal::Decimal;

use crate::bill_config::BillConfig;
use crate::error::CoreError;
use crate::roster::{AttendanceRow, Mess};
use crate::types::{DbId, MessPeriod};

/// A set of hostel ids belonging to one mess.
pub type HostelSet = BTreeSet<DbId>;

// ---------------------------------------------------------------------------
// Roster
// ---------------------------------------------------------------------------

/// Read access to messes, hostels and student counts.
pub trait RosterGateway: Send + Sync {
    /// All messes, ordered by name.
    fn list_messes(&self) -> impl Future<Output = Result<Vec<Mess>, CoreError>> + Send;

    /// Hostels assigned to `mess_id`. Empty when none are assigned.
    fn hostel_ids_for_mess(
        &self,
        mess_id: DbId,
    ) -> impl Future<Output = Result<HostelSet, CoreError>> + Send;

    /// Mess feeding `hostel_id`. A hostel without a mess bills as itself,
    /// so its own id is returned.
    fn mess_id_for_hostel(
        &self,
        hostel_id: DbId,
    ) -> impl Future<Output = Result<DbId, CoreError>> + Send;

    /// Active students living in `hostel_ids`.
    fn active_student_count(
        &self,
        hostel_ids: &HostelSet,
    ) -> impl Future<Output = Result<i64, CoreError>> + Send;

    /// All students, active or not, living in `hostel_ids`.
    fn total_student_count(
        &self,
        hostel_ids: &HostelSet,
    ) -> impl Future<Output = Result<i64, CoreError>> + Send;
}

// ---------------------------------------------------------------------------
// Attendance
// ---------------------------------------------------------------------------

/// Read access to recorded attendance.
pub trait AttendanceGateway: Send + Sync {
    /// Absent days summed over active students of `hostel_ids`.
    fn total_absent_days(
        &self,
        hostel_ids: &HostelSet,
        month: u32,
        year: i32,
    ) -> impl Future<Output = Result<i64, CoreError>> + Send;

    /// One row per active student, ordered by entry number. Students with
    /// no record get `default_mess_days` mess days and no absences.
    fn student_attendance_rows(
        &self,
        hostel_ids: &HostelSet,
        month: u32,
        year: i32,
        default_mess_days: i64,
    ) -> impl Future<Output = Result<Vec<AttendanceRow>, CoreError>> + Send;
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// The global `key -> value` settings map.
pub trait SettingsStore: Send + Sync {
    /// Numeric value of `key`, or `default` when absent or unparsable.
    fn get_setting(
        &self,
        key: &str,
        default: Decimal,
    ) -> impl Future<Output = Result<Decimal, CoreError>> + Send;

    /// Insert or replace `key`.
    fn set_setting(
        &self,
        key: &str,
        value: Decimal,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;
}

// ---------------------------------------------------------------------------
// Bill configuration
// ---------------------------------------------------------------------------

/// The versioned per-period configuration plus the legacy override table.
pub trait BillConfigStore: Send + Sync {
    fn find_bill_config(
        &self,
        period: MessPeriod,
    ) -> impl Future<Output = Result<Option<BillConfig>, CoreError>> + Send;

    /// Replace the configuration for `period` and write its operating days
    /// into the legacy override table in the same unit of work. Both stores
    /// agree once this returns `Ok`.
    fn save_bill_config(
        &self,
        period: MessPeriod,
        config: &BillConfig,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn find_legacy_operating_days(
        &self,
        period: MessPeriod,
    ) -> impl Future<Output = Result<Option<i64>, CoreError>> + Send;

    fn save_legacy_operating_days(
        &self,
        period: MessPeriod,
        operating_days: i64,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;
}

/// Everything the billing engine reads from or writes to.
pub trait BillingGateway: RosterGateway + AttendanceGateway + SettingsStore + BillConfigStore {}

impl<T> BillingGateway for T where
    T: RosterGateway + AttendanceGateway + SettingsStore + BillConfigStore
{
}
