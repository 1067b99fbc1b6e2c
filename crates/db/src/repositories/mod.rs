//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&SqlitePool` as the first argument.

pub mod attendance_repo;
pub mod bill_config_repo;
pub mod hostel_repo;
pub mod mess_repo;
pub mod operating_days_repo;
pub mod setting_repo;
pub mod student_repo;

pub use attendance_repo::AttendanceRepo;
pub use bill_config_repo::BillConfigRepo;
pub use hostel_repo::HostelRepo;
pub use mess_repo::MessRepo;
pub use operating_days_repo::OperatingDaysRepo;
pub use setting_repo::SettingRepo;
pub use student_repo::StudentRepo;

use messbill_core::types::DbId;

/// Encode an id list as a JSON array for `IN (SELECT value FROM json_each(?))`.
pub(crate) fn json_ids(ids: &[DbId]) -> String {
    serde_json::Value::from(ids.to_vec()).to_string()
}
