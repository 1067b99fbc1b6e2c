use serde::{Deserialize, Serialize};

/// All database primary keys are SQLite INTEGER rowids.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// One billing period of one mess.
///
/// Used as the key for bill configurations, legacy operating-day overrides
/// and cached stats. Hashing the struct keeps `(1, 23, _)` and `(12, 3, _)`
/// distinct, which a bare string join would not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessPeriod {
    pub mess_id: DbId,
    pub month: u32,
    pub year: i32,
}

impl MessPeriod {
    pub fn new(mess_id: DbId, month: u32, year: i32) -> Self {
        Self {
            mess_id,
            month,
            year,
        }
    }
}

impl std::fmt::Display for MessPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "mess {} {:04}-{:02}", self.mess_id, self.year, self.month)
    }
}
