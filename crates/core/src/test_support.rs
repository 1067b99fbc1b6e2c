//! In-memory gateway used by the engine tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use rust_decimal::Decimal;
use tokio::sync::Notify;

use crate::bill_config::BillConfig;
use crate::error::CoreError;
use crate::gateway::{AttendanceGateway, BillConfigStore, HostelSet, RosterGateway, SettingsStore};
use crate::roster::{AttendanceRow, Mess};
use crate::settings::parse_setting;
use crate::types::{DbId, MessPeriod};

struct Student {
    id: DbId,
    entry_number: String,
    hostel_id: DbId,
    active: bool,
}

#[derive(Default)]
struct State {
    messes: Vec<Mess>,
    hostels: HashMap<DbId, Option<DbId>>,
    students: Vec<Student>,
    attendance: HashMap<(DbId, u32, i32), (i64, i64)>,
    settings: HashMap<String, String>,
    bill_configs: HashMap<MessPeriod, BillConfig>,
    legacy: HashMap<MessPeriod, i64>,
}

#[derive(Default)]
pub struct InMemoryGateway {
    state: Mutex<State>,
    failing: AtomicBool,
    /// Number of absent-day aggregations served; counts cache misses.
    pub absence_scans: AtomicUsize,
    legacy_pause: Mutex<Option<(Arc<Notify>, Arc<Notify>)>>,
}

impl InMemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_mess(&self, id: DbId, name: &str, code: &str) {
        self.state.lock().unwrap().messes.push(Mess {
            id,
            name: name.to_string(),
            code: code.to_string(),
        });
    }

    pub fn add_hostel(&self, id: DbId, mess_id: Option<DbId>) {
        self.state.lock().unwrap().hostels.insert(id, mess_id);
    }

    pub fn add_student(&self, id: DbId, entry_number: &str, hostel_id: DbId, active: bool) {
        self.state.lock().unwrap().students.push(Student {
            id,
            entry_number: entry_number.to_string(),
            hostel_id,
            active,
        });
    }

    /// Add `count` active students with sequential ids starting at `first_id`.
    pub fn add_students(&self, first_id: DbId, count: i64, hostel_id: DbId) {
        for offset in 0..count {
            let id = first_id + offset;
            self.add_student(id, &format!("24STU{id:04}"), hostel_id, true);
        }
    }

    pub fn record_attendance(
        &self,
        student_id: DbId,
        month: u32,
        year: i32,
        mess_days: i64,
        absent_days: i64,
    ) {
        self.state
            .lock()
            .unwrap()
            .attendance
            .insert((student_id, month, year), (mess_days, absent_days));
    }

    pub fn put_raw_setting(&self, key: &str, value: &str) {
        self.state
            .lock()
            .unwrap()
            .settings
            .insert(key.to_string(), value.to_string());
    }

    pub fn legacy_days(&self, period: MessPeriod) -> Option<i64> {
        self.state.lock().unwrap().legacy.get(&period).copied()
    }

    /// Park the next legacy lookup after it has read its value. The first
    /// handle fires once the lookup is parked; notifying the second resumes it.
    pub fn pause_next_legacy_lookup(&self) -> (Arc<Notify>, Arc<Notify>) {
        let reached = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        *self.legacy_pause.lock().unwrap() = Some((Arc::clone(&reached), Arc::clone(&release)));
        (reached, release)
    }

    /// Make every subsequent call fail with a persistence error.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), CoreError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(CoreError::Persistence("store offline".to_string()))
        } else {
            Ok(())
        }
    }

    fn active_in(state: &State, hostel_ids: &HostelSet) -> Vec<DbId> {
        state
            .students
            .iter()
            .filter(|s| s.active && hostel_ids.contains(&s.hostel_id))
            .map(|s| s.id)
            .collect()
    }
}

impl RosterGateway for InMemoryGateway {
    async fn list_messes(&self) -> Result<Vec<Mess>, CoreError> {
        self.check()?;
        let mut messes = self.state.lock().unwrap().messes.clone();
        messes.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(messes)
    }

    async fn hostel_ids_for_mess(&self, mess_id: DbId) -> Result<HostelSet, CoreError> {
        self.check()?;
        let state = self.state.lock().unwrap();
        Ok(state
            .hostels
            .iter()
            .filter(|(_, m)| **m == Some(mess_id))
            .map(|(h, _)| *h)
            .collect())
    }

    async fn mess_id_for_hostel(&self, hostel_id: DbId) -> Result<DbId, CoreError> {
        self.check()?;
        let state = self.state.lock().unwrap();
        Ok(state.hostels.get(&hostel_id).copied().flatten().unwrap_or(hostel_id))
    }

    async fn active_student_count(&self, hostel_ids: &HostelSet) -> Result<i64, CoreError> {
        self.check()?;
        let state = self.state.lock().unwrap();
        Ok(Self::active_in(&state, hostel_ids).len() as i64)
    }

    async fn total_student_count(&self, hostel_ids: &HostelSet) -> Result<i64, CoreError> {
        self.check()?;
        let state = self.state.lock().unwrap();
        Ok(state
            .students
            .iter()
            .filter(|s| hostel_ids.contains(&s.hostel_id))
            .count() as i64)
    }
}

impl AttendanceGateway for InMemoryGateway {
    async fn total_absent_days(
        &self,
        hostel_ids: &HostelSet,
        month: u32,
        year: i32,
    ) -> Result<i64, CoreError> {
        self.check()?;
        self.absence_scans.fetch_add(1, Ordering::SeqCst);
        let state = self.state.lock().unwrap();
        Ok(Self::active_in(&state, hostel_ids)
            .into_iter()
            .filter_map(|id| state.attendance.get(&(id, month, year)))
            .map(|(_, absent)| *absent)
            .sum())
    }

    async fn student_attendance_rows(
        &self,
        hostel_ids: &HostelSet,
        month: u32,
        year: i32,
        default_mess_days: i64,
    ) -> Result<Vec<AttendanceRow>, CoreError> {
        self.check()?;
        let state = self.state.lock().unwrap();
        let mut rows: Vec<AttendanceRow> = state
            .students
            .iter()
            .filter(|s| s.active && hostel_ids.contains(&s.hostel_id))
            .map(|s| {
                let (mess_days, absent_days) = state
                    .attendance
                    .get(&(s.id, month, year))
                    .copied()
                    .unwrap_or((default_mess_days, 0));
                AttendanceRow {
                    student_id: s.id,
                    entry_number: s.entry_number.clone(),
                    name: format!("Student {}", s.id),
                    room_number: None,
                    mess_days,
                    absent_days,
                }
            })
            .collect();
        rows.sort_by(|a, b| a.entry_number.cmp(&b.entry_number));
        Ok(rows)
    }
}

impl SettingsStore for InMemoryGateway {
    async fn get_setting(&self, key: &str, default: Decimal) -> Result<Decimal, CoreError> {
        self.check()?;
        let state = self.state.lock().unwrap();
        Ok(parse_setting(
            key,
            state.settings.get(key).map(String::as_str),
            default,
        ))
    }

    async fn set_setting(&self, key: &str, value: Decimal) -> Result<(), CoreError> {
        self.check()?;
        self.put_raw_setting(key, &value.to_string());
        Ok(())
    }
}

impl BillConfigStore for InMemoryGateway {
    async fn find_bill_config(&self, period: MessPeriod) -> Result<Option<BillConfig>, CoreError> {
        self.check()?;
        Ok(self.state.lock().unwrap().bill_configs.get(&period).cloned())
    }

    async fn save_bill_config(
        &self,
        period: MessPeriod,
        config: &BillConfig,
    ) -> Result<(), CoreError> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        state.bill_configs.insert(period, config.clone());
        state.legacy.insert(period, config.operating_days);
        Ok(())
    }

    async fn find_legacy_operating_days(
        &self,
        period: MessPeriod,
    ) -> Result<Option<i64>, CoreError> {
        self.check()?;
        let days = self.legacy_days(period);
        let pause = self.legacy_pause.lock().unwrap().take();
        if let Some((reached, release)) = pause {
            reached.notify_one();
            release.notified().await;
        }
        Ok(days)
    }

    async fn save_legacy_operating_days(
        &self,
        period: MessPeriod,
        operating_days: i64,
    ) -> Result<(), CoreError> {
        self.check()?;
        self.state
            .lock()
            .unwrap()
            .legacy
            .insert(period, operating_days);
        Ok(())
    }
}
