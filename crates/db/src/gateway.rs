//! [`SqliteGateway`]: the engine's gateway traits over the repositories.

use messbill_core::bill_config::BillConfig;
use messbill_core::error::CoreError;
use messbill_core::gateway::{
    AttendanceGateway, BillConfigStore, HostelSet, RosterGateway, SettingsStore,
};
use messbill_core::roster::{AttendanceRow, Mess};
use messbill_core::settings::parse_setting;
use messbill_core::types::{DbId, MessPeriod};
use rust_decimal::Decimal;

use crate::repositories::{
    AttendanceRepo, BillConfigRepo, HostelRepo, MessRepo, OperatingDaysRepo, SettingRepo,
    StudentRepo,
};
use crate::DbPool;

/// Store failures surface to the engine as persistence errors.
fn store_error(err: sqlx::Error) -> CoreError {
    tracing::error!(error = %err, "Store operation failed");
    CoreError::Persistence(err.to_string())
}

fn id_vec(hostel_ids: &HostelSet) -> Vec<DbId> {
    hostel_ids.iter().copied().collect()
}

/// Gateway backed by a SQLite pool. Cheap to clone.
#[derive(Clone)]
pub struct SqliteGateway {
    pool: DbPool,
}

impl SqliteGateway {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

impl RosterGateway for SqliteGateway {
    async fn list_messes(&self) -> Result<Vec<Mess>, CoreError> {
        let rows = MessRepo::list(&self.pool).await.map_err(store_error)?;
        Ok(rows.into_iter().map(Mess::from).collect())
    }

    async fn hostel_ids_for_mess(&self, mess_id: DbId) -> Result<HostelSet, CoreError> {
        let ids = HostelRepo::ids_for_mess(&self.pool, mess_id)
            .await
            .map_err(store_error)?;
        Ok(ids.into_iter().collect())
    }

    async fn mess_id_for_hostel(&self, hostel_id: DbId) -> Result<DbId, CoreError> {
        let mess_id = HostelRepo::find_mess_id(&self.pool, hostel_id)
            .await
            .map_err(store_error)?
            .flatten();
        Ok(mess_id.unwrap_or(hostel_id))
    }

    async fn active_student_count(&self, hostel_ids: &HostelSet) -> Result<i64, CoreError> {
        StudentRepo::count_active(&self.pool, &id_vec(hostel_ids))
            .await
            .map_err(store_error)
    }

    async fn total_student_count(&self, hostel_ids: &HostelSet) -> Result<i64, CoreError> {
        StudentRepo::count_all(&self.pool, &id_vec(hostel_ids))
            .await
            .map_err(store_error)
    }
}

impl AttendanceGateway for SqliteGateway {
    async fn total_absent_days(
        &self,
        hostel_ids: &HostelSet,
        month: u32,
        year: i32,
    ) -> Result<i64, CoreError> {
        AttendanceRepo::total_absent_days(&self.pool, &id_vec(hostel_ids), month, year)
            .await
            .map_err(store_error)
    }

    async fn student_attendance_rows(
        &self,
        hostel_ids: &HostelSet,
        month: u32,
        year: i32,
        default_mess_days: i64,
    ) -> Result<Vec<AttendanceRow>, CoreError> {
        let rows = AttendanceRepo::listing(
            &self.pool,
            &id_vec(hostel_ids),
            month,
            year,
            default_mess_days,
        )
        .await
        .map_err(store_error)?;
        Ok(rows.into_iter().map(AttendanceRow::from).collect())
    }
}

impl SettingsStore for SqliteGateway {
    async fn get_setting(&self, key: &str, default: Decimal) -> Result<Decimal, CoreError> {
        let raw = SettingRepo::find_value(&self.pool, key)
            .await
            .map_err(store_error)?;
        Ok(parse_setting(key, raw.as_deref(), default))
    }

    async fn set_setting(&self, key: &str, value: Decimal) -> Result<(), CoreError> {
        SettingRepo::upsert(&self.pool, key, &value.to_string())
            .await
            .map_err(store_error)?;
        Ok(())
    }
}

impl BillConfigStore for SqliteGateway {
    async fn find_bill_config(&self, period: MessPeriod) -> Result<Option<BillConfig>, CoreError> {
        BillConfigRepo::find(&self.pool, period.mess_id, period.month, period.year)
            .await
            .map_err(store_error)?
            .map(|row| row.to_config())
            .transpose()
    }

    async fn save_bill_config(
        &self,
        period: MessPeriod,
        config: &BillConfig,
    ) -> Result<(), CoreError> {
        let row = BillConfigRepo::upsert_with_mirror(
            &self.pool,
            period.mess_id,
            period.month,
            period.year,
            config,
        )
        .await
        .map_err(store_error)?;
        tracing::debug!(id = row.id, %period, "Bill configuration row written");
        Ok(())
    }

    async fn find_legacy_operating_days(
        &self,
        period: MessPeriod,
    ) -> Result<Option<i64>, CoreError> {
        let row = OperatingDaysRepo::find(&self.pool, period.mess_id, period.month, period.year)
            .await
            .map_err(store_error)?;
        Ok(row.map(|r| r.operating_days))
    }

    async fn save_legacy_operating_days(
        &self,
        period: MessPeriod,
        operating_days: i64,
    ) -> Result<(), CoreError> {
        OperatingDaysRepo::upsert(
            &self.pool,
            period.mess_id,
            period.month,
            period.year,
            operating_days,
        )
        .await
        .map_err(store_error)
    }
}
