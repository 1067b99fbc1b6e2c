//! Shared fixtures for the db integration tests.

#![allow(dead_code)]

use messbill_core::types::DbId;
use messbill_db::models::attendance::RecordAttendance;
use messbill_db::models::hostel::CreateHostel;
use messbill_db::models::mess::CreateMess;
use messbill_db::models::student::CreateStudent;
use messbill_db::repositories::{AttendanceRepo, HostelRepo, MessRepo, StudentRepo};
use messbill_db::DbPool;

/// A fresh in-memory database with all migrations applied.
pub async fn test_pool() -> DbPool {
    let pool = messbill_db::create_pool("sqlite::memory:", 1)
        .await
        .expect("in-memory pool");
    messbill_db::run_migrations(&pool)
        .await
        .expect("migrations apply");
    pool
}

pub async fn create_mess(pool: &DbPool, name: &str, code: &str) -> DbId {
    MessRepo::create(
        pool,
        &CreateMess {
            name: name.to_string(),
            code: code.to_string(),
        },
    )
    .await
    .unwrap()
    .id
}

pub async fn create_hostel(pool: &DbPool, name: &str, mess_id: Option<DbId>) -> DbId {
    HostelRepo::create(
        pool,
        &CreateHostel {
            name: name.to_string(),
            mess_id,
        },
    )
    .await
    .unwrap()
    .id
}

pub async fn create_student(
    pool: &DbPool,
    entry_number: &str,
    hostel_id: DbId,
    is_active: bool,
) -> DbId {
    StudentRepo::create(
        pool,
        &CreateStudent {
            entry_number: entry_number.to_string(),
            name: format!("Student {entry_number}"),
            hostel_id,
            room_number: Some("A-101".to_string()),
            is_active: Some(is_active),
        },
    )
    .await
    .unwrap()
    .id
}

/// `count` active students in `hostel_id`, entry numbers `{prefix}0000..`.
pub async fn create_students(pool: &DbPool, prefix: &str, count: usize, hostel_id: DbId) -> Vec<DbId> {
    let mut ids = Vec::with_capacity(count);
    for n in 0..count {
        ids.push(create_student(pool, &format!("{prefix}{n:04}"), hostel_id, true).await);
    }
    ids
}

pub async fn record(
    pool: &DbPool,
    student_id: DbId,
    month: u32,
    year: i32,
    operating_days: i64,
    absent_days: i64,
) {
    AttendanceRepo::upsert(
        pool,
        &RecordAttendance {
            student_id,
            month,
            year,
            operating_days,
            absent_days,
        },
    )
    .await
    .unwrap();
}
