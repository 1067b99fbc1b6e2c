//! Connect, migrate, verify schema and seed data.

mod common;

use messbill_db::repositories::SettingRepo;

#[tokio::test]
async fn test_full_bootstrap() {
    let pool = common::test_pool().await;

    messbill_db::health_check(&pool).await.unwrap();

    let tables = [
        "messes",
        "hostels",
        "students",
        "student_attendance",
        "settings",
        "bill_configurations",
        "mess_operation_days",
    ];
    for table in tables {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = $1",
        )
        .bind(table)
        .fetch_one(&pool)
        .await
        .unwrap_or_else(|e| panic!("{table} lookup failed: {e}"));
        assert_eq!(count.0, 1, "{table} should exist");
    }
}

#[tokio::test]
async fn default_rates_are_seeded() {
    let pool = common::test_pool().await;

    let settings = SettingRepo::list(&pool).await.unwrap();
    let pairs: Vec<(&str, &str)> = settings
        .iter()
        .map(|s| (s.key.as_str(), s.value.as_str()))
        .collect();
    assert_eq!(pairs, vec![("gst_percent", "5"), ("per_day_rate", "120")]);
}

#[tokio::test]
async fn migrations_are_idempotent() {
    let pool = common::test_pool().await;
    messbill_db::run_migrations(&pool).await.unwrap();
}
