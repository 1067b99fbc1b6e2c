#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use messbill_core::types::DbId;
use messbill_db::models::attendance::RecordAttendance;
use messbill_db::models::hostel::CreateHostel;
use messbill_db::models::mess::CreateMess;
use messbill_db::models::student::CreateStudent;
use messbill_db::repositories::{AttendanceRepo, HostelRepo, MessRepo, StudentRepo};
use messbill_db::DbPool;
use tower::ServiceExt;

use messbill_api::config::ServerConfig;
use messbill_api::router::build_app_router;
use messbill_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: "sqlite::memory:".to_string(),
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        db_max_connections: 1,
    }
}

/// A fresh migrated in-memory database.
pub async fn test_pool() -> DbPool {
    let pool = messbill_db::create_pool("sqlite::memory:", 1)
        .await
        .expect("in-memory pool");
    messbill_db::run_migrations(&pool)
        .await
        .expect("migrations apply");
    pool
}

/// Build the full application router, middleware included.
///
/// The returned router owns one engine (and one stats cache); clone it to
/// send several requests against the same cache.
pub fn build_test_app(pool: DbPool) -> Router {
    let config = test_config();
    let state = AppState::new(pool, config.clone());
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn send(app: Router, method: Method, uri: &str, body: Option<serde_json::Value>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Seed data
// ---------------------------------------------------------------------------

/// One mess ("SHM") with 50 active students over two hostels and 40 absent
/// days in June 2024. Returns the mess id.
pub async fn seed_reference_mess(pool: &DbPool) -> DbId {
    let mess = MessRepo::create(
        pool,
        &CreateMess {
            name: "Shivalik Hostel Mess".to_string(),
            code: "SHM".to_string(),
        },
    )
    .await
    .unwrap()
    .id;

    let mut first_four = Vec::new();
    for (hostel_name, prefix, count) in [("North", "23N", 30), ("South", "24S", 20)] {
        let hostel = HostelRepo::create(
            pool,
            &CreateHostel {
                name: hostel_name.to_string(),
                mess_id: Some(mess),
            },
        )
        .await
        .unwrap()
        .id;
        for n in 0..count {
            let student = StudentRepo::create(
                pool,
                &CreateStudent {
                    entry_number: format!("{prefix}{n:04}"),
                    name: format!("Student {prefix}{n}"),
                    hostel_id: hostel,
                    room_number: None,
                    is_active: None,
                },
            )
            .await
            .unwrap();
            if first_four.len() < 4 {
                first_four.push(student.id);
            }
        }
    }

    for student_id in first_four {
        AttendanceRepo::upsert(
            pool,
            &RecordAttendance {
                student_id,
                month: 6,
                year: 2024,
                operating_days: 30,
                absent_days: 10,
            },
        )
        .await
        .unwrap();
    }
    mess
}

/// Create a mess that has no hostels.
pub async fn seed_empty_mess(pool: &DbPool) -> DbId {
    MessRepo::create(
        pool,
        &CreateMess {
            name: "Annex Mess".to_string(),
            code: "ANX".to_string(),
        },
    )
    .await
    .unwrap()
    .id
}
