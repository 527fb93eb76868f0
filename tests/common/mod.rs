// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::{
    body::Body,
    http::{header, Request, Response, StatusCode},
    Router,
};
use carbon_tracker::config::Config;
use carbon_tracker::db::{Db, FirestoreDb};
use carbon_tracker::middleware::auth::create_jwt;
use carbon_tracker::routes::create_router;
use carbon_tracker::services::FootprintCalculator;
use carbon_tracker::time_utils::FixedClock;
use carbon_tracker::AppState;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Connect to the Firestore emulator.
#[allow(dead_code)]
pub async fn test_db() -> Db {
    let db = FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator");
    Db::Firestore(db)
}

/// Instant the test clock is pinned to.
#[allow(dead_code)]
pub fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap()
}

/// Create a test app backed by the in-memory store and a fixed clock.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (Router, Arc<AppState>) {
    let state = Arc::new(AppState {
        config: Config::test_default(),
        db: Db::in_memory(),
        calculator: FootprintCalculator::default(),
        clock: Arc::new(FixedClock(test_now())),
    });

    (create_router(state.clone()), state)
}

/// Create a session token for a user ID.
#[allow(dead_code)]
pub fn create_test_jwt(user_id: &str, signing_key: &[u8]) -> String {
    create_jwt(user_id, signing_key, 3600).expect("Failed to create JWT")
}

/// Send a JSON request, optionally authenticated with a bearer token.
#[allow(dead_code)]
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    app.clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap()
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Register a user through the API and return (user_id, token).
#[allow(dead_code)]
pub async fn register_user(app: &Router, username: &str) -> (String, String) {
    let response = send(
        app,
        "POST",
        "/api/users/register",
        None,
        Some(serde_json::json!({
            "username": username,
            "email": format!("{username}@example.com"),
            "password": "hunter22",
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    (
        json["user"]["id"].as_str().unwrap().to_string(),
        json["token"].as_str().unwrap().to_string(),
    )
}

/// Log an activity through the API and return the stored record.
#[allow(dead_code)]
pub async fn log_activity(app: &Router, token: &str, body: Value) -> Value {
    let response = send(app, "POST", "/api/activities", Some(token), Some(body)).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}
