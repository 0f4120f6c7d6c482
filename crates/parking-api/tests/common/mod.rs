//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use parking_allocation::domain::lot::ParkingLot;
use parking_core::clock::Clock;
use parking_core::repository::ParkingLogRepository;
use parking_core::rng::{DeterministicRng, OsSeededRng};
use parking_test_support::{FixedClock, fixed_now};
use tower::ServiceExt;

use parking_api::state::AppState;

/// Shared secret configured on every test app.
pub const API_KEY: &str = "test-api-key";

/// Build the full app router over `repo` with a real, randomly seeded RNG.
pub fn build_test_app(total_slots: u32, repo: Arc<dyn ParkingLogRepository>) -> Router {
    build_test_app_with_rng(total_slots, repo, OsSeededRng::new())
}

/// Build the full app router with a custom RNG for tests that need to know
/// which place gets picked.
pub fn build_test_app_with_rng(
    total_slots: u32,
    repo: Arc<dyn ParkingLogRepository>,
    rng: impl DeterministicRng + Send + 'static,
) -> Router {
    let clock: Arc<dyn Clock + Send + Sync> = Arc::new(FixedClock(fixed_now()));
    let rng: Arc<Mutex<dyn DeterministicRng + Send>> = Arc::new(Mutex::new(rng));
    let app_state = AppState::new(ParkingLot::new(total_slots), API_KEY, clock, rng, repo);
    parking_api::app(app_state)
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send an authenticated POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .header("X-API-Key", API_KEY)
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    send(app, request).await
}

/// Send an authenticated GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .header("X-API-Key", API_KEY)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

/// Send a GET request with an arbitrary (or no) API key.
pub async fn get_with_key(
    app: Router,
    uri: &str,
    api_key: Option<&str>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(key) = api_key {
        builder = builder.header("X-API-Key", key);
    }
    let request = builder.body(Body::empty()).unwrap();

    send(app, request).await
}

/// Request body for parking a car owned by `first_name last_name`.
pub fn park_body(first_name: &str, last_name: &str) -> serde_json::Value {
    serde_json::json!({
        "first_name": first_name,
        "last_name": last_name,
        "car_make": "Toyota",
        "license_plate": "A123BC777"
    })
}
