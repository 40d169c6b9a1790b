//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use bytes::Bytes;
use l1_cache::{api::create_router, AppState, L1Cache};
use serde_json::Value;
use tower::ServiceExt;

// == Helper Functions ==

fn create_test_state() -> AppState {
    AppState::new(L1Cache::new(1).unwrap())
}

fn create_test_app() -> Router {
    create_router(create_test_state())
}

async fn body_to_bytes(body: Body) -> Bytes {
    axum::body::to_bytes(body, usize::MAX).await.unwrap()
}

async fn body_to_json(body: Body) -> Value {
    serde_json::from_slice(&body_to_bytes(body).await).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

// == PING Endpoint Tests ==

#[tokio::test]
async fn test_ping_endpoint() {
    let app = create_test_app();

    let response = app.oneshot(get("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_to_bytes(response.into_body()).await, "pong");
}

#[tokio::test]
async fn test_unknown_path_returns_404() {
    let app = create_test_app();

    let response = app.oneshot(get("/unknown")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cache_data_is_not_exposed() {
    let app = create_test_app();

    let response = app.oneshot(get("/get/key")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// == STATS Endpoint Tests ==

#[tokio::test]
async fn test_stats_endpoint() {
    let state = create_test_state();
    let app = create_router(state.clone());

    // Fill the budget and force one eviction
    for i in 0..11 {
        state
            .cache
            .store(format!("key_{}", i), vec![0u8; 100 * 1024])
            .unwrap();
    }
    assert!(state.cache.get("key_10").is_some());
    assert!(state.cache.get("key_0").is_none());

    let response = app.oneshot(get("/stats")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["hits"], 1);
    assert_eq!(json["misses"], 1);
    assert_eq!(json["evictions"], 1);
    assert_eq!(json["item_count"], 10);
    assert_eq!(json["used_bytes"], 10 * 100 * 1024);
    assert_eq!(json["max_bytes"], 1_048_576);
    assert_eq!(json["hit_rate"], 0.5);
}

// == HEALTH Endpoint Tests ==

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app();

    let response = app.oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"].as_str().unwrap(), "healthy");
    assert!(json.get("timestamp").is_some());
}
