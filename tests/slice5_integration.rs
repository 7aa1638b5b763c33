//! Integration tests for Slice 5 - HTTP API
//!
//! Tests API endpoints against a shared router

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use ridgeline::core::create_router;
use ridgeline::types::MonitorConfig;
use serde_json::Value;
use tower::ServiceExt;

fn create_test_router() -> Router {
    create_router(MonitorConfig::default()).unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_router();
    let (status, json) = send(&app, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["cycles"], 0);
    assert!(json["version"].is_string());
    assert!(json["seal_fingerprint"].is_string());
}

#[tokio::test]
async fn test_state_not_found_before_first_cycle() {
    let app = create_test_router();
    let (status, _) = send(&app, get("/state")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cycle_then_state() {
    let app = create_test_router();

    let (status, json) = send(&app, post_json("/cycle", r#"{"g": 1.5, "c": 1.2, "m": 1.8}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["cycle"], 0);
    assert_eq!(json["indicators"]["density_status"], "THRESHOLD_NOT_MET");

    let (status, json) =
        send(&app, post_json("/cycle", r#"{"cycle": 7, "g": 40, "c": 40, "m": 40}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["indicators"]["density_status"], "THRESHOLD_MET");

    let (status, json) = send(&app, get("/state")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["cycle"], 7);

    let (_, json) = send(&app, get("/health")).await;
    assert_eq!(json["cycles"], 2);
}

#[tokio::test]
async fn test_seal_verifies_through_api() {
    let app = create_test_router();

    let (status, seal) = send(&app, get("/seal")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(seal["algorithm"], "Ed25519");

    let body = serde_json::json!({
        "public_key": seal["public_key"],
        "signature": seal["signature"],
    });
    let (status, json) = send(&app, post_json("/verify", &body.to_string())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["valid"], true);

    let body = serde_json::json!({
        "public_key": seal["public_key"],
        "signature": seal["signature"],
        "message": "CHICKA_CHICKA_BANANA",
    });
    let (_, json) = send(&app, post_json("/verify", &body.to_string())).await;
    assert_eq!(json["valid"], false);
    assert!(json["reason"].as_str().unwrap().contains("tampered"));
}

#[tokio::test]
async fn test_verify_accepts_pem_public_key() {
    let app = create_test_router();

    let (status, seal) = send(&app, get("/seal")).await;
    assert_eq!(status, StatusCode::OK);
    let pem = seal["public_key_pem"].as_str().unwrap();
    assert!(pem.starts_with("-----BEGIN PUBLIC KEY-----"));

    let body = serde_json::json!({
        "public_key": pem,
        "signature": seal["signature"],
    });
    let (status, json) = send(&app, post_json("/verify", &body.to_string())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["valid"], true);

    let body = serde_json::json!({
        "public_key": pem,
        "signature": seal["signature"],
        "message": "SOMETHING_ELSE",
    });
    let (status, json) = send(&app, post_json("/verify", &body.to_string())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["valid"], false);
}

#[tokio::test]
async fn test_verify_garbled_pem_is_bad_request() {
    let app = create_test_router();
    let body = serde_json::json!({
        "public_key": "-----BEGIN PUBLIC KEY-----\nAAAA\n-----END PUBLIC KEY-----",
        "signature": "00",
    });
    let (status, json) = send(&app, post_json("/verify", &body.to_string())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("public_key"));
}

#[tokio::test]
async fn test_verify_bad_hex_is_bad_request() {
    let app = create_test_router();
    let (status, json) = send(
        &app,
        post_json("/verify", r#"{"public_key": "zz", "signature": "00"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("public_key"));
}

#[tokio::test]
async fn test_trajectory_endpoint() {
    let app = create_test_router();

    let (status, json) = send(&app, get("/trajectory?t=0")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["value"], 2.0);

    let (status, json) = send(&app, get("/trajectory?t=0&c1=2&c2=0")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["value"], 2.0);

    let (status, _) = send(&app, get("/trajectory?t=1000")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_invalid_cycle_rejected() {
    let app = create_test_router();
    let (status, _) = send(&app, post_json("/cycle", r#"{"g": 1.0, "c": 1.0}"#)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_invalid_config_rejected() {
    let mut config = MonitorConfig::default();
    config.seal.message.clear();
    assert!(create_router(config).is_err());
}
