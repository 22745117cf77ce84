//! Tests for error handling in the trigger pipeline.
//!
//! Verifies the API returns the right error codes and that rejected
//! requests never reach the trigger log.

use axum::http::StatusCode;
use axum_test::TestServer;
use integration_tests::{fixtures, setup::TestContext};

/// An unrecognized trigger type is rejected and nothing is logged.
#[tokio::test]
async fn test_unrecognized_trigger_returns_400() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let response = server
        .post("/api/trigger-contract")
        .add_header("X-Forwarded-For", &fixtures::unique_client())
        .json(&fixtures::wrong_trigger())
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(
        body["code"], "VALID_003",
        "Expected VALID_003 for unrecognized trigger"
    );
    assert_eq!(ctx.captured_entry_count(), 0);
}

/// An empty JSON object is rejected as an empty payload.
#[tokio::test]
async fn test_empty_payload_returns_400() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let response = server
        .post("/api/trigger-contract")
        .add_header("X-Forwarded-For", &fixtures::unique_client())
        .json(&serde_json::json!({}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(
        body["code"], "VALID_001",
        "Expected VALID_001 for empty payload"
    );
    assert_eq!(ctx.captured_entry_count(), 0);
}

/// A body that is not JSON at all is treated as an empty payload.
#[tokio::test]
async fn test_invalid_json_returns_400() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let response = server
        .post("/api/trigger-contract")
        .content_type("application/json")
        .add_header("X-Forwarded-For", &fixtures::unique_client())
        .bytes("not json at all".into())
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(
        body["code"], "VALID_001",
        "Expected VALID_001 for invalid JSON"
    );
}

/// A payload without a `trigger` field is malformed.
#[tokio::test]
async fn test_missing_trigger_field_returns_400() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let response = server
        .post("/api/trigger-contract")
        .add_header("X-Forwarded-For", &fixtures::unique_client())
        .json(&serde_json::json!({"count": 1}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(
        body["code"], "VALID_002",
        "Expected VALID_002 for missing trigger field"
    );
}

/// A non-string `trigger` field is malformed.
#[tokio::test]
async fn test_non_string_trigger_returns_400() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let response = server
        .post("/api/trigger-contract")
        .add_header("X-Forwarded-For", &fixtures::unique_client())
        .json(&fixtures::non_string_trigger())
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(
        body["code"], "VALID_002",
        "Expected VALID_002 for non-string trigger"
    );
}

/// An oversized body is rejected before parsing.
#[tokio::test]
async fn test_oversized_payload_returns_400() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let padding = "x".repeat(65 * 1024);
    let payload = format!(r#"{{"trigger": "follower_target_reached", "padding": "{}"}}"#, padding);

    let response = server
        .post("/api/trigger-contract")
        .content_type("application/json")
        .add_header("X-Forwarded-For", &fixtures::unique_client())
        .bytes(payload.into())
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "VALID_001");
    assert_eq!(ctx.captured_entry_count(), 0);
}

/// A sink failure on a valid request still returns success to the caller.
#[tokio::test]
async fn test_sink_failure_still_returns_success() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    ctx.set_sink_failure(true);

    let response = server
        .post("/api/trigger-contract")
        .add_header("X-Forwarded-For", &fixtures::unique_client())
        .json(&fixtures::valid_trigger())
        .await;

    // Durability failure is not surfaced to the caller.
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "success");
    assert_eq!(ctx.captured_entry_count(), 0);
}
