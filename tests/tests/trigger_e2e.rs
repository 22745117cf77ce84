//! End-to-end tests for the trigger pipeline.
//!
//! Drives the real router over a mock sink and verifies accepted triggers
//! land in the log verbatim.

use axum_test::TestServer;
use integration_tests::{fixtures, setup::TestContext};
use trigger_core::trigger::TRIGGER_EVENT_LABEL;

#[tokio::test]
async fn test_valid_trigger_accepted() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let response = server
        .post("/api/trigger-contract")
        .add_header("X-Forwarded-For", &fixtures::unique_client())
        .json(&fixtures::valid_trigger())
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Smart contract trigger simulated");
    assert!(body["timestamp"].is_string());

    assert_eq!(ctx.captured_entry_count(), 1);
    let entry = &ctx.captured_entries()[0];
    assert_eq!(entry.event, TRIGGER_EVENT_LABEL);
}

/// Extra payload fields are logged verbatim, nothing is stripped.
#[tokio::test]
async fn test_payload_logged_verbatim() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let payload = fixtures::trigger_with_count(42);
    let response = server
        .post("/api/trigger-contract")
        .add_header("X-Forwarded-For", &fixtures::unique_client())
        .json(&payload)
        .await;

    response.assert_status_ok();

    let entries = ctx.captured_entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].payload, payload);
    assert_eq!(entries[0].payload["count"], 42);
}

/// The response timestamp is the log entry's timestamp.
#[tokio::test]
async fn test_response_timestamp_matches_log_entry() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let response = server
        .post("/api/trigger-contract")
        .add_header("X-Forwarded-For", &fixtures::unique_client())
        .json(&fixtures::valid_trigger())
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();

    let entries = ctx.captured_entries();
    assert_eq!(body["timestamp"], entries[0].timestamp.as_str());
}

#[tokio::test]
async fn test_triggers_logged_in_order() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");
    let client = fixtures::unique_client();

    for count in 1..=3 {
        let response = server
            .post("/api/trigger-contract")
            .add_header("X-Forwarded-For", &client)
            .json(&fixtures::trigger_with_count(count))
            .await;
        response.assert_status_ok();
    }

    let entries = ctx.captured_entries();
    assert_eq!(entries.len(), 3);
    for (i, entry) in entries.iter().enumerate() {
        assert_eq!(entry.payload["count"], (i + 1) as u64);
    }
}
