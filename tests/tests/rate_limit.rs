//! Tests for per-client rate limiting at the HTTP boundary.

use axum::http::StatusCode;
use axum_test::TestServer;
use integration_tests::{fixtures, setup::TestContext};

use api::middleware::rate_limit::RateLimitConfig;

fn small_limit(limit: u32) -> RateLimitConfig {
    RateLimitConfig {
        limit,
        window_secs: 60,
    }
}

/// Requests beyond the limit get 429 with a retry hint.
#[tokio::test]
async fn test_limit_exceeded_returns_429() {
    let ctx = TestContext::with_rate_limit(small_limit(2));
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");
    let client = fixtures::unique_client();

    for _ in 0..2 {
        let response = server
            .post("/api/trigger-contract")
            .add_header("X-Forwarded-For", &client)
            .json(&fixtures::valid_trigger())
            .await;
        response.assert_status_ok();
    }

    let response = server
        .post("/api/trigger-contract")
        .add_header("X-Forwarded-For", &client)
        .json(&fixtures::valid_trigger())
        .await;

    response.assert_status(StatusCode::TOO_MANY_REQUESTS);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "RATE_001");

    let retry_after = body["retry_after_seconds"]
        .as_u64()
        .expect("429 body carries retry_after_seconds");
    assert!(retry_after >= 1 && retry_after <= 60);

    // The same hint rides on the Retry-After header.
    let header: u64 = response
        .header("Retry-After")
        .to_str()
        .unwrap()
        .parse()
        .unwrap();
    assert_eq!(header, retry_after);

    // Only the two admitted requests were logged.
    assert_eq!(ctx.captured_entry_count(), 2);
}

/// Each client has its own budget.
#[tokio::test]
async fn test_clients_have_independent_budgets() {
    let ctx = TestContext::with_rate_limit(small_limit(1));
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let first = fixtures::unique_client();
    let second = fixtures::unique_client();

    server
        .post("/api/trigger-contract")
        .add_header("X-Forwarded-For", &first)
        .json(&fixtures::valid_trigger())
        .await
        .assert_status_ok();

    let response = server
        .post("/api/trigger-contract")
        .add_header("X-Forwarded-For", &first)
        .json(&fixtures::valid_trigger())
        .await;
    response.assert_status(StatusCode::TOO_MANY_REQUESTS);

    // An exhausted neighbor does not affect this client.
    server
        .post("/api/trigger-contract")
        .add_header("X-Forwarded-For", &second)
        .json(&fixtures::valid_trigger())
        .await
        .assert_status_ok();
}

/// A rate-limited client gets 429 even for a malformed payload; the limiter
/// runs before validation.
#[tokio::test]
async fn test_rate_limited_malformed_payload_gets_429() {
    let ctx = TestContext::with_rate_limit(small_limit(1));
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");
    let client = fixtures::unique_client();

    server
        .post("/api/trigger-contract")
        .add_header("X-Forwarded-For", &client)
        .json(&fixtures::valid_trigger())
        .await
        .assert_status_ok();

    let response = server
        .post("/api/trigger-contract")
        .content_type("application/json")
        .add_header("X-Forwarded-For", &client)
        .bytes("not json at all".into())
        .await;

    response.assert_status(StatusCode::TOO_MANY_REQUESTS);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "RATE_001");
}

/// Rejected requests are not logged.
#[tokio::test]
async fn test_rejected_requests_are_not_logged() {
    let ctx = TestContext::with_rate_limit(small_limit(1));
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");
    let client = fixtures::unique_client();

    for _ in 0..5 {
        server
            .post("/api/trigger-contract")
            .add_header("X-Forwarded-For", &client)
            .json(&fixtures::valid_trigger())
            .await;
    }

    assert_eq!(ctx.captured_entry_count(), 1);
}
