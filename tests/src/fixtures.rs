//! Test fixtures and payload generators.

use uuid::Uuid;

/// A valid trigger payload.
pub fn valid_trigger() -> serde_json::Value {
    serde_json::json!({
        "trigger": "follower_target_reached"
    })
}

/// A valid trigger payload carrying extra fields.
pub fn trigger_with_count(count: u64) -> serde_json::Value {
    serde_json::json!({
        "trigger": "follower_target_reached",
        "count": count,
        "source": "integration-test"
    })
}

/// A payload with an unrecognized trigger type.
pub fn wrong_trigger() -> serde_json::Value {
    serde_json::json!({
        "trigger": "wrong_event"
    })
}

/// A payload whose trigger field is not a string.
pub fn non_string_trigger() -> serde_json::Value {
    serde_json::json!({
        "trigger": 42
    })
}

/// A unique client identity, so each test gets its own limiter bucket.
pub fn unique_client() -> String {
    format!("client-{}", Uuid::new_v4())
}
