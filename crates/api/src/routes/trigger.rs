//! Trigger endpoint handler.
//!
//! The admission pipeline for `POST /api/trigger-contract`:
//! rate limit, then validate, then log, then respond. The rate limiter runs
//! before the payload is even parsed, so a client over its limit gets 429
//! regardless of what it sent.

use axum::{body::Bytes, extract::State, Json};
use chrono::Utc;
use std::time::Instant;
use telemetry::metrics;
use tracing::{debug, error, info, warn};
use trigger_core::limits::MAX_PAYLOAD_SIZE_BYTES;
use trigger_core::{TriggerEvent, TriggerLogEntry};

use crate::extractors::ClientIp;
use crate::response::{ApiError, TriggerResponse};
use crate::state::AppState;

/// POST /api/trigger-contract - Submit a simulated contract trigger.
///
/// Accepts a JSON object with a `trigger` field naming the simulated
/// contract condition. Accepted events are appended verbatim to the trigger
/// log; no smart contract is executed.
pub async fn trigger_handler(
    State(state): State<AppState>,
    ClientIp(client_ip): ClientIp,
    body: Bytes,
) -> Result<Json<TriggerResponse>, ApiError> {
    let start = Instant::now();

    metrics().triggers_received.inc();

    let decision = state.rate_limiter.check(&client_ip);
    if !decision.admitted {
        warn!(client = %client_ip, "Rate limit exceeded");
        metrics().triggers_rate_limited.inc();
        return Err(ApiError::rate_limited(
            "rate limit exceeded",
            decision.retry_after,
        ));
    }

    // Check payload size before parsing
    if body.len() > MAX_PAYLOAD_SIZE_BYTES {
        metrics().triggers_rejected_invalid.inc();
        return Err(ApiError::bad_request(format!(
            "Payload size {}KB exceeds {}KB limit",
            body.len() / 1024,
            MAX_PAYLOAD_SIZE_BYTES / 1024
        )));
    }

    debug!(
        client = %client_ip,
        payload_size = body.len(),
        "Received trigger request"
    );

    // A body that is not a JSON document carries no payload at all.
    let payload: serde_json::Value =
        serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);

    let event = TriggerEvent::parse(&payload).map_err(|e| {
        warn!(client = %client_ip, error = %e, "Invalid trigger request");
        metrics().triggers_rejected_invalid.inc();
        ApiError::from(e)
    })?;

    // A failed append is reported through logs, metrics, and sink health;
    // the caller still sees success.
    let entry = TriggerLogEntry::new(Utc::now(), &event.payload);
    match state.sink.append(&entry).await {
        Ok(()) => metrics().sink_appends.inc(),
        Err(e) => {
            error!(client = %client_ip, error = %e, "Failed to append trigger to log");
            metrics().sink_append_failures.inc();
        }
    }

    metrics().triggers_accepted.inc();

    let latency_ms = start.elapsed().as_millis() as u64;
    metrics().trigger_latency_ms.observe(latency_ms);

    info!(
        client = %client_ip,
        trigger = %event.trigger,
        latency_ms = latency_ms,
        "Contract trigger simulated"
    );

    Ok(Json(TriggerResponse::accepted(entry.timestamp)))
}
