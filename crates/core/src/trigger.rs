//! Trigger event validation and log entry construction.
//!
//! A trigger payload is an opaque JSON object carrying a `trigger` field
//! naming the simulated contract condition. Validation checks shape and
//! trigger type only; the payload itself is never transformed, so the log
//! preserves exactly what the client sent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result, ValidationErrorCode};

/// The single recognized trigger type.
pub const VALID_TRIGGER_TYPE: &str = "follower_target_reached";

/// Fixed label written to every log entry.
pub const TRIGGER_EVENT_LABEL: &str = "Contract trigger simulated";

/// A validated trigger event.
///
/// Holds the trigger type and the full original payload.
#[derive(Debug, Clone, PartialEq)]
pub struct TriggerEvent {
    /// The recognized trigger type string.
    pub trigger: String,
    /// The complete original payload, untouched.
    pub payload: Value,
}

impl TriggerEvent {
    /// Validate a raw JSON payload into a trigger event.
    ///
    /// Rules, in order:
    /// 1. The payload must be a non-empty JSON object.
    /// 2. It must contain a `trigger` field whose value is a string.
    /// 3. The trigger type must equal [`VALID_TRIGGER_TYPE`].
    ///
    /// Pure function: no side effects, the input is not consumed.
    pub fn parse(payload: &Value) -> Result<Self> {
        let obj = match payload.as_object() {
            Some(obj) if !obj.is_empty() => obj,
            _ => {
                return Err(Error::validation(
                    ValidationErrorCode::EmptyPayload,
                    "request payload is empty",
                ))
            }
        };

        let trigger = obj
            .get("trigger")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                Error::validation(
                    ValidationErrorCode::MalformedTrigger,
                    "`trigger` field is missing or not a string",
                )
            })?;

        if trigger != VALID_TRIGGER_TYPE {
            return Err(Error::validation(
                ValidationErrorCode::UnrecognizedTrigger,
                format!("unrecognized trigger type: {}", trigger),
            ));
        }

        Ok(Self {
            trigger: trigger.to_string(),
            payload: payload.clone(),
        })
    }
}

/// A log entry for an accepted trigger, one per line in the trigger log.
///
/// Immutable once constructed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TriggerLogEntry {
    /// ISO-8601 timestamp of acceptance.
    pub timestamp: String,
    /// Fixed event label, [`TRIGGER_EVENT_LABEL`].
    pub event: String,
    /// Verbatim copy of the accepted payload.
    pub payload: Value,
}

impl TriggerLogEntry {
    /// Build a log entry for an accepted payload.
    pub fn new(received_at: DateTime<Utc>, payload: &Value) -> Self {
        Self {
            timestamp: received_at.to_rfc3339(),
            event: TRIGGER_EVENT_LABEL.to_string(),
            payload: payload.clone(),
        }
    }
}
