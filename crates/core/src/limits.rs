//! Defaults and size limits for the trigger simulator.
//!
//! Rate limit defaults match the webhook contract: 10 requests per client
//! per rolling 60-second window.

// === Rate Limiting ===

/// Default maximum admitted requests per client per window.
pub const DEFAULT_RATE_LIMIT: u32 = 10;

/// Default rolling window length in seconds.
pub const DEFAULT_RATE_WINDOW_SECS: u64 = 60;

/// Bucket identity used when the transport cannot supply a client address.
///
/// Unidentified clients share this bucket so they are still limited as a
/// group instead of bypassing the limiter entirely.
pub const UNKNOWN_CLIENT: &str = "unknown";

// === Payload Limits ===

/// Maximum request body size in bytes (64KB).
///
/// Trigger payloads are small JSON objects; anything larger is rejected
/// before parsing to keep the working set predictable.
pub const MAX_PAYLOAD_SIZE_BYTES: usize = 64 * 1024;

// === Log Sink ===

/// Default trigger log file, one JSON object per line.
pub const DEFAULT_LOG_FILE: &str = "contract_trigger_log.json";

// === Server ===

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 5000;
