//! Durable append-only storage for accepted trigger events.

pub mod config;
pub mod jsonl;

pub use config::*;
pub use jsonl::*;

use async_trait::async_trait;
use trigger_core::{Result, TriggerLogEntry};

/// Append-only store for accepted trigger events.
///
/// Any durable append-capable backend satisfies this contract; production
/// uses [`JsonlSink`], tests inject a capturing mock.
#[async_trait]
pub trait TriggerSink: Send + Sync {
    /// Append one log entry. A single attempt, no retries.
    async fn append(&self, entry: &TriggerLogEntry) -> Result<()>;

    /// Whether the sink considers itself able to append.
    fn is_healthy(&self) -> bool;
}
