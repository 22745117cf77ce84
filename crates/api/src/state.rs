//! Application state shared across handlers.

use crate::middleware::rate_limit::{RateLimitConfig, RateLimiter, SharedRateLimiter};
use sink::TriggerSink;
use std::sync::Arc;
use std::time::Duration;
use trigger_core::Result;

/// How often the idle-bucket sweep runs.
const CLEANUP_INTERVAL: Duration = Duration::from_secs(300);

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Trigger log sink (file-backed in production, mock in tests)
    pub sink: Arc<dyn TriggerSink>,
    /// Rate limiter
    pub rate_limiter: SharedRateLimiter,
}

impl AppState {
    /// Create state with the default rate limit configuration.
    pub fn new(sink: Arc<dyn TriggerSink>) -> Self {
        Self::with_rate_limit(sink, RateLimitConfig::default())
            .expect("Default rate limit config is valid")
    }

    /// Create with custom rate limit config.
    ///
    /// Fails on an invalid limit or window; callers surface this at startup.
    pub fn with_rate_limit(
        sink: Arc<dyn TriggerSink>,
        rate_config: RateLimitConfig,
    ) -> Result<Self> {
        Ok(Self {
            sink,
            rate_limiter: Arc::new(RateLimiter::new(rate_config)?),
        })
    }

    /// Start the rate limiter cleanup background task.
    /// Returns a handle that can be used to cancel the task.
    pub fn start_rate_limiter_cleanup(&self) -> tokio::task::JoinHandle<()> {
        let rate_limiter = self.rate_limiter.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(CLEANUP_INTERVAL);
            loop {
                interval.tick().await;
                rate_limiter.cleanup();
            }
        })
    }
}
