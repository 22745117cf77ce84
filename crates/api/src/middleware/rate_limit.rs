//! Per-client sliding-window rate limiting.
//!
//! Tracks the timestamps of admitted requests per client and rejects a
//! request once the client already has `limit` admissions inside the rolling
//! window. The window is half-open `(now - window, now]`: a hit exactly
//! `window` old no longer counts.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::warn;

use trigger_core::limits::{DEFAULT_RATE_LIMIT, DEFAULT_RATE_WINDOW_SECS, UNKNOWN_CLIENT};
use trigger_core::{Error, Result};

/// Buckets idle for this many windows are dropped by [`RateLimiter::cleanup`].
const IDLE_WINDOW_MULTIPLIER: u32 = 4;

/// Rate limiter configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Maximum admitted requests per client per window
    #[serde(default = "default_limit")]
    pub limit: u32,
    /// Window length in seconds
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,
}

fn default_limit() -> u32 {
    DEFAULT_RATE_LIMIT
}

fn default_window_secs() -> u64 {
    DEFAULT_RATE_WINDOW_SECS
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            window_secs: default_window_secs(),
        }
    }
}

impl RateLimitConfig {
    /// Reject unusable limits before the server starts.
    pub fn validate(&self) -> Result<()> {
        if self.limit < 1 {
            return Err(Error::config(format!(
                "rate limit must be at least 1, got {}",
                self.limit
            )));
        }
        if self.window_secs < 1 {
            return Err(Error::config(format!(
                "rate window must be at least 1 second, got {}",
                self.window_secs
            )));
        }
        Ok(())
    }

    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }
}

/// Admission history for one client.
struct ClientWindow {
    /// Timestamps of admitted requests, oldest first.
    hits: VecDeque<Instant>,
    /// Last time this client was seen at all, admitted or not.
    last_seen: Instant,
}

impl ClientWindow {
    fn new(now: Instant) -> Self {
        Self {
            hits: VecDeque::new(),
            last_seen: now,
        }
    }

    /// Drop hits that have left the window.
    ///
    /// A hit exactly `window` old is outside the half-open window.
    fn prune(&mut self, now: Instant, window: Duration) {
        while let Some(&oldest) = self.hits.front() {
            if now.duration_since(oldest) >= window {
                self.hits.pop_front();
            } else {
                break;
            }
        }
    }
}

/// Outcome of an admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub admitted: bool,
    /// Seconds until the oldest counted hit leaves the window.
    /// Only set on rejection.
    pub retry_after: Option<u64>,
}

/// Sliding-window rate limiter keyed by client identity.
///
/// One instance per process, owned by the application state. All buckets
/// live behind a single lock; admission checks are short and contention is
/// acceptable at simulator scale.
pub struct RateLimiter {
    buckets: Mutex<HashMap<String, ClientWindow>>,
    limit: usize,
    window: Duration,
}

impl RateLimiter {
    /// Creates a new rate limiter.
    ///
    /// Fails on an invalid configuration; limits are fixed for the life of
    /// the process.
    pub fn new(config: RateLimitConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            buckets: Mutex::new(HashMap::new()),
            limit: config.limit as usize,
            window: config.window(),
        })
    }

    /// Check whether a request from `client` is admitted right now.
    pub fn check(&self, client: &str) -> Decision {
        self.check_at(client, Instant::now())
    }

    /// Admission check at an explicit observation time.
    ///
    /// Prunes the client's hits to the window, admits and records the
    /// request if the remaining count is under the limit, otherwise rejects
    /// with the wait until the oldest hit expires. Pruning happens on
    /// rejection too, so a hammering client cannot grow its bucket.
    pub fn check_at(&self, client: &str, now: Instant) -> Decision {
        let client = if client.is_empty() {
            warn!("Request without client identity, throttling via shared bucket");
            UNKNOWN_CLIENT
        } else {
            client
        };

        let mut buckets = self.buckets.lock();
        let bucket = buckets
            .entry(client.to_string())
            .or_insert_with(|| ClientWindow::new(now));

        bucket.last_seen = now;
        bucket.prune(now, self.window);

        if bucket.hits.len() < self.limit {
            bucket.hits.push_back(now);
            return Decision {
                admitted: true,
                retry_after: None,
            };
        }

        // After pruning, every remaining hit is strictly inside the window,
        // so the remaining wait is always positive.
        let retry_after = bucket.hits.front().map(|&oldest| {
            let remaining = self.window.saturating_sub(now.duration_since(oldest));
            remaining.as_secs_f64().ceil() as u64
        });

        Decision {
            admitted: false,
            retry_after,
        }
    }

    /// Drop buckets idle for several windows to bound memory.
    pub fn cleanup(&self) {
        self.cleanup_at(Instant::now());
    }

    fn cleanup_at(&self, now: Instant) {
        let max_idle = self.window * IDLE_WINDOW_MULTIPLIER;
        let mut buckets = self.buckets.lock();
        buckets.retain(|_, bucket| now.duration_since(bucket.last_seen) < max_idle);
    }

    /// Number of client buckets currently tracked.
    pub fn tracked_clients(&self) -> usize {
        self.buckets.lock().len()
    }
}

/// Shared rate limiter state.
pub type SharedRateLimiter = Arc<RateLimiter>;
