//! Fixed-window request limiting keyed by client address.
//!
//! Counters live in process memory and reset implicitly when their window
//! expires; nothing is persisted or shared across instances. The limiter
//! sits behind the [`RateLimit`] trait so a distributed implementation can
//! replace it without touching the request handlers.

use dashmap::DashMap;
use std::time::{Duration, Instant};

/// Request admission control keyed by client address.
pub trait RateLimit: Send + Sync {
    /// Admit or reject one request for `key`. Rejection carries the whole
    /// seconds until the window resets (the `retryAfter` hint).
    fn check(&self, key: &str) -> Result<(), u64>;
}

/// In-memory fixed-window counter.
pub struct FixedWindowLimiter {
    max_requests: u32,
    window: Duration,
    buckets: DashMap<String, Window>,
}

struct Window {
    started: Instant,
    count: u32,
}

impl FixedWindowLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            buckets: DashMap::new(),
        }
    }
}

impl RateLimit for FixedWindowLimiter {
    fn check(&self, key: &str) -> Result<(), u64> {
        let now = Instant::now();
        let mut bucket = self.buckets.entry(key.to_string()).or_insert(Window {
            started: now,
            count: 0,
        });

        let elapsed = now.duration_since(bucket.started);
        if elapsed >= self.window {
            bucket.started = now;
            bucket.count = 0;
        }

        if bucket.count < self.max_requests {
            bucket.count += 1;
            return Ok(());
        }

        let remaining = self.window.saturating_sub(now.duration_since(bucket.started));
        Err((remaining.as_millis() as f64 / 1000.0).round() as u64)
    }
}
