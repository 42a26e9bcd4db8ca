//! Per-token Rate Limiting
//!
//! Fixed-window counter keyed by the authorized token. Off unless a
//! per-minute budget is configured.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, warn};

#[derive(Clone)]
pub struct RateLimiter {
    // token -> (request_count, window_start)
    limits: Arc<RwLock<HashMap<String, (u32, Instant)>>>,
    pub max_requests: u32,
    pub window: Duration,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            limits: Arc::new(RwLock::new(HashMap::new())),
            max_requests,
            window,
        }
    }

    /// `None` when `per_minute` is 0.
    pub fn per_minute(per_minute: u32) -> Option<Self> {
        (per_minute > 0).then(|| Self::new(per_minute, Duration::from_secs(60)))
    }

    /// Count a request for `key` and report whether it is within budget.
    pub async fn check_limit(&self, key: &str) -> bool {
        let mut limits = self.limits.write().await;
        let now = Instant::now();

        let state = limits.entry(key.to_string()).or_insert((0, now));

        if now.duration_since(state.1) >= self.window {
            state.0 = 1;
            state.1 = now;
            return true;
        }

        state.0 += 1;
        if state.0 > self.max_requests {
            warn!(count = state.0, max = self.max_requests, "Rate limit exceeded");
            false
        } else {
            debug!(count = state.0, max = self.max_requests, "Rate limit OK");
            true
        }
    }

    /// Drop windows that have expired.
    pub async fn cleanup(&self) {
        let now = Instant::now();
        let window = self.window;
        self.limits
            .write()
            .await
            .retain(|_, (_, start)| now.duration_since(*start) < window);
    }

    /// Periodically free expired windows so idle tokens do not accumulate.
    pub fn spawn_cleanup_loop(&self) {
        let limiter = self.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(limiter.window);
            loop {
                interval.tick().await;
                limiter.cleanup().await;
            }
        });
    }
}
