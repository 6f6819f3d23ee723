//! Shared, awaitable rate limiter.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

use crate::rate_limit::{FixedWindow, RateLimitConfig};

/// Suspends callers until another upstream request fits the quota.
///
/// Clones share the same window. Waiters are served in arrival order: the
/// lock is held while sleeping, and tokio's mutex is fair.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    config: RateLimitConfig,
    window: Arc<Mutex<FixedWindow>>,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        let window = FixedWindow::new(config.window, config.max_requests);
        Self {
            config,
            window: Arc::new(Mutex::new(window)),
        }
    }

    /// A limiter with the default OpenDota quota (60 requests per minute).
    pub fn opendota() -> Self {
        Self::new(RateLimitConfig::default())
    }

    /// Wait until one more request is allowed, then take it.
    ///
    /// Never fails. Dropping the returned future before it completes gives
    /// up the place in line without consuming quota.
    pub async fn acquire(&self) {
        if !self.config.enabled {
            return;
        }

        let mut window = self.window.lock().await;
        loop {
            match window.try_acquire() {
                Ok(()) => return,
                Err(wait_time) => {
                    tracing::debug!(wait_ms = wait_time.as_millis() as u64, "rate limit reached, waiting");
                    tokio::time::sleep(wait_time).await;
                }
            }
        }
    }

    /// Remaining quota in the current window, or `None` while another caller
    /// holds the limiter.
    pub fn remaining(&self) -> Option<u32> {
        self.window.try_lock().ok().map(|w| w.remaining())
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    pub fn window(&self) -> Duration {
        self.config.window
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::opendota()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_disabled_never_waits() {
        let limiter = RateLimiter::new(RateLimitConfig {
            max_requests: 1,
            window: Duration::from_secs(60),
            enabled: false,
        });

        let start = tokio::time::Instant::now();
        for _ in 0..10 {
            limiter.acquire().await;
        }
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_clones_share_quota() {
        let limiter = RateLimiter::new(RateLimitConfig {
            max_requests: 2,
            window: Duration::from_secs(10),
            enabled: true,
        });
        let clone = limiter.clone();

        limiter.acquire().await;
        clone.acquire().await;
        assert_eq!(limiter.remaining(), Some(0));

        let start = tokio::time::Instant::now();
        clone.acquire().await;
        assert_eq!(start.elapsed(), Duration::from_secs(10));
    }
}
