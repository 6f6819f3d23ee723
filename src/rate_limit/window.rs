//! Fixed-window request counter.
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use dota_analytics::rate_limit::FixedWindow;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let mut window = FixedWindow::new(Duration::from_secs(60), 2);
//! assert!(window.try_acquire().is_ok());
//! assert!(window.try_acquire().is_ok());
//! // Quota used up: told how long until the window rolls over.
//! assert!(window.try_acquire().is_err());
//! # }
//! ```

use std::time::Duration;

use tokio::time::Instant;

/// Counts requests per window.
///
/// The first window opens when the counter is created. Each later window
/// opens at the first request after the previous one elapsed.
#[derive(Debug)]
pub struct FixedWindow {
    window: Duration,
    max_requests: u32,
    count: u32,
    window_start: Instant,
}

impl FixedWindow {
    /// Create a window allowing `max_requests` per `window`.
    ///
    /// A quota of zero is treated as one.
    pub fn new(window: Duration, max_requests: u32) -> Self {
        Self {
            window,
            max_requests: max_requests.max(1),
            count: 0,
            window_start: Instant::now(),
        }
    }

    /// Try to take one unit of quota.
    ///
    /// Returns `Err(remaining)` with the time left in the current window when
    /// the quota is exhausted.
    pub fn try_acquire(&mut self) -> Result<(), Duration> {
        self.roll();

        if self.count < self.max_requests {
            self.count += 1;
            Ok(())
        } else {
            Err(self.window.saturating_sub(self.window_start.elapsed()))
        }
    }

    /// Remaining quota in the current window.
    pub fn remaining(&self) -> u32 {
        if self.window_start.elapsed() >= self.window {
            self.max_requests
        } else {
            self.max_requests - self.count
        }
    }

    pub fn max_requests(&self) -> u32 {
        self.max_requests
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    fn roll(&mut self) {
        if self.window_start.elapsed() >= self.window {
            self.count = 0;
            self.window_start = Instant::now();
        }
    }
}
