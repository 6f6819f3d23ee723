//! Rate limiting for the OpenDota API.
//!
//! The free tier of OpenDota allows 60 requests per minute. Every upstream
//! call in this crate goes through a shared [`RateLimiter`], which suspends
//! the caller instead of rejecting when the quota is used up.
//!
//! ## Example
//!
//! ```rust,ignore
//! use dota_analytics::opendota::OpenDotaClient;
//! use dota_analytics::rate_limit::{RateLimitConfig, RateLimitedClient};
//!
//! // Wrap a client with automatic rate limiting
//! let client = RateLimitedClient::new(OpenDotaClient::new(), RateLimitConfig::default());
//!
//! // All requests wait for quota first
//! let heroes = client.get_heroes().await?;
//! ```

mod client;
mod limiter;
mod window;

pub use client::RateLimitedClient;
pub use limiter::RateLimiter;
pub use window::FixedWindow;

use std::time::Duration;

/// Default number of requests per window.
pub const DEFAULT_MAX_REQUESTS: u32 = 60;

/// Default window length.
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(60);

/// Rate limiter configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Requests allowed per window.
    pub max_requests: u32,
    /// Window length.
    pub window: Duration,
    /// Whether to enable rate limiting.
    pub enabled: bool,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: DEFAULT_MAX_REQUESTS,
            window: DEFAULT_WINDOW,
            enabled: true,
        }
    }
}
