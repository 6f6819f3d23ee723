//! Runtime configuration.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use crate::cache::{DEFAULT_CONNECT_TIMEOUT, DEFAULT_REDIS_URL};
use crate::error::AnalyticsError;
use crate::opendota::{DEFAULT_TIMEOUT, OPENDOTA_BASE_URL};
use crate::rate_limit::RateLimitConfig;

pub const ENV_BASE_URL: &str = "OPENDOTA_BASE_URL";
pub const ENV_RATE_LIMIT: &str = "OPENDOTA_RATE_LIMIT";
pub const ENV_RATE_WINDOW_SECS: &str = "OPENDOTA_RATE_WINDOW_SECS";
pub const ENV_REDIS_URL: &str = "REDIS_URL";
pub const ENV_REDIS_CONNECT_TIMEOUT_MS: &str = "REDIS_CONNECT_TIMEOUT_MS";

/// Everything needed to wire up [`PlayerAnalytics`](crate::service::PlayerAnalytics).
///
/// ```rust
/// use std::time::Duration;
/// use dota_analytics::config::AnalyticsConfig;
///
/// let config = AnalyticsConfig::default()
///     .with_base_url("http://localhost:8080/api")
///     .with_rate_limit(30, Duration::from_secs(60));
/// assert_eq!(config.rate_limit.max_requests, 30);
/// ```
pub struct AnalyticsConfig {
    pub base_url: String,
    pub request_timeout: Duration,
    pub user_agent: Option<String>,
    pub rate_limit: RateLimitConfig,
    redis_url: SecretString,
    pub redis_connect_timeout: Duration,
}

impl AnalyticsConfig {
    /// Read configuration from the process environment.
    ///
    /// Unset variables keep their defaults; malformed numbers and base URLs
    /// are an error.
    pub fn from_env() -> Result<Self, AnalyticsError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to
    /// its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AnalyticsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_BASE_URL) {
            url::Url::parse(&url)?;
            config = config.with_base_url(url);
        }
        if let Some(limit) = lookup(ENV_RATE_LIMIT) {
            config.rate_limit.max_requests = parse_number(ENV_RATE_LIMIT, &limit)?;
        }
        if let Some(secs) = lookup(ENV_RATE_WINDOW_SECS) {
            config.rate_limit.window = Duration::from_secs(parse_number(ENV_RATE_WINDOW_SECS, &secs)?);
        }
        if let Some(url) = lookup(ENV_REDIS_URL) {
            config.redis_url = SecretString::from(url);
        }
        if let Some(ms) = lookup(ENV_REDIS_CONNECT_TIMEOUT_MS) {
            config.redis_connect_timeout =
                Duration::from_millis(parse_number(ENV_REDIS_CONNECT_TIMEOUT_MS, &ms)?);
        }

        Ok(config)
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn with_rate_limit(mut self, max_requests: u32, window: Duration) -> Self {
        self.rate_limit.max_requests = max_requests;
        self.rate_limit.window = window;
        self
    }

    /// Turn off client-side throttling.
    pub fn without_rate_limit(mut self) -> Self {
        self.rate_limit.enabled = false;
        self
    }

    pub fn with_redis_url(mut self, url: impl Into<String>) -> Self {
        self.redis_url = SecretString::from(url.into());
        self
    }

    pub fn with_redis_connect_timeout(mut self, timeout: Duration) -> Self {
        self.redis_connect_timeout = timeout;
        self
    }

    /// The Redis connection string, which may contain a password.
    pub fn redis_url(&self) -> &SecretString {
        &self.redis_url
    }

    /// Exposes the Redis URL - use carefully.
    pub fn expose_redis_url(&self) -> &str {
        self.redis_url.expose_secret()
    }
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            base_url: OPENDOTA_BASE_URL.to_string(),
            request_timeout: DEFAULT_TIMEOUT,
            user_agent: None,
            rate_limit: RateLimitConfig::default(),
            redis_url: SecretString::from(DEFAULT_REDIS_URL),
            redis_connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }
}

impl Clone for AnalyticsConfig {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            request_timeout: self.request_timeout,
            user_agent: self.user_agent.clone(),
            rate_limit: self.rate_limit.clone(),
            redis_url: SecretString::from(self.redis_url.expose_secret()),
            redis_connect_timeout: self.redis_connect_timeout,
        }
    }
}

impl std::fmt::Debug for AnalyticsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalyticsConfig")
            .field("base_url", &self.base_url)
            .field("request_timeout", &self.request_timeout)
            .field("user_agent", &self.user_agent)
            .field("rate_limit", &self.rate_limit)
            .field("redis_url", &"[REDACTED]")
            .field("redis_connect_timeout", &self.redis_connect_timeout)
            .finish()
    }
}

fn parse_number<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, AnalyticsError> {
    value
        .trim()
        .parse()
        .map_err(|_| AnalyticsError::InvalidInput(format!("{name} is not a valid number: {value}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AnalyticsConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.base_url, OPENDOTA_BASE_URL);
        assert_eq!(config.rate_limit, RateLimitConfig::default());
        assert_eq!(config.expose_redis_url(), DEFAULT_REDIS_URL);
        assert_eq!(config.redis_connect_timeout, Duration::from_secs(2));
    }

    #[test]
    fn test_reads_variables() {
        let config = AnalyticsConfig::from_lookup(lookup(&[
            (ENV_BASE_URL, "http://127.0.0.1:9000/api/"),
            (ENV_RATE_LIMIT, "120"),
            (ENV_RATE_WINDOW_SECS, "30"),
            (ENV_REDIS_URL, "redis://:hunter2@cache:6379"),
            (ENV_REDIS_CONNECT_TIMEOUT_MS, "500"),
        ]))
        .unwrap();

        assert_eq!(config.base_url, "http://127.0.0.1:9000/api");
        assert_eq!(config.rate_limit.max_requests, 120);
        assert_eq!(config.rate_limit.window, Duration::from_secs(30));
        assert_eq!(config.redis_connect_timeout, Duration::from_millis(500));
        assert_eq!(config.expose_redis_url(), "redis://:hunter2@cache:6379");
    }

    #[test]
    fn test_malformed_number_rejected() {
        let result = AnalyticsConfig::from_lookup(lookup(&[(ENV_RATE_LIMIT, "sixty")]));
        assert!(matches!(result, Err(AnalyticsError::InvalidInput(_))));
    }

    #[test]
    fn test_relative_base_url_rejected() {
        let result = AnalyticsConfig::from_lookup(lookup(&[(ENV_BASE_URL, "api.opendota.com")]));
        assert!(matches!(result, Err(AnalyticsError::Url(_))));
    }

    #[test]
    fn test_debug_redacts_redis_url() {
        let config = AnalyticsConfig::default().with_redis_url("redis://:hunter2@cache:6379");
        let debug = format!("{config:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("[REDACTED]"));
    }
}
