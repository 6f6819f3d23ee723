//! # Dota Analytics
//!
//! The data-access core of a Dota 2 player dashboard, sourced from the public
//! [OpenDota](https://docs.opendota.com) API.
//!
//! ## Features
//!
//! - Typed OpenDota client with a shared, awaitable rate limiter
//! - Two-tier cache: Redis with an in-process fallback that never fails callers
//! - Derived metrics: comfort score, roles and versatility, trends, heatmap,
//!   peer synergy and session summaries
//! - Rule-based coaching insights
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dota_analytics::config::AnalyticsConfig;
//! use dota_analytics::service::PlayerAnalytics;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let analytics = PlayerAnalytics::from_config(&AnalyticsConfig::from_env()?);
//!     let insights = analytics.insights("86745912".parse()?).await?;
//!     println!("Rating: {}", insights.data.summary.overall_rating);
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod insights;
pub mod opendota;
pub mod rate_limit;
pub mod service;
pub mod stats;
pub mod types;

#[cfg(test)]
mod testing;

// Re-export commonly used types at crate root
pub use error::{AnalyticsError, UpstreamError};
pub use types::{AccountId, MatchId, Role, Side};

/// Result type alias using AnalyticsError
pub type Result<T> = std::result::Result<T, AnalyticsError>;
