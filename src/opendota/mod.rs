//! OpenDota stats API client.
//!
//! # Trait-based API
//!
//! The [`StatsApi`] trait abstracts all upstream reads, enabling:
//! - Fakes for testing the analytics layer
//! - Decorators (e.g. [`RateLimitedClient`](crate::rate_limit::RateLimitedClient))
//!
//! ```rust,ignore
//! use dota_analytics::opendota::{OpenDotaClient, StatsApi};
//!
//! async fn catalog<C: StatsApi>(client: &C) -> dota_analytics::Result<usize> {
//!     Ok(client.get_heroes().await?.len())
//! }
//! ```

mod client;
pub mod endpoints;
mod traits;
pub mod types;

pub use client::{DEFAULT_TIMEOUT, OpenDotaClient, OpenDotaClientBuilder};
pub(crate) use client::validate_search_term;
pub use endpoints::OPENDOTA_BASE_URL;
pub use traits::StatsApi;
pub use types::*;
