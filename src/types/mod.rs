//! Common types used across the analytics library.

pub mod common;
pub mod ids;
pub mod serde_helpers;

pub use common::*;
pub use ids::{AccountId, MatchId, STEAM64_OFFSET};
