//! Validated identifiers.
//!
//! Everything that ends up in an upstream URL goes through these types, so a
//! malformed id is rejected with [`AnalyticsError::InvalidInput`] before any
//! rate-limit quota is spent.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AnalyticsError;

/// Offset between a Steam64 id and the 32-bit account id.
pub const STEAM64_OFFSET: u64 = 76_561_197_960_265_728;

const STEAM64_PREFIX: &str = "7656119";

/// A 32-bit Steam account id as used by OpenDota.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(u32);

impl AccountId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Convert to the 64-bit Steam id.
    pub fn to_steam64(self) -> u64 {
        u64::from(self.0) + STEAM64_OFFSET
    }

    /// Convert a Steam64 id to an account id.
    pub fn from_steam64(steam64: u64) -> Result<Self, AnalyticsError> {
        steam64
            .checked_sub(STEAM64_OFFSET)
            .and_then(|id| u32::try_from(id).ok())
            .map(Self)
            .ok_or_else(|| AnalyticsError::InvalidInput(format!("Invalid Steam64 id: {steam64}")))
    }
}

impl FromStr for AccountId {
    type Err = AnalyticsError;

    /// Accepts a plain account id (1-10 digits) or a Steam64 id.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || AnalyticsError::InvalidInput(format!("Invalid Steam ID format: {s:?}"));

        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        if s.len() <= 10 {
            return s.parse::<u32>().map(Self).map_err(|_| invalid());
        }

        if s.len() == 17 && s.starts_with(STEAM64_PREFIX) {
            let steam64 = s.parse::<u64>().map_err(|_| invalid())?;
            return Self::from_steam64(steam64);
        }

        Err(invalid())
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for AccountId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// A match id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchId(u64);

impl MatchId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl FromStr for MatchId {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AnalyticsError::InvalidInput(format!("Invalid match id: {s:?}")));
        }
        s.parse::<u64>()
            .map(Self)
            .map_err(|_| AnalyticsError::InvalidInput(format!("Invalid match id: {s:?}")))
    }
}

impl std::fmt::Display for MatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for MatchId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_account_id() {
        let id: AccountId = "86745912".parse().unwrap();
        assert_eq!(id.get(), 86_745_912);
    }

    #[test]
    fn test_parse_steam64() {
        let id: AccountId = "76561198046845640".parse().unwrap();
        assert_eq!(id.get(), 86_579_912);
        assert_eq!(id.to_steam64(), 76_561_198_046_845_640);
    }

    #[test]
    fn test_rejects_malformed() {
        for bad in ["", "abc", "12a4", "-5", "12345678901", "99999999999999999", "4294967296"] {
            let result = bad.parse::<AccountId>();
            assert!(
                matches!(result, Err(AnalyticsError::InvalidInput(_))),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn test_parse_match_id() {
        let id: MatchId = "7512345678".parse().unwrap();
        assert_eq!(id.get(), 7_512_345_678);
        assert!("75x".parse::<MatchId>().is_err());
    }
}
