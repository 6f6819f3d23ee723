//! Custom serde helpers for OpenDota's loose JSON shapes.
//!
//! OpenDota returns `null` for numeric fields that were not parsed, and a few
//! endpoints have historically sent numeric ids as strings. These modules keep
//! the typed records strict without failing on those quirks.

use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, de};

/// Deserialize `null` as the type's default value.
///
/// # Example
///
/// ```rust
/// use serde::Deserialize;
/// use dota_analytics::types::serde_helpers::null_as_default;
///
/// #[derive(Deserialize, Debug)]
/// struct Row {
///     #[serde(deserialize_with = "null_as_default::deserialize", default)]
///     hero_damage: u32,
/// }
///
/// let row: Row = serde_json::from_str(r#"{"hero_damage":null}"#).unwrap();
/// assert_eq!(row.hero_damage, 0);
///
/// let row: Row = serde_json::from_str(r#"{"hero_damage":31337}"#).unwrap();
/// assert_eq!(row.hero_damage, 31337);
/// ```
pub mod null_as_default {
    use super::*;

    /// Deserialize an optional value, substituting `T::default()` for `null`.
    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
    where
        T: Deserialize<'de> + Default,
        D: Deserializer<'de>,
    {
        Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
    }
}

/// Deserialize a number that may arrive either as a JSON number or a string.
///
/// # Example
///
/// ```rust
/// use serde::Deserialize;
/// use dota_analytics::types::serde_helpers::number_or_string;
///
/// #[derive(Deserialize, Debug)]
/// struct Row {
///     #[serde(deserialize_with = "number_or_string::deserialize")]
///     hero_id: u32,
/// }
///
/// let row: Row = serde_json::from_str(r#"{"hero_id":"74"}"#).unwrap();
/// assert_eq!(row.hero_id, 74);
///
/// let row: Row = serde_json::from_str(r#"{"hero_id":74}"#).unwrap();
/// assert_eq!(row.hero_id, 74);
/// ```
pub mod number_or_string {
    use super::*;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString<T> {
        Number(T),
        String(String),
    }

    /// Deserialize a number from either representation.
    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
    where
        T: Deserialize<'de> + FromStr,
        T::Err: Display,
        D: Deserializer<'de>,
    {
        match NumberOrString::<T>::deserialize(deserializer)? {
            NumberOrString::Number(n) => Ok(n),
            NumberOrString::String(s) => s.trim().parse().map_err(de::Error::custom),
        }
    }
}

/// Deserialize to `None` instead of failing on invalid/unexpected data.
///
/// Used for decorative fields (nested MMR estimates, team blocks) whose shape
/// OpenDota changes without notice.
///
/// # Example
///
/// ```rust
/// use serde::Deserialize;
/// use dota_analytics::types::serde_helpers::default_on_error;
///
/// #[derive(Deserialize, Debug)]
/// struct Profile {
///     #[serde(deserialize_with = "default_on_error::deserialize", default)]
///     rank_tier: Option<u32>,
/// }
///
/// let profile: Profile = serde_json::from_str(r#"{"rank_tier":"unranked"}"#).unwrap();
/// assert!(profile.rank_tier.is_none());
/// ```
pub mod default_on_error {
    use super::*;

    /// Deserialize a value, returning None if deserialization fails.
    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(T::deserialize(value).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize, Debug)]
    struct Sample {
        #[serde(deserialize_with = "null_as_default::deserialize", default)]
        kills: u32,
        #[serde(deserialize_with = "number_or_string::deserialize")]
        id: u64,
    }

    #[test]
    fn test_missing_field_uses_default() {
        let sample: Sample = serde_json::from_str(r#"{"id":"7"}"#).unwrap();
        assert_eq!(sample.kills, 0);
        assert_eq!(sample.id, 7);
    }

    #[test]
    fn test_bad_number_string_fails() {
        let result: Result<Sample, _> = serde_json::from_str(r#"{"id":"seven"}"#);
        assert!(result.is_err());
    }
}
