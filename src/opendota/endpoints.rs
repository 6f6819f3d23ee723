//! OpenDota API endpoint paths.

use crate::types::{AccountId, MatchId};

/// Base URL for the OpenDota API.
pub const OPENDOTA_BASE_URL: &str = "https://api.opendota.com/api";

/// Hero catalog.
pub const HEROES: &str = "/heroes";
/// Games in progress.
pub const LIVE: &str = "/live";
/// Professional player listing.
pub const PRO_PLAYERS: &str = "/proPlayers";
/// Player search by persona name.
pub const SEARCH: &str = "/search";

/// Player profile.
pub fn player(account: AccountId) -> String {
    format!("/players/{account}")
}

/// Player match history.
pub fn player_matches(account: AccountId) -> String {
    format!("/players/{account}/matches")
}

/// Last 20 matches with extended fields.
pub fn player_recent_matches(account: AccountId) -> String {
    format!("/players/{account}/recentMatches")
}

/// Per-hero totals.
pub fn player_heroes(account: AccountId) -> String {
    format!("/players/{account}/heroes")
}

/// Players seen in the same matches.
pub fn player_peers(account: AccountId) -> String {
    format!("/players/{account}/peers")
}

/// Match details.
pub fn match_detail(match_id: MatchId) -> String {
    format!("/matches/{match_id}")
}
