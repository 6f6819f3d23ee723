//! Flattening upstream data into the view the insight rules read.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::opendota::{MatchRecord, PeerStats, PlayerHeroStats};
use crate::stats::{self, build_heatmap, role_breakdown, round1, winrate};
use crate::types::AccountId;

/// Peers considered when looking for party synergy.
pub const MAX_PEERS: usize = 20;

/// Winrate assumed when neither hero totals nor matches are available.
pub const NEUTRAL_WINRATE: f64 = 50.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroSummary {
    pub hero_id: u32,
    pub name: String,
    pub games: u32,
    pub wins: u32,
    pub winrate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleSummary {
    pub name: String,
    pub games: u32,
    pub wins: u32,
    pub winrate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeerSummary {
    pub account_id: u32,
    pub name: String,
    pub games_together: u32,
    pub wins_together: u32,
    pub winrate_together: f64,
    /// Winrate together minus the player's overall winrate.
    pub synergy: f64,
}

/// One populated day/hour cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSlot {
    /// 0 = Sunday.
    pub day: u8,
    pub hour: u8,
    pub games: u32,
    pub wins: u32,
    pub winrate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendSnapshot {
    pub current_win_streak: u32,
    pub current_loss_streak: u32,
    pub last20_winrate: f64,
    pub last50_winrate: f64,
}

/// Everything the insight rules look at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedPlayerData {
    pub account_id: u32,
    pub winrate: f64,
    pub total_games: u32,
    /// Most played first.
    pub heroes: Vec<HeroSummary>,
    /// Most played first; unknown roles excluded.
    pub roles: Vec<RoleSummary>,
    pub peers: Vec<PeerSummary>,
    pub heatmap: Vec<TimeSlot>,
    pub trends: TrendSnapshot,
}

impl AggregatedPlayerData {
    /// A player with no history at all.
    pub fn empty(account: AccountId) -> Self {
        aggregate_player_data(account, &[], &[], &[], &HashMap::new())
    }
}

/// Build the rule input from a player's hero totals, peers and recent matches.
///
/// Overall winrate and total games come from the hero totals. When those are
/// empty the match batch is used, and with no matches either the winrate is
/// [`NEUTRAL_WINRATE`]. Hero names missing from `hero_names` become
/// `"Hero {id}"`.
pub fn aggregate_player_data(
    account: AccountId,
    hero_stats: &[PlayerHeroStats],
    peers: &[PeerStats],
    matches: &[MatchRecord],
    hero_names: &HashMap<u32, String>,
) -> AggregatedPlayerData {
    let mut heroes: Vec<HeroSummary> = hero_stats
        .iter()
        .map(|h| HeroSummary {
            hero_id: h.hero_id,
            name: hero_names
                .get(&h.hero_id)
                .cloned()
                .unwrap_or_else(|| format!("Hero {}", h.hero_id)),
            games: h.games,
            wins: h.win,
            winrate: winrate(h.win, h.games),
        })
        .collect();
    heroes.sort_by(|a, b| b.games.cmp(&a.games));

    let hero_games: u32 = hero_stats.iter().map(|h| h.games).sum();
    let hero_wins: u32 = hero_stats.iter().map(|h| h.win).sum();
    let (total_games, overall) = if hero_games > 0 {
        (hero_games, winrate(hero_wins, hero_games))
    } else if !matches.is_empty() {
        let games = matches.len() as u32;
        (games, winrate(stats::count_wins(matches), games))
    } else {
        (0, NEUTRAL_WINRATE)
    };

    let roles = role_breakdown(matches)
        .roles
        .into_iter()
        .map(|r| RoleSummary {
            name: r.role.name().to_string(),
            games: r.games,
            wins: r.wins,
            winrate: r.winrate,
        })
        .collect();

    let peers = peers
        .iter()
        .take(MAX_PEERS)
        .map(|p| {
            let together = winrate(p.win, p.games);
            PeerSummary {
                account_id: p.account_id,
                name: p
                    .personaname
                    .clone()
                    .filter(|name| !name.is_empty())
                    .unwrap_or_else(|| "Anonymous".to_string()),
                games_together: p.games,
                wins_together: p.win,
                winrate_together: round1(together),
                synergy: round1(together - overall),
            }
        })
        .collect();

    let heatmap = build_heatmap(matches)
        .into_iter()
        .filter(|cell| cell.games > 0)
        .map(|cell| TimeSlot {
            day: cell.day,
            hour: cell.hour,
            games: cell.games,
            wins: cell.wins,
            winrate: cell.winrate.unwrap_or(0.0),
        })
        .collect();

    AggregatedPlayerData {
        account_id: account.get(),
        winrate: overall,
        total_games,
        heroes,
        roles,
        peers,
        heatmap,
        trends: trend_snapshot(matches, overall),
    }
}

/// Streaks and recent winrates, newest match first.
///
/// With no matches the recent winrates equal `overall`, so no trend fires.
pub fn trend_snapshot(matches: &[MatchRecord], overall: f64) -> TrendSnapshot {
    if matches.is_empty() {
        return TrendSnapshot {
            current_win_streak: 0,
            current_loss_streak: 0,
            last20_winrate: overall,
            last50_winrate: overall,
        };
    }

    let mut recent: Vec<&MatchRecord> = matches.iter().collect();
    recent.sort_by(|a, b| b.start_time.cmp(&a.start_time));

    let latest_won = recent[0].won();
    let streak = recent.iter().take_while(|m| m.won() == latest_won).count() as u32;
    let (current_win_streak, current_loss_streak) = if latest_won {
        (streak, 0)
    } else {
        (0, streak)
    };

    let window_winrate = |n: usize| {
        let window = &recent[..recent.len().min(n)];
        let wins = window.iter().filter(|m| m.won()).count() as u32;
        round1(winrate(wins, window.len() as u32))
    };

    TrendSnapshot {
        current_win_streak,
        current_loss_streak,
        last20_winrate: window_winrate(20),
        last50_winrate: window_winrate(50),
    }
}
