//! Role detection, per-role statistics, versatility and recommendation.

use serde::{Deserialize, Serialize};

use super::{kda, round1, round2, winrate};
use crate::opendota::MatchRecord;
use crate::types::Role;

/// Detect the role played in a match.
///
/// The detailed `lane_role` wins when present (values outside 1-5 are
/// unknown). Otherwise the coarse lane number can still identify the three
/// core positions.
pub fn detect_role(record: &MatchRecord) -> Role {
    match record.lane_role {
        Some(lane_role) => Role::from_lane_role(lane_role).unwrap_or(Role::Unknown),
        None => record
            .lane
            .and_then(Role::from_lane)
            .unwrap_or(Role::Unknown),
    }
}

/// Aggregate for one known role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleStats {
    pub role: Role,
    pub games: u32,
    pub wins: u32,
    /// Percent, one decimal.
    pub winrate: f64,
    /// Two decimals.
    pub avg_kda: f64,
    pub avg_gpm: u32,
    /// 0-100 blend of KDA (capped at 5) and GPM (capped at 600), two decimals.
    pub impact_score: f64,
}

/// The role worth queueing for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleRecommendation {
    pub role: Role,
    /// Percent, one decimal.
    pub winrate: f64,
    pub games: u32,
}

/// Role analysis over a match batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleBreakdown {
    /// Known roles with at least one game, most-played first.
    pub roles: Vec<RoleStats>,
    pub best_role: Option<RoleRecommendation>,
    /// 0-100.
    pub versatility_score: u32,
    /// Matches whose role could not be determined.
    pub unknown_count: u32,
    pub unknown_note: String,
    /// Matches whose role came from detailed lane data.
    pub parsed_count: u32,
    pub total_count: u32,
}

impl RoleBreakdown {
    pub fn empty() -> Self {
        Self {
            roles: Vec::new(),
            best_role: None,
            versatility_score: 0,
            unknown_count: 0,
            unknown_note: String::new(),
            parsed_count: 0,
            total_count: 0,
        }
    }

    pub fn get(&self, role: Role) -> Option<&RoleStats> {
        self.roles.iter().find(|r| r.role == role)
    }
}

#[derive(Default, Clone, Copy)]
struct Tally {
    games: u32,
    wins: u32,
    total_kda: f64,
    total_gpm: u64,
}

/// Break a match batch down by role.
///
/// Unknown-role matches are counted in `unknown_count` and excluded from
/// every aggregate.
pub fn role_breakdown(matches: &[MatchRecord]) -> RoleBreakdown {
    if matches.is_empty() {
        return RoleBreakdown::empty();
    }

    let mut tallies = [Tally::default(); 5];
    let mut unknown_count = 0u32;
    let mut parsed_count = 0u32;

    for record in matches {
        let role = detect_role(record);
        let Some(position) = role.position() else {
            unknown_count += 1;
            continue;
        };
        if record.lane_role.is_some() {
            parsed_count += 1;
        }

        let tally = &mut tallies[usize::from(position - 1)];
        tally.games += 1;
        if record.won() {
            tally.wins += 1;
        }
        tally.total_kda += kda(record.kills, record.deaths, record.assists);
        tally.total_gpm += u64::from(record.gold_per_min);
    }

    let mut roles: Vec<RoleStats> = Role::KNOWN
        .iter()
        .zip(tallies.iter())
        .filter(|(_, t)| t.games > 0)
        .map(|(&role, t)| {
            let avg_kda = t.total_kda / f64::from(t.games);
            let avg_gpm = (t.total_gpm as f64 / f64::from(t.games)).round() as u32;
            RoleStats {
                role,
                games: t.games,
                wins: t.wins,
                winrate: round1(winrate(t.wins, t.games)),
                avg_kda: round2(avg_kda),
                avg_gpm,
                impact_score: impact_score(avg_kda, avg_gpm),
            }
        })
        .collect();
    // Stable sort keeps position order among equal game counts.
    roles.sort_by(|a, b| b.games.cmp(&a.games));

    let counts: Vec<u32> = roles.iter().map(|r| r.games).collect();
    let total_count = matches.len() as u32;
    let known = total_count - unknown_count;

    let unknown_note = if unknown_count > 0 {
        format!(
            "{unknown_count} matches couldn't be analyzed (unparsed matches - lane data unavailable)"
        )
    } else if known > 0 {
        format!("Role data based on {parsed_count} parsed matches")
    } else {
        String::new()
    };

    RoleBreakdown {
        best_role: role_recommendation(&roles),
        versatility_score: versatility_score(&counts),
        roles,
        unknown_count,
        unknown_note,
        parsed_count,
        total_count,
    }
}

fn impact_score(avg_kda: f64, avg_gpm: u32) -> f64 {
    round2((avg_kda / 5.0).min(1.0) * 50.0 + (f64::from(avg_gpm) / 600.0).min(1.0) * 50.0)
}

/// Shannon entropy of a role distribution, normalized by `log2(5)` and
/// scaled to 0-100. Zero games give 0.
pub fn versatility_score(games_per_role: &[u32]) -> u32 {
    let total: u32 = games_per_role.iter().sum();
    if total == 0 {
        return 0;
    }

    let entropy: f64 = games_per_role
        .iter()
        .filter(|&&games| games > 0)
        .map(|&games| {
            let p = f64::from(games) / f64::from(total);
            -p * p.log2()
        })
        .sum();

    let normalized = entropy / 5f64.log2();
    (normalized * 100.0).round().clamp(0.0, 100.0) as u32
}

/// Pick the role with the best blend of volume (0.5), winrate (0.3) and KDA
/// (0.2). The first role in `roles` wins ties.
pub fn role_recommendation(roles: &[RoleStats]) -> Option<RoleRecommendation> {
    let mut best: Option<(&RoleStats, f64)> = None;

    for stats in roles.iter().filter(|r| r.games > 0) {
        let win_fraction = f64::from(stats.wins) / f64::from(stats.games);
        let games_score = (f64::from(stats.games) / 100.0).min(1.0);
        let score = games_score * 0.5 + win_fraction * 0.3 + (stats.avg_kda / 10.0) * 0.2;

        if best.is_none_or(|(_, top)| score > top) {
            best = Some((stats, score));
        }
    }

    best.map(|(stats, _)| RoleRecommendation {
        role: stats.role,
        winrate: round1(winrate(stats.wins, stats.games)),
        games: stats.games,
    })
}
