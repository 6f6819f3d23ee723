//! Party synergy with frequent teammates.

use serde::{Deserialize, Serialize};

use super::{count_wins, round1, winrate};
use crate::opendota::{MatchRecord, PeerStats};

/// Games together before a peer is ranked as a best/worst partner.
pub const MIN_GAMES_FOR_RANKING: u32 = 5;
/// Partners listed in each ranking.
pub const RANKING_SIZE: usize = 5;
/// Overall winrate assumed when there is no match history.
pub const DEFAULT_WINRATE: f64 = 50.0;

/// A teammate and how the player does with them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeerSynergy {
    pub account_id: u32,
    pub personaname: String,
    pub avatar: Option<String>,
    pub games_together: u32,
    pub wins_together: u32,
    /// Percent, one decimal.
    pub winrate_together: f64,
    /// Player's overall winrate, one decimal.
    pub winrate_overall: f64,
    /// `winrate_together - winrate_overall`, one decimal.
    pub synergy: f64,
    pub last_played: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeersReport {
    /// Every peer, most games together first.
    pub peers: Vec<PeerSynergy>,
    pub best_partners: Vec<PeerSynergy>,
    pub worst_partners: Vec<PeerSynergy>,
    pub overall_winrate: f64,
}

/// Overall winrate of a batch, one decimal; [`DEFAULT_WINRATE`] when empty.
pub fn overall_winrate(matches: &[MatchRecord]) -> f64 {
    if matches.is_empty() {
        return DEFAULT_WINRATE;
    }
    round1(winrate(count_wins(matches), matches.len() as u32))
}

/// Score every peer against the player's overall winrate in `matches`.
pub fn peer_synergy(peers: &[PeerStats], matches: &[MatchRecord]) -> PeersReport {
    let overall = overall_winrate(matches);

    let mut scored: Vec<PeerSynergy> = peers
        .iter()
        .map(|peer| {
            let together = round1(winrate(peer.win, peer.games));
            PeerSynergy {
                account_id: peer.account_id,
                personaname: peer
                    .personaname
                    .clone()
                    .filter(|name| !name.is_empty())
                    .unwrap_or_else(|| "Anonymous".to_string()),
                avatar: peer.avatar.clone(),
                games_together: peer.games,
                wins_together: peer.win,
                winrate_together: together,
                winrate_overall: overall,
                synergy: round1(together - overall),
                last_played: peer.last_played,
            }
        })
        .collect();
    scored.sort_by(|a, b| b.games_together.cmp(&a.games_together));

    let ranked: Vec<&PeerSynergy> = scored
        .iter()
        .filter(|p| p.games_together >= MIN_GAMES_FOR_RANKING)
        .collect();

    let mut best = ranked.clone();
    best.sort_by(|a, b| b.synergy.total_cmp(&a.synergy));
    let mut worst = ranked;
    worst.sort_by(|a, b| a.synergy.total_cmp(&b.synergy));

    PeersReport {
        best_partners: best.into_iter().take(RANKING_SIZE).cloned().collect(),
        worst_partners: worst.into_iter().take(RANKING_SIZE).cloned().collect(),
        peers: scored,
        overall_winrate: overall,
    }
}
