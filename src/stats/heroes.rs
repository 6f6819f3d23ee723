//! Per-hero aggregates.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::opendota::{MatchRecord, PlayerHeroStats};

/// Games, wins and last-played time for one hero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroAggregate {
    pub hero_id: u32,
    pub games: u32,
    pub wins: u32,
    /// Unix seconds.
    pub last_played: i64,
}

impl HeroAggregate {
    pub fn winrate(&self) -> f64 {
        super::winrate(self.wins, self.games)
    }

    /// Matches in `matches` played on this hero.
    pub fn matches_in<'a>(
        &self,
        matches: &'a [MatchRecord],
    ) -> impl Iterator<Item = &'a MatchRecord> + 'a {
        let hero_id = self.hero_id;
        matches.iter().filter(move |m| m.hero_id == hero_id)
    }
}

impl From<&PlayerHeroStats> for HeroAggregate {
    fn from(stats: &PlayerHeroStats) -> Self {
        Self {
            hero_id: stats.hero_id,
            games: stats.games,
            wins: stats.win,
            last_played: stats.last_played,
        }
    }
}

/// Build per-hero aggregates from a match batch, most-played first.
///
/// Ties on games are broken by hero id so the order is stable.
pub fn aggregate_heroes(matches: &[MatchRecord]) -> Vec<HeroAggregate> {
    let mut by_hero: HashMap<u32, HeroAggregate> = HashMap::new();

    for record in matches {
        let entry = by_hero.entry(record.hero_id).or_insert(HeroAggregate {
            hero_id: record.hero_id,
            games: 0,
            wins: 0,
            last_played: 0,
        });
        entry.games += 1;
        if record.won() {
            entry.wins += 1;
        }
        entry.last_played = entry.last_played.max(record.start_time);
    }

    let mut heroes: Vec<_> = by_hero.into_values().collect();
    heroes.sort_by(|a, b| b.games.cmp(&a.games).then(a.hero_id.cmp(&b.hero_id)));
    heroes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::match_record;

    #[test]
    fn test_aggregate_heroes_counts_authentic_wins() {
        let matches = vec![
            match_record(1, 74, 0, true, 100),    // radiant, radiant won
            match_record(2, 74, 128, true, 300),  // dire, radiant won
            match_record(3, 1, 130, false, 200),  // dire, dire won
        ];

        let heroes = aggregate_heroes(&matches);
        assert_eq!(heroes.len(), 2);
        assert_eq!(heroes[0].hero_id, 74);
        assert_eq!(heroes[0].games, 2);
        assert_eq!(heroes[0].wins, 1);
        assert_eq!(heroes[0].last_played, 300);
        assert_eq!(heroes[1].winrate(), 100.0);
    }
}
