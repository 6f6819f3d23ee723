//! Day-of-week by hour-of-day performance grid.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::winrate;
use crate::opendota::MatchRecord;

pub const DAYS: usize = 7;
pub const HOURS: usize = 24;

/// Day names indexed the way the grid is (0 = Sunday).
pub const DAY_NAMES: [&str; DAYS] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// One (day, hour) slot in UTC.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapCell {
    /// 0 = Sunday .. 6 = Saturday.
    pub day: u8,
    /// 0-23.
    pub hour: u8,
    pub games: u32,
    pub wins: u32,
    /// Percent; `None` when no games were played in the slot.
    pub winrate: Option<f64>,
}

/// Build the full 7x24 grid, day-major, from a match batch.
pub fn build_heatmap(matches: &[MatchRecord]) -> Vec<HeatmapCell> {
    let mut counts = [[(0u32, 0u32); HOURS]; DAYS];

    for record in matches {
        let (day, hour) = day_and_hour(record.start_time);
        let cell = &mut counts[usize::from(day)][usize::from(hour)];
        cell.0 += 1;
        if record.won() {
            cell.1 += 1;
        }
    }

    let mut cells = Vec::with_capacity(DAYS * HOURS);
    for (day, row) in counts.iter().enumerate() {
        for (hour, &(games, wins)) in row.iter().enumerate() {
            cells.push(HeatmapCell {
                day: day as u8,
                hour: hour as u8,
                games,
                wins,
                winrate: (games > 0).then(|| winrate(wins, games)),
            });
        }
    }
    cells
}

/// UTC (day-of-week from Sunday, hour) for a Unix timestamp.
pub fn day_and_hour(unix_seconds: i64) -> (u8, u8) {
    let at = OffsetDateTime::from_unix_timestamp(unix_seconds).unwrap_or(OffsetDateTime::UNIX_EPOCH);
    (at.weekday().number_days_from_sunday(), at.hour())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::game;

    // Tuesday 2023-11-14 22:13:20 UTC
    const TUESDAY_22H: i64 = 1_700_000_000;

    #[test]
    fn test_day_and_hour_utc() {
        assert_eq!(day_and_hour(TUESDAY_22H), (2, 22));
        // 1970-01-01 was a Thursday.
        assert_eq!(day_and_hour(0), (4, 0));
    }

    #[test]
    fn test_grid_shape_and_counts() {
        let matches = vec![
            game(1, 1, true, TUESDAY_22H),
            game(2, 1, false, TUESDAY_22H + 60),
            game(3, 1, true, TUESDAY_22H + 3600),
        ];

        let grid = build_heatmap(&matches);
        assert_eq!(grid.len(), 168);

        let cell = &grid[2 * HOURS + 22];
        assert_eq!((cell.day, cell.hour), (2, 22));
        assert_eq!((cell.games, cell.wins), (2, 1));
        assert_eq!(cell.winrate, Some(50.0));

        let next = &grid[2 * HOURS + 23];
        assert_eq!(next.winrate, Some(100.0));

        assert_eq!(grid[0].winrate, None);
        assert_eq!(grid.iter().map(|c| c.games).sum::<u32>(), 3);
    }
}
