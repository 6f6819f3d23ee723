//! Rule-based coaching insights.
//!
//! Player data is first flattened into an [`AggregatedPlayerData`] (see
//! [`aggregate_player_data`]), then every rule in [`RULES`] runs against it in
//! order. Rules are independent: each emits zero or one [`Insight`], and the
//! output order is the rule order.
//!
//! ## Example
//!
//! ```rust
//! use dota_analytics::insights::{AggregatedPlayerData, InsightConfig, generate_report};
//! use dota_analytics::types::AccountId;
//!
//! let data = AggregatedPlayerData::empty(AccountId::new(86745912));
//! let report = generate_report(&data, &InsightConfig::default(), 0);
//! assert_eq!(report.summary.quick_tip, "Play more matches to get insights");
//! ```

mod aggregate;
mod config;
mod rules;
mod types;

pub use aggregate::{
    AggregatedPlayerData, HeroSummary, MAX_PEERS, NEUTRAL_WINRATE, PeerSummary, RoleSummary,
    TimeSlot, TrendSnapshot, aggregate_player_data, trend_snapshot,
};
pub use config::InsightConfig;
pub use rules::{RULES, Rule};
pub use types::{
    Confidence, Insight, InsightCategory, InsightGroups, InsightSummary, InsightsReport,
};

/// Run every rule against `data`.
pub fn generate_insights(data: &AggregatedPlayerData, config: &InsightConfig) -> Vec<Insight> {
    RULES.iter().filter_map(|rule| rule(data, config)).collect()
}

/// Rate the player and pick the headline insights.
pub fn summarize(insights: &[Insight], data: &AggregatedPlayerData) -> InsightSummary {
    let first_of = |category: InsightCategory| insights.iter().find(|i| i.category == category);
    let count_of =
        |category: InsightCategory| insights.iter().filter(|i| i.category == category).count();

    let rating = 50.0 + (data.winrate - 50.0) * 1.5
        + 5.0 * count_of(InsightCategory::Strength) as f64
        - 5.0 * count_of(InsightCategory::Weakness) as f64
        - 3.0 * count_of(InsightCategory::Warning) as f64;

    let main_strength = first_of(InsightCategory::Strength)
        .map(|i| i.title.clone())
        .unwrap_or_else(|| "Consistent player".to_string());
    let main_weakness = first_of(InsightCategory::Weakness)
        .or_else(|| first_of(InsightCategory::Warning))
        .map(|i| i.title.clone())
        .unwrap_or_else(|| "No major issues detected".to_string());
    let quick_tip = first_of(InsightCategory::Tip)
        .and_then(|i| i.action.clone())
        .unwrap_or_else(|| {
            if data.total_games > 0 {
                "Keep playing and improving!".to_string()
            } else {
                "Play more matches to get insights".to_string()
            }
        });

    InsightSummary {
        overall_rating: rating.clamp(0.0, 100.0).round() as u32,
        main_strength,
        main_weakness,
        quick_tip,
    }
}

/// Split insights by category, keeping rule order within each group.
pub fn group_by_category(insights: &[Insight]) -> InsightGroups {
    let mut groups = InsightGroups::default();
    for insight in insights {
        let group = match insight.category {
            InsightCategory::Strength => &mut groups.strength,
            InsightCategory::Weakness => &mut groups.weakness,
            InsightCategory::Tip => &mut groups.tip,
            InsightCategory::Warning => &mut groups.warning,
        };
        group.push(insight.clone());
    }
    groups
}

/// Insights plus summary, stamped with `now` (Unix seconds).
pub fn generate_report(
    data: &AggregatedPlayerData,
    config: &InsightConfig,
    now: i64,
) -> InsightsReport {
    let insights = generate_insights(data, config);
    let summary = summarize(&insights, data);
    InsightsReport {
        generated_at: now,
        insights,
        summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AccountId;

    fn hero(hero_id: u32, name: &str, games: u32, wins: u32) -> HeroSummary {
        HeroSummary {
            hero_id,
            name: name.to_string(),
            games,
            wins,
            winrate: crate::stats::winrate(wins, games),
        }
    }

    fn neutral() -> AggregatedPlayerData {
        AggregatedPlayerData {
            total_games: 100,
            ..AggregatedPlayerData::empty(AccountId::new(1))
        }
    }

    fn titles(insights: &[Insight]) -> Vec<&str> {
        insights.iter().map(|i| i.title.as_str()).collect()
    }

    #[test]
    fn test_specialist_without_needs_work() {
        let mut data = neutral();
        data.heroes = vec![hero(1, "Pudge", 60, 36)];

        let insights = generate_insights(&data, &InsightConfig::default());
        let strengths: Vec<_> = insights
            .iter()
            .filter(|i| i.category == InsightCategory::Strength)
            .collect();

        assert_eq!(strengths.len(), 1);
        assert_eq!(strengths[0].title, "Pudge Specialist");
        assert_eq!(
            strengths[0].metric.as_deref(),
            Some("60.0% winrate over 60 games")
        );
        assert!(!titles(&insights).contains(&"Pudge Needs Work"));
    }

    #[test]
    fn test_limited_pool_and_needs_work() {
        let mut data = neutral();
        data.heroes = vec![hero(2, "Axe", 25, 10)];

        let insights = generate_insights(&data, &InsightConfig::default());
        assert_eq!(titles(&insights), ["Limited Hero Pool", "Axe Needs Work"]);
        assert_eq!(
            insights[0].description,
            "You only have 1 heroes with 5+ games. Consider expanding your pool to avoid being countered in draft."
        );
        assert_eq!(insights[1].action.as_deref(), Some("Watch a pro player's Axe VOD"));
    }

    #[test]
    fn test_role_gap_requires_games_on_worse_role() {
        let mut data = neutral();
        data.heroes = (1..=5).map(|id| hero(id, "H", 10, 5)).collect();
        data.roles = vec![
            RoleSummary { name: "Mid Lane".into(), games: 30, wins: 20, winrate: 66.7 },
            RoleSummary { name: "Hard Support".into(), games: 9, wins: 3, winrate: 33.3 },
        ];
        assert!(generate_insights(&data, &InsightConfig::default()).is_empty());

        data.roles[1].games = 10;
        let insights = generate_insights(&data, &InsightConfig::default());
        assert_eq!(titles(&insights), ["Role Specialization Opportunity"]);
        assert_eq!(
            insights[0].action.as_deref(),
            Some("Queue Mid Lane for your next 10 ranked games")
        );
    }

    #[test]
    fn test_streaks_and_trends() {
        let mut data = neutral();
        data.heroes = (1..=5).map(|id| hero(id, "H", 10, 5)).collect();
        data.trends.current_win_streak = 5;
        data.trends.last20_winrate = 60.0;

        let insights = generate_insights(&data, &InsightConfig::default());
        assert_eq!(titles(&insights), ["You're on Fire!", "Performance Uptrend"]);
        assert_eq!(insights[1].metric.as_deref(), Some("+10.0% vs average"));

        data.trends.current_win_streak = 0;
        data.trends.current_loss_streak = 3;
        data.trends.last20_winrate = 35.0;
        let insights = generate_insights(&data, &InsightConfig::default());
        assert_eq!(titles(&insights), ["Tilt Risk Detected", "Recent Slump"]);
    }

    #[test]
    fn test_peer_rules() {
        let mut data = neutral();
        data.heroes = (1..=5).map(|id| hero(id, "H", 10, 5)).collect();
        let peer = |name: &str, synergy: f64| PeerSummary {
            account_id: 1,
            name: name.to_string(),
            games_together: 12,
            wins_together: 6,
            winrate_together: 50.0 + synergy,
            synergy,
        };
        data.peers = vec![peer("carry", 15.0), peer("feeder", -12.5)];

        let insights = generate_insights(&data, &InsightConfig::default());
        assert_eq!(titles(&insights), ["Party Synergy Issue", "Strong Duo Partner"]);
        assert_eq!(insights[0].metric.as_deref(), Some("-12.5% synergy"));
        assert_eq!(insights[1].metric.as_deref(), Some("+15.0% synergy"));
    }

    #[test]
    fn test_optimal_play_time() {
        let mut data = neutral();
        data.heroes = (1..=5).map(|id| hero(id, "H", 10, 5)).collect();
        let slot = |day, hour, games, winrate| TimeSlot { day, hour, games, wins: 0, winrate };
        data.heatmap = vec![slot(0, 1, 2, 50.0), slot(5, 20, 12, 75.0), slot(6, 3, 4, 100.0)];

        let insights = generate_insights(&data, &InsightConfig::default());
        assert_eq!(titles(&insights), ["Optimal Play Time"]);
        assert_eq!(
            insights[0].description,
            "You perform best on Fridays around 20:00. Schedule your ranked games accordingly."
        );
    }

    #[test]
    fn test_tiny_slot_does_not_hide_best_time() {
        let mut data = neutral();
        data.heroes = (1..=5).map(|id| hero(id, "H", 10, 5)).collect();
        let slot = |day, hour, games, winrate| TimeSlot { day, hour, games, wins: 0, winrate };
        data.heatmap = vec![slot(0, 1, 1, 100.0), slot(5, 20, 20, 80.0)];

        let insights = generate_insights(&data, &InsightConfig::default());
        assert_eq!(titles(&insights), ["Optimal Play Time"]);
        assert_eq!(insights[0].metric.as_deref(), Some("80.0% winrate"));

        // No slot clears the games floor.
        data.heatmap = vec![slot(0, 1, 4, 100.0)];
        assert!(generate_insights(&data, &InsightConfig::default()).is_empty());
    }

    #[test]
    fn test_summary() {
        let mut data = neutral();
        data.winrate = 60.0;
        data.heroes = vec![hero(1, "Pudge", 60, 36)];

        let report = generate_report(&data, &InsightConfig::default(), 1_700_000_000);
        // 50 + 15 + 5 (specialist) - 3 (limited pool)
        assert_eq!(report.summary.overall_rating, 67);
        assert_eq!(report.summary.main_strength, "Pudge Specialist");
        assert_eq!(report.summary.main_weakness, "Limited Hero Pool");
        assert_eq!(report.summary.quick_tip, "Keep playing and improving!");
        assert_eq!(report.generated_at, 1_700_000_000);
    }

    #[test]
    fn test_summary_clamps() {
        let mut data = neutral();
        data.winrate = 0.0;
        data.total_games = 0;
        let summary = summarize(&[], &data);
        assert_eq!(summary.overall_rating, 0);
        assert_eq!(summary.main_strength, "Consistent player");
        assert_eq!(summary.main_weakness, "No major issues detected");
        assert_eq!(summary.quick_tip, "Play more matches to get insights");
    }

    #[test]
    fn test_group_by_category() {
        let mut data = neutral();
        data.heroes = vec![hero(2, "Axe", 25, 10)];
        let groups = group_by_category(&generate_insights(&data, &InsightConfig::default()));
        assert_eq!(groups.warning.len(), 1);
        assert_eq!(groups.weakness.len(), 1);
        assert!(groups.get(InsightCategory::Strength).is_empty());
    }
}
