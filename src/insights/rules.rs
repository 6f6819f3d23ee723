//! The insight rules, evaluated in declaration order.

use super::aggregate::{AggregatedPlayerData, TimeSlot};
use super::config::InsightConfig;
use super::types::{Confidence, Insight, InsightCategory};
use crate::stats::heatmap::DAY_NAMES;

/// A rule inspects the player data and emits at most one insight.
pub type Rule = fn(&AggregatedPlayerData, &InsightConfig) -> Option<Insight>;

/// Every rule, in the order their insights are reported.
pub const RULES: [Rule; 11] = [
    hero_pool_depth,
    hero_specialist,
    struggling_hero,
    role_specialization,
    party_synergy_issue,
    strong_duo_partner,
    hot_streak,
    tilt_warning,
    performance_uptrend,
    recent_slump,
    optimal_play_time,
];

fn hero_pool_depth(data: &AggregatedPlayerData, config: &InsightConfig) -> Option<Insight> {
    let min = config.min_games_for_hero;
    let deep = data.heroes.iter().filter(|h| h.games >= min).count();
    if deep >= config.min_hero_pool {
        return None;
    }
    Some(
        Insight::new(
            InsightCategory::Warning,
            "Limited Hero Pool",
            format!(
                "You only have {deep} heroes with {min}+ games. Consider expanding your pool to avoid being countered in draft."
            ),
            Confidence::High,
        )
        .action("Try 2-3 new heroes in unranked this week")
        .data_point(format!("{deep} heroes with {min}+ games")),
    )
}

fn hero_specialist(data: &AggregatedPlayerData, config: &InsightConfig) -> Option<Insight> {
    let hero = data.heroes.iter().find(|h| {
        h.games > config.specialist_games && h.winrate > config.specialist_winrate
    })?;
    Some(
        Insight::new(
            InsightCategory::Strength,
            format!("{} Specialist", hero.name),
            format!(
                "You have exceptional performance on {}. This is a reliable pick for climbing.",
                hero.name
            ),
            Confidence::High,
        )
        .metric(format!(
            "{:.1}% winrate over {} games",
            hero.winrate, hero.games
        ))
        .data_point(format!("{} games", hero.games))
        .data_point(format!("{}% WR", hero.winrate)),
    )
}

fn struggling_hero(data: &AggregatedPlayerData, config: &InsightConfig) -> Option<Insight> {
    let hero = data.heroes.iter().find(|h| {
        h.games >= config.struggling_games && h.winrate < config.struggling_winrate
    })?;
    Some(
        Insight::new(
            InsightCategory::Weakness,
            format!("{} Needs Work", hero.name),
            format!(
                "You play {} frequently but your winrate is below average. Consider reviewing replays or taking a break from this hero.",
                hero.name
            ),
            Confidence::High,
        )
        .metric(format!("{:.1}% winrate", hero.winrate))
        .action(format!("Watch a pro player's {} VOD", hero.name))
        .data_point(format!("{} games", hero.games))
        .data_point(format!("{}% WR", hero.winrate)),
    )
}

fn role_specialization(data: &AggregatedPlayerData, config: &InsightConfig) -> Option<Insight> {
    let first = data.roles.first()?;
    let (mut best, mut worst) = (first, first);
    for role in &data.roles[1..] {
        if role.winrate > best.winrate {
            best = role;
        }
        if role.winrate < worst.winrate {
            worst = role;
        }
    }

    let gap = best.winrate - worst.winrate;
    if gap <= config.role_winrate_gap || worst.games < config.min_games_for_role {
        return None;
    }
    Some(
        Insight::new(
            InsightCategory::Tip,
            "Role Specialization Opportunity",
            format!(
                "Your {} winrate is {:.0}% higher than {}. Focusing on your best role could accelerate climbing.",
                best.name, gap, worst.name
            ),
            Confidence::Medium,
        )
        .metric(format!("{:.1}% vs {:.1}%", best.winrate, worst.winrate))
        .action(format!("Queue {} for your next 10 ranked games", best.name))
        .data_point(format!("Best: {} ({}%)", best.name, best.winrate))
        .data_point(format!("Worst: {} ({}%)", worst.name, worst.winrate)),
    )
}

fn party_synergy_issue(data: &AggregatedPlayerData, config: &InsightConfig) -> Option<Insight> {
    let peer = data.peers.iter().find(|p| {
        p.games_together >= config.min_games_with_peer && p.synergy < -config.synergy_threshold
    })?;
    Some(
        Insight::new(
            InsightCategory::Warning,
            "Party Synergy Issue",
            format!(
                "Your winrate drops significantly when playing with {}. This might be due to playstyle mismatch or role conflicts.",
                peer.name
            ),
            Confidence::High,
        )
        .metric(format!("{:.1}% synergy", peer.synergy))
        .action("Consider solo queue or finding a different duo partner")
        .data_point(format!("{} games together", peer.games_together))
        .data_point(format!("{}% WR together", peer.winrate_together)),
    )
}

fn strong_duo_partner(data: &AggregatedPlayerData, config: &InsightConfig) -> Option<Insight> {
    let peer = data.peers.iter().find(|p| {
        p.games_together >= config.min_games_with_peer && p.synergy > config.synergy_threshold
    })?;
    Some(
        Insight::new(
            InsightCategory::Strength,
            "Strong Duo Partner",
            format!(
                "You perform exceptionally well with {}. Prioritize queuing together for ranked games.",
                peer.name
            ),
            Confidence::High,
        )
        .metric(format!("+{:.1}% synergy", peer.synergy))
        .data_point(format!("{} games", peer.games_together))
        .data_point(format!("{}% WR", peer.winrate_together)),
    )
}

fn hot_streak(data: &AggregatedPlayerData, config: &InsightConfig) -> Option<Insight> {
    let streak = data.trends.current_win_streak;
    if streak < config.win_streak {
        return None;
    }
    Some(
        Insight::new(
            InsightCategory::Tip,
            "You're on Fire!",
            format!(
                "{streak} wins in a row! Your current form is excellent. Consider playing ranked while momentum is high."
            ),
            Confidence::Medium,
        )
        .metric(format!("{streak} win streak"))
        .data_point(format!("Current streak: {streak}W")),
    )
}

fn tilt_warning(data: &AggregatedPlayerData, config: &InsightConfig) -> Option<Insight> {
    let streak = data.trends.current_loss_streak;
    if streak < config.loss_streak {
        return None;
    }
    Some(
        Insight::new(
            InsightCategory::Warning,
            "Tilt Risk Detected",
            format!(
                "You've lost {streak} games in a row. Taking a break can help reset your mental state and prevent further losses."
            ),
            Confidence::High,
        )
        .action("Take a 30-minute break before your next game")
        .data_point(format!("Current streak: {streak}L")),
    )
}

fn performance_uptrend(data: &AggregatedPlayerData, config: &InsightConfig) -> Option<Insight> {
    let recent = data.trends.last20_winrate;
    let overall = data.winrate;
    if recent <= overall + config.uptrend_margin {
        return None;
    }
    Some(
        Insight::new(
            InsightCategory::Strength,
            "Performance Uptrend",
            format!(
                "Your recent winrate ({recent:.1}%) is higher than your average ({overall:.1}%). You're improving!"
            ),
            Confidence::Medium,
        )
        .metric(format!("+{:.1}% vs average", recent - overall))
        .data_point(format!("Recent: {recent}%"))
        .data_point(format!("Overall: {overall}%")),
    )
}

fn recent_slump(data: &AggregatedPlayerData, config: &InsightConfig) -> Option<Insight> {
    let recent = data.trends.last20_winrate;
    let overall = data.winrate;
    if recent >= overall - config.slump_margin {
        return None;
    }
    Some(
        Insight::new(
            InsightCategory::Weakness,
            "Recent Slump",
            "Your recent performance is below your usual level. This could be due to tilt, meta changes, or bad luck.",
            Confidence::Medium,
        )
        .metric(format!("{:.1}% vs average", recent - overall))
        .action("Review your last 5 losses to identify patterns")
        .data_point(format!("Recent: {recent}%"))
        .data_point(format!("Overall: {overall}%")),
    )
}

fn optimal_play_time(data: &AggregatedPlayerData, config: &InsightConfig) -> Option<Insight> {
    // Only slots above the games floor compete; the earliest wins ties.
    let best = data
        .heatmap
        .iter()
        .filter(|slot| slot.games >= config.min_games_for_slot)
        .fold(None::<&TimeSlot>, |best, slot| match best {
            Some(b) if slot.winrate <= b.winrate => Some(b),
            _ => Some(slot),
        })?;

    if best.games < config.best_slot_games
        || best.winrate <= data.winrate + config.best_slot_margin
    {
        return None;
    }
    let day = DAY_NAMES
        .get(usize::from(best.day))
        .copied()
        .unwrap_or("Sunday");
    Some(
        Insight::new(
            InsightCategory::Tip,
            "Optimal Play Time",
            format!(
                "You perform best on {day}s around {}:00. Schedule your ranked games accordingly.",
                best.hour
            ),
            Confidence::Medium,
        )
        .metric(format!("{:.1}% winrate", best.winrate))
        .data_point(format!("{} games at this time", best.games))
        .data_point(format!("{}% WR", best.winrate)),
    )
}
