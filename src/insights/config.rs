//! Tunable thresholds for the insight rules.

/// Thresholds used by the insight rules.
///
/// The defaults match the tuning the rules were written against; override
/// individual fields with struct update syntax:
///
/// ```rust
/// use dota_analytics::insights::InsightConfig;
///
/// let config = InsightConfig {
///     win_streak: 3,
///     ..InsightConfig::default()
/// };
/// assert_eq!(config.loss_streak, 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InsightConfig {
    /// Games on a hero before it counts toward the hero pool.
    pub min_games_for_hero: u32,
    /// Heroes with enough games below which the pool is "limited".
    pub min_hero_pool: usize,
    /// Games the worse role needs before roles are compared.
    pub min_games_for_role: u32,
    /// Games together before a peer is judged.
    pub min_games_with_peer: u32,
    /// Games in a time slot before it may be the best slot.
    pub min_games_for_slot: u32,
    /// Specialist: strictly more games than this.
    pub specialist_games: u32,
    /// Specialist: strictly higher winrate than this.
    pub specialist_winrate: f64,
    /// Needs-work: at least this many games.
    pub struggling_games: u32,
    /// Needs-work: strictly lower winrate than this.
    pub struggling_winrate: f64,
    /// Best minus worst role winrate above which to specialize.
    pub role_winrate_gap: f64,
    /// Synergy (percentage points) beyond which a peer is notable.
    pub synergy_threshold: f64,
    pub win_streak: u32,
    pub loss_streak: u32,
    /// Recent winrate above overall by more than this is an uptrend.
    pub uptrend_margin: f64,
    /// Recent winrate below overall by more than this is a slump.
    pub slump_margin: f64,
    /// Games the best time slot needs before it is recommended.
    pub best_slot_games: u32,
    /// Best slot winrate above overall by more than this is recommended.
    pub best_slot_margin: f64,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            min_games_for_hero: 5,
            min_hero_pool: 5,
            min_games_for_role: 10,
            min_games_with_peer: 10,
            min_games_for_slot: 5,
            specialist_games: 50,
            specialist_winrate: 55.0,
            struggling_games: 20,
            struggling_winrate: 45.0,
            role_winrate_gap: 15.0,
            synergy_threshold: 10.0,
            win_streak: 5,
            loss_streak: 3,
            uptrend_margin: 5.0,
            slump_margin: 10.0,
            best_slot_games: 10,
            best_slot_margin: 5.0,
        }
    }
}
