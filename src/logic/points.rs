//! League point aggregation: turn cross-event performance into one league-points number.

use crate::logic::stats::{event_attendance, games_won_count, matches_won_count};
use crate::models::{
    EventStanding, GameMatch, PerformanceData, PlayerId, PointMetric, ScoreFormula, ScoringSystem,
};

/// How league points are computed, chosen once per leaderboard.
#[derive(Clone, Debug, PartialEq)]
pub enum LeagueScoring<'a> {
    /// Σ multiplier × metric over the configured formulas, in `order`.
    Formula(Vec<&'a ScoreFormula>),
    /// Fixed placement bonus per attended event (4 / 3 / 2 / 1).
    Legacy,
}

impl<'a> LeagueScoring<'a> {
    /// Formula scoring iff a system with at least one formula is given.
    pub fn select(system: Option<&'a ScoringSystem>) -> Self {
        match system {
            Some(s) if !s.formulas.is_empty() => LeagueScoring::Formula(s.ordered_formulas()),
            _ => LeagueScoring::Legacy,
        }
    }

    /// League points for one player. Never clamped; negative totals are allowed.
    ///
    /// Formula terms that are not finite (a NaN or infinite multiplier) contribute 0.
    pub fn league_points(&self, performance: &PerformanceData) -> f64 {
        match self {
            LeagueScoring::Formula(formulas) => formulas
                .iter()
                .map(|f| f.multiplier * metric_value(performance, f.point_metric))
                .filter(|term| term.is_finite())
                .sum(),
            LeagueScoring::Legacy => performance
                .placements
                .iter()
                .map(|&rank| f64::from(legacy_placement_bonus(rank)))
                .sum(),
        }
    }
}

/// Formula input for `metric`; unknown metrics are worth 0.
pub fn metric_value(performance: &PerformanceData, metric: PointMetric) -> f64 {
    let value = match metric {
        PointMetric::EventAttendance => u64::from(performance.event_attendance),
        PointMetric::MatchWins => u64::from(performance.match_wins),
        PointMetric::GameWins => performance.game_wins,
        PointMetric::FirstPlace => u64::from(performance.first_place_finishes),
        PointMetric::SecondPlace => u64::from(performance.second_place_finishes),
        PointMetric::ThirdPlace => u64::from(performance.third_place_finishes),
        PointMetric::Unknown => 0,
    };
    value as f64
}

/// Legacy points for one event finish: 1st → 4, 2nd → 3, 3rd → 2, anything else → 1.
pub fn legacy_placement_bonus(rank: u32) -> u32 {
    match rank {
        1 => 4,
        2 => 3,
        3 => 2,
        _ => 1,
    }
}

/// Build a player's performance record from the league's matches and every event's ranking.
pub fn performance_data(
    player: PlayerId,
    league_matches: &[GameMatch],
    event_rankings: &[Vec<EventStanding>],
) -> PerformanceData {
    let placements = event_rankings
        .iter()
        .filter_map(|ranking| ranking.iter().find(|s| s.player_id == player))
        .map(|s| s.rank)
        .collect();
    PerformanceData::new(
        event_attendance(player, league_matches),
        matches_won_count(player, league_matches),
        games_won_count(player, league_matches),
        placements,
    )
}
