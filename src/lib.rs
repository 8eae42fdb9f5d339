//! League standings engine: library with models and ranking logic.

pub mod logic;
pub mod models;

pub use logic::{
    compare_event_stats, compute_league_leaderboard, legacy_placement_bonus, metric_value,
    parse_match_log, performance_data, player_stats, rank_event, rank_event_participants,
    tie_breaker_value, LeagueScoring, TieBreaking,
};
pub use models::{
    Event, EventId, EventStanding, GameMatch, LeaderboardEntry, League, LeagueError, LeagueId,
    MatchId, PerformanceData, Player, PlayerId, PlayerStats, PointMetric, ScoreFormula,
    ScoringSystem, ScoringSystemId, TieBreaker, TieBreakerType,
};
