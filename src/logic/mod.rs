//! Ranking engine: match statistics, event ranking, league points, tie-breaking.

mod event_ranking;
mod import;
mod leaderboard;
mod points;
mod ranks;
mod standings;
pub mod stats;

pub use event_ranking::{
    compare_event_stats, event_matches, participants, rank_event, rank_event_participants,
};
pub use import::parse_match_log;
pub use leaderboard::compute_league_leaderboard;
pub use points::{legacy_placement_bonus, metric_value, performance_data, LeagueScoring};
pub use standings::{tie_breaker_value, TieBreaking};
pub use stats::player_stats;
