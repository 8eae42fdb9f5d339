//! Data structures for league ranking: players, events, matches, scoring systems, standings.

mod game;
mod league;
mod player;
mod scoring;
mod standing;

pub use game::{Event, EventId, GameMatch, MatchId};
pub use league::{League, LeagueError, LeagueId};
pub use player::{Player, PlayerId, PlayerStats};
pub use scoring::{
    PointMetric, ScoreFormula, ScoringSystem, ScoringSystemId, TieBreaker, TieBreakerType,
};
pub use standing::{EventStanding, LeaderboardEntry, PerformanceData};
