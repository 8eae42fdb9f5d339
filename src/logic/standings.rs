//! League tie-breaking and final rank assignment.

use crate::logic::ranks::{competition_ranks, descending};
use crate::models::{LeaderboardEntry, ScoringSystem, TieBreaker, TieBreakerType};
use std::cmp::Ordering;

/// How players with equal league points are separated, chosen once per leaderboard.
#[derive(Clone, Debug, PartialEq)]
pub enum TieBreaking<'a> {
    /// League points, then the configured tie-breakers in ascending `order`.
    Configured(Vec<&'a TieBreaker>),
    /// League points, match win %, opponents' match win %, game win %, opponents' game win %.
    Legacy,
}

impl<'a> TieBreaking<'a> {
    /// Configured tie-breaking iff a system with at least one tie-breaker is given.
    pub fn select(system: Option<&'a ScoringSystem>) -> Self {
        match system {
            Some(s) if !s.tie_breakers.is_empty() => {
                TieBreaking::Configured(s.ordered_tie_breakers())
            }
            _ => TieBreaking::Legacy,
        }
    }

    /// Full comparator; `Less` means `a` ranks above `b`, `Equal` means they share a rank.
    ///
    /// There is no final fallback (name, id): exhausting the cascade leaves players tied.
    pub fn compare(&self, a: &LeaderboardEntry, b: &LeaderboardEntry) -> Ordering {
        let by_points = descending(a.league_points, b.league_points);
        match self {
            TieBreaking::Configured(tie_breakers) => tie_breakers.iter().fold(by_points, |acc, t| {
                acc.then_with(|| descending(tie_breaker_value(a, t.kind), tie_breaker_value(b, t.kind)))
            }),
            TieBreaking::Legacy => by_points
                .then_with(|| descending(a.stats.match_win_percentage, b.stats.match_win_percentage))
                .then_with(|| {
                    descending(
                        a.stats.opponents_match_win_percentage,
                        b.stats.opponents_match_win_percentage,
                    )
                })
                .then_with(|| descending(a.stats.game_win_percentage, b.stats.game_win_percentage))
                .then_with(|| {
                    descending(
                        a.stats.opponents_game_win_percentage,
                        b.stats.opponents_game_win_percentage,
                    )
                }),
        }
    }

    /// Sort `entries` and assign shared competition ranks. The sort is stable, so fully
    /// tied players keep their input order.
    pub fn rank(&self, mut entries: Vec<LeaderboardEntry>) -> Vec<LeaderboardEntry> {
        entries.sort_by(|a, b| self.compare(a, b));
        let ranks = competition_ranks(&entries, |a, b| self.compare(a, b));
        for (entry, rank) in entries.iter_mut().zip(ranks) {
            entry.rank = rank;
        }
        entries
    }
}

/// Value a tie-breaker compares for one entry; unknown types are 0.
pub fn tie_breaker_value(entry: &LeaderboardEntry, kind: TieBreakerType) -> f64 {
    let stats = &entry.stats;
    match kind {
        TieBreakerType::LeaguePoints => entry.league_points,
        TieBreakerType::MatchPoints => stats.match_points as f64,
        TieBreakerType::OppMatchWinPct => stats.opponents_match_win_percentage,
        TieBreakerType::GameWinPct => stats.game_win_percentage,
        TieBreakerType::OppGameWinPct => stats.opponents_game_win_percentage,
        TieBreakerType::EventAttendance => f64::from(stats.event_attendance),
        TieBreakerType::MatchWins => f64::from(stats.matches_won),
        TieBreakerType::Unknown => 0.0,
    }
}
