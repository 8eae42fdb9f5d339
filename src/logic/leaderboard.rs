//! League leaderboard: the full pipeline from a match-log snapshot to ranked rows.
//!
//! Stateless and recomputed from scratch on every call. Empty inputs give an empty board.

use crate::logic::event_ranking::{participants, rank_event_participants};
use crate::logic::points::{performance_data, LeagueScoring};
use crate::logic::standings::TieBreaking;
use crate::logic::stats::player_stats;
use crate::models::{Event, GameMatch, LeaderboardEntry, LeagueId, Player, ScoringSystem};
use std::collections::HashSet;

/// Compute the ranked leaderboard for `league_id`.
///
/// Only events owned by the league, and matches in those events, are considered. Players who
/// appear in matches but not in `players` still count as opponents but never get a row.
pub fn compute_league_leaderboard(
    league_id: LeagueId,
    events: &[Event],
    matches: &[GameMatch],
    players: &[Player],
    scoring_system: Option<&ScoringSystem>,
) -> Vec<LeaderboardEntry> {
    let league_events: Vec<&Event> = events.iter().filter(|e| e.league_id == league_id).collect();
    let event_ids: HashSet<_> = league_events.iter().map(|e| e.id).collect();
    let league_matches: Vec<GameMatch> = matches
        .iter()
        .filter(|m| event_ids.contains(&m.event_id))
        .cloned()
        .collect();

    let league_players = participants(players, &league_matches);
    if league_players.is_empty() {
        log::debug!(
            "League {}: no participants ({} events, {} matches), empty leaderboard",
            league_id,
            league_events.len(),
            league_matches.len()
        );
        return Vec::new();
    }

    let event_rankings: Vec<_> = league_events
        .iter()
        .map(|e| rank_event_participants(e.id, players, &league_matches))
        .collect();

    let scoring = LeagueScoring::select(scoring_system);
    let tie_breaking = TieBreaking::select(scoring_system);
    log::debug!(
        "League {}: ranking {} players over {} events / {} matches (scoring: {}, tie-breaking: {})",
        league_id,
        league_players.len(),
        league_events.len(),
        league_matches.len(),
        match scoring {
            LeagueScoring::Formula(_) => "formula",
            LeagueScoring::Legacy => "legacy",
        },
        match tie_breaking {
            TieBreaking::Configured(_) => "configured",
            TieBreaking::Legacy => "legacy",
        }
    );

    let entries = league_players
        .into_iter()
        .map(|player| {
            let performance = performance_data(player.id, &league_matches, &event_rankings);
            LeaderboardEntry {
                rank: 0,
                player_id: player.id,
                league_points: scoring.league_points(&performance),
                stats: player_stats(player.id, &league_matches),
                player_name: player.name,
            }
        })
        .collect();

    tie_breaking.rank(entries)
}
