//! Event ranking: order one event's players with a fixed 4-criterion cascade.
//!
//! 1. Match points (desc).
//! 2. Opponents' match win % (desc).
//! 3. Game win % (desc).
//! 4. Opponents' game win % (desc).
//!
//! League scoring configuration never affects this ordering.

use crate::logic::ranks::{competition_ranks, descending};
use crate::logic::stats::player_stats;
use crate::models::{EventId, EventStanding, GameMatch, Player, PlayerStats};
use std::cmp::Ordering;

/// Event cascade comparator; `Less` means `a` ranks above `b`.
pub fn compare_event_stats(a: &PlayerStats, b: &PlayerStats) -> Ordering {
    b.match_points
        .cmp(&a.match_points)
        .then_with(|| {
            descending(
                a.opponents_match_win_percentage,
                b.opponents_match_win_percentage,
            )
        })
        .then_with(|| descending(a.game_win_percentage, b.game_win_percentage))
        .then_with(|| {
            descending(
                a.opponents_game_win_percentage,
                b.opponents_game_win_percentage,
            )
        })
}

/// Rank every roster player over `event_matches` (already scoped to one event).
///
/// Players in the matches but not in the roster still count as opponents, but get no row.
pub fn rank_event(roster: &[Player], event_matches: &[GameMatch]) -> Vec<EventStanding> {
    let mut rows: Vec<(&Player, PlayerStats)> = roster
        .iter()
        .map(|p| (p, player_stats(p.id, event_matches)))
        .collect();
    rows.sort_by(|(_, a), (_, b)| compare_event_stats(a, b));

    let ranks = competition_ranks(&rows, |(_, a), (_, b)| compare_event_stats(a, b));
    rows.into_iter()
        .zip(ranks)
        .map(|((player, stats), rank)| EventStanding {
            rank,
            player_id: player.id,
            player_name: player.name.clone(),
            stats,
        })
        .collect()
}

/// Matches of `all_matches` that belong to `event_id`.
pub fn event_matches(event_id: EventId, all_matches: &[GameMatch]) -> Vec<GameMatch> {
    all_matches
        .iter()
        .filter(|m| m.event_id == event_id)
        .cloned()
        .collect()
}

/// Roster players with at least one match in `matches`, in roster order.
pub fn participants(roster: &[Player], matches: &[GameMatch]) -> Vec<Player> {
    roster
        .iter()
        .filter(|p| matches.iter().any(|m| m.involves(p.id)))
        .cloned()
        .collect()
}

/// Rank the players who actually played in `event_id`.
pub fn rank_event_participants(
    event_id: EventId,
    roster: &[Player],
    all_matches: &[GameMatch],
) -> Vec<EventStanding> {
    let matches = event_matches(event_id, all_matches);
    let players = participants(roster, &matches);
    rank_event(&players, &matches)
}
