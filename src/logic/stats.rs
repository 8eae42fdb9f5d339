//! Per-player match statistics over a pool of matches (one event, or a whole league).
//!
//! Every function takes the full pool and filters to the player's own matches, so the
//! same pool can be used to compute an opponent's figures. Zero denominators yield 0.

use crate::models::{GameMatch, PlayerId, PlayerStats};
use std::collections::BTreeSet;

/// Points for a strict match win.
pub const WIN_POINTS: u32 = 3;
/// Points for a drawn match (explicit draw flag, or equal scores).
pub const DRAW_POINTS: u32 = 1;
/// Lowest match/game win percentage a player with at least one match can have.
pub const PERCENTAGE_FLOOR: f64 = 0.33;

fn player_matches(player: PlayerId, matches: &[GameMatch]) -> impl Iterator<Item = &GameMatch> {
    matches.iter().filter(move |m| m.involves(player))
}

pub fn matches_played(player: PlayerId, matches: &[GameMatch]) -> u32 {
    player_matches(player, matches).count() as u32
}

/// 3 per strict win, 1 per draw, 0 per loss.
///
/// Equal scores count as a draw here even when the draw flag is unset.
pub fn match_points(player: PlayerId, matches: &[GameMatch]) -> u64 {
    player_matches(player, matches)
        .map(|m| {
            if m.is_drawn_for_points() {
                u64::from(DRAW_POINTS)
            } else if m.is_won_by(player) {
                u64::from(WIN_POINTS)
            } else {
                0
            }
        })
        .sum()
}

/// 1 per drawn match whatever the score; otherwise 3 × the player's own score.
pub fn game_points(player: PlayerId, matches: &[GameMatch]) -> u64 {
    player_matches(player, matches)
        .map(|m| {
            if m.is_drawn_for_points() {
                u64::from(DRAW_POINTS)
            } else {
                let (own, _) = m.scores_for(player).unwrap_or_default();
                u64::from(WIN_POINTS) * u64::from(own)
            }
        })
        .sum()
}

/// Total games (both sides' scores) across the player's matches.
pub fn games_played(player: PlayerId, matches: &[GameMatch]) -> u64 {
    player_matches(player, matches)
        .map(|m| u64::from(m.player1_score) + u64::from(m.player2_score))
        .sum()
}

/// Strict wins only; an explicit draw is never a win.
pub fn matches_won_count(player: PlayerId, matches: &[GameMatch]) -> u32 {
    player_matches(player, matches)
        .filter(|m| m.is_won_by(player))
        .count() as u32
}

/// Sum of the player's own scores.
pub fn games_won_count(player: PlayerId, matches: &[GameMatch]) -> u64 {
    player_matches(player, matches)
        .filter_map(|m| m.scores_for(player))
        .map(|(own, _)| u64::from(own))
        .sum()
}

fn floored_ratio(points: u64, units: u64) -> f64 {
    if units == 0 {
        return 0.0;
    }
    let ratio = points as f64 / (units as f64 * f64::from(WIN_POINTS));
    ratio.max(PERCENTAGE_FLOOR)
}

/// matchPoints / (matchesPlayed × 3), floored at 0.33; 0 without matches.
pub fn match_win_percentage(player: PlayerId, matches: &[GameMatch]) -> f64 {
    floored_ratio(
        match_points(player, matches),
        u64::from(matches_played(player, matches)),
    )
}

/// gamePoints / (gamesPlayed × 3), floored at 0.33; 0 without games.
pub fn game_win_percentage(player: PlayerId, matches: &[GameMatch]) -> f64 {
    floored_ratio(game_points(player, matches), games_played(player, matches))
}

/// Distinct opponents, in id order.
pub fn opponents(player: PlayerId, matches: &[GameMatch]) -> BTreeSet<PlayerId> {
    player_matches(player, matches)
        .filter_map(|m| m.opponent_of(player))
        .collect()
}

fn average_over_opponents(
    player: PlayerId,
    matches: &[GameMatch],
    metric: fn(PlayerId, &[GameMatch]) -> f64,
) -> f64 {
    let opponents = opponents(player, matches);
    if opponents.is_empty() {
        return 0.0;
    }
    // Summed in value order: equal opponent figures give bit-identical means.
    let mut values: Vec<f64> = opponents.iter().map(|&o| metric(o, matches)).collect();
    values.sort_by(f64::total_cmp);
    values.iter().sum::<f64>() / values.len() as f64
}

/// Mean match win percentage of distinct opponents, each over their own matches in the pool.
pub fn opponents_match_win_percentage(player: PlayerId, matches: &[GameMatch]) -> f64 {
    average_over_opponents(player, matches, match_win_percentage)
}

/// Mean game win percentage of distinct opponents, each over their own matches in the pool.
pub fn opponents_game_win_percentage(player: PlayerId, matches: &[GameMatch]) -> f64 {
    average_over_opponents(player, matches, game_win_percentage)
}

/// Distinct events the player has at least one match in.
pub fn event_attendance(player: PlayerId, matches: &[GameMatch]) -> u32 {
    player_matches(player, matches)
        .map(|m| m.event_id)
        .collect::<BTreeSet<_>>()
        .len() as u32
}

/// All statistics for one player over the pool.
pub fn player_stats(player: PlayerId, matches: &[GameMatch]) -> PlayerStats {
    PlayerStats {
        matches_played: matches_played(player, matches),
        matches_won: matches_won_count(player, matches),
        match_points: match_points(player, matches),
        match_win_percentage: match_win_percentage(player, matches),
        games_won: games_won_count(player, matches),
        game_points: game_points(player, matches),
        game_win_percentage: game_win_percentage(player, matches),
        opponents_match_win_percentage: opponents_match_win_percentage(player, matches),
        opponents_game_win_percentage: opponents_game_win_percentage(player, matches),
        event_attendance: event_attendance(player, matches),
    }
}
