//! Derived ranking output: event standings, per-player performance, leaderboard rows.

use crate::models::player::{PlayerId, PlayerStats};
use serde::{Deserialize, Serialize};

/// One row of an event's ranking. Ranks use standard competition numbering (1, 2, 2, 4).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventStanding {
    pub rank: u32,
    pub player_id: PlayerId,
    pub player_name: String,
    #[serde(flatten)]
    pub stats: PlayerStats,
}

/// A player's cross-event performance, built once and fed to league-point scoring.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceData {
    pub event_attendance: u32,
    pub match_wins: u32,
    pub game_wins: u64,
    pub first_place_finishes: u32,
    pub second_place_finishes: u32,
    pub third_place_finishes: u32,
    /// Event rank for every event the player was placed in, in event order.
    pub placements: Vec<u32>,
}

impl PerformanceData {
    /// Tally placement counts from the per-event ranks.
    pub fn new(event_attendance: u32, match_wins: u32, game_wins: u64, placements: Vec<u32>) -> Self {
        let count = |rank: u32| placements.iter().filter(|&&r| r == rank).count() as u32;
        Self {
            event_attendance,
            match_wins,
            game_wins,
            first_place_finishes: count(1),
            second_place_finishes: count(2),
            third_place_finishes: count(3),
            placements,
        }
    }
}

/// A final standings row, ready for display as-is.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub player_id: PlayerId,
    pub player_name: String,
    pub league_points: f64,
    /// League-wide statistics over all of the league's matches.
    #[serde(flatten)]
    pub stats: PlayerStats,
}
