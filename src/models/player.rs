//! Player and PlayerStats data structures.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player (used in matches and lookups).
pub type PlayerId = Uuid;

/// Derived match statistics for one player over a pool of matches (one event or a whole league).
///
/// Recomputed on every query, never stored. Percentages are fractions in `0.0..=1.0`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    pub matches_played: u32,
    pub matches_won: u32,
    pub match_points: u64,
    pub match_win_percentage: f64,
    pub games_won: u64,
    pub game_points: u64,
    pub game_win_percentage: f64,
    pub opponents_match_win_percentage: f64,
    pub opponents_game_win_percentage: f64,
    /// Distinct events the player appears in within the pool.
    pub event_attendance: u32,
}

/// A league player. Identity is the id; names are display only.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
}

impl Player {
    /// Create a new player with a fresh id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}
