//! Event and GameMatch: the raw match log the engine ranks from.

use crate::models::league::LeagueId;
use crate::models::player::PlayerId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Unique identifier for an event.
pub type EventId = Uuid;

/// One scheduled league event (a night of play); groups a subset of matches.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub league_id: LeagueId,
    pub date: NaiveDate,
}

impl Event {
    pub fn new(league_id: LeagueId, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            league_id,
            date,
        }
    }
}

/// A single 1v1 match. Scores count games, not matches.
///
/// `draw` is authoritative for wins: a drawn match is never a win for either side,
/// whatever the scores say.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameMatch {
    pub id: MatchId,
    pub event_id: EventId,
    pub player1_id: PlayerId,
    pub player2_id: PlayerId,
    pub player1_score: u32,
    pub player2_score: u32,
    #[serde(default)]
    pub draw: bool,
    #[serde(default = "default_round")]
    pub round: u32,
}

pub(crate) fn default_round() -> u32 {
    1
}

impl GameMatch {
    pub fn new(
        event_id: EventId,
        player1_id: PlayerId,
        player2_id: PlayerId,
        player1_score: u32,
        player2_score: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            event_id,
            player1_id,
            player2_id,
            player1_score,
            player2_score,
            draw: false,
            round: default_round(),
        }
    }

    /// Builder-style: mark the match as an explicit draw.
    pub fn drawn(mut self) -> Self {
        self.draw = true;
        self
    }

    /// Builder-style: set the round number.
    pub fn in_round(mut self, round: u32) -> Self {
        self.round = round;
        self
    }

    pub fn involves(&self, player: PlayerId) -> bool {
        self.player1_id == player || self.player2_id == player
    }

    /// The other side of the match, if `player` played in it.
    pub fn opponent_of(&self, player: PlayerId) -> Option<PlayerId> {
        if self.player1_id == player {
            Some(self.player2_id)
        } else if self.player2_id == player {
            Some(self.player1_id)
        } else {
            None
        }
    }

    /// (own score, opponent score) from `player`'s side, if they played.
    pub fn scores_for(&self, player: PlayerId) -> Option<(u32, u32)> {
        if self.player1_id == player {
            Some((self.player1_score, self.player2_score))
        } else if self.player2_id == player {
            Some((self.player2_score, self.player1_score))
        } else {
            None
        }
    }

    /// Draw for point purposes: the explicit flag, or equal scores.
    pub fn is_drawn_for_points(&self) -> bool {
        self.draw || self.player1_score == self.player2_score
    }

    /// Strict win: never true for an explicit draw.
    pub fn is_won_by(&self, player: PlayerId) -> bool {
        if self.draw {
            return false;
        }
        matches!(self.scores_for(player), Some((own, other)) if own > other)
    }
}
