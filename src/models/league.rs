//! League: in-memory record store of players, events, matches and scoring configuration.

use crate::logic::{compute_league_leaderboard, parse_match_log, rank_event_participants};
use crate::models::game::{Event, EventId, GameMatch, MatchId};
use crate::models::player::{Player, PlayerId};
use crate::models::scoring::ScoringSystem;
use crate::models::standing::{EventStanding, LeaderboardEntry};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::io::Read;
use uuid::Uuid;

/// Unique identifier for a league.
pub type LeagueId = Uuid;

/// Errors that can occur while editing a league's records.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LeagueError {
    /// Player name is empty after trimming.
    InvalidName,
    PlayerNotFound(PlayerId),
    EventNotFound(EventId),
    MatchNotFound(MatchId),
    /// Both sides of a match are the same player.
    SamePlayerTwice(PlayerId),
    /// Player still appears in recorded matches and cannot be removed.
    PlayerHasMatches(PlayerId),
    /// A match log row could not be read or recorded (1-based data line).
    Import { line: usize, message: String },
}

impl std::fmt::Display for LeagueError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeagueError::InvalidName => write!(f, "Player name must not be empty"),
            LeagueError::PlayerNotFound(id) => write!(f, "Player not found: {}", id),
            LeagueError::EventNotFound(id) => write!(f, "Event not found: {}", id),
            LeagueError::MatchNotFound(id) => write!(f, "Match not found: {}", id),
            LeagueError::SamePlayerTwice(_) => write!(f, "A match needs two different players"),
            LeagueError::PlayerHasMatches(_) => {
                write!(f, "Player has recorded matches and cannot be removed")
            }
            LeagueError::Import { line, message } => {
                write!(f, "Match log line {}: {}", line, message)
            }
        }
    }
}

impl std::error::Error for LeagueError {}

/// A league and everything the ranking engine needs to rank it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct League {
    pub id: LeagueId,
    pub name: String,
    pub players: Vec<Player>,
    pub events: Vec<Event>,
    pub matches: Vec<GameMatch>,
    /// None means the built-in legacy scoring and tie-breaking rules.
    pub scoring_system: Option<ScoringSystem>,
}

impl League {
    /// Create an empty league with legacy scoring.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            players: Vec::new(),
            events: Vec::new(),
            matches: Vec::new(),
            scoring_system: None,
        }
    }

    pub fn get_player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn get_event(&self, id: EventId) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    /// Register a player. Names are trimmed; duplicates are allowed since ids identify players.
    pub fn add_player(&mut self, name: impl Into<String>) -> Result<PlayerId, LeagueError> {
        let name = name.into();
        let name_trimmed = name.trim();
        if name_trimmed.is_empty() {
            return Err(LeagueError::InvalidName);
        }
        let player = Player::new(name_trimmed);
        let id = player.id;
        self.players.push(player);
        Ok(id)
    }

    /// Remove a player who has no recorded matches.
    pub fn remove_player(&mut self, player_id: PlayerId) -> Result<(), LeagueError> {
        let idx = self
            .players
            .iter()
            .position(|p| p.id == player_id)
            .ok_or(LeagueError::PlayerNotFound(player_id))?;
        if self.matches.iter().any(|m| m.involves(player_id)) {
            return Err(LeagueError::PlayerHasMatches(player_id));
        }
        self.players.remove(idx);
        Ok(())
    }

    /// Schedule an event. Events are kept in date order.
    pub fn add_event(&mut self, date: NaiveDate) -> EventId {
        let event = Event::new(self.id, date);
        let id = event.id;
        self.events.push(event);
        self.events.sort_by_key(|e| e.date);
        id
    }

    /// Remove an event together with all of its matches.
    pub fn remove_event(&mut self, event_id: EventId) -> Result<(), LeagueError> {
        let idx = self
            .events
            .iter()
            .position(|e| e.id == event_id)
            .ok_or(LeagueError::EventNotFound(event_id))?;
        self.events.remove(idx);
        self.matches.retain(|m| m.event_id != event_id);
        Ok(())
    }

    /// Check a match against the league's records without storing it.
    fn validate_match(&self, m: &GameMatch) -> Result<(), LeagueError> {
        if self.get_event(m.event_id).is_none() {
            return Err(LeagueError::EventNotFound(m.event_id));
        }
        if m.player1_id == m.player2_id {
            return Err(LeagueError::SamePlayerTwice(m.player1_id));
        }
        for pid in [m.player1_id, m.player2_id] {
            if self.get_player(pid).is_none() {
                return Err(LeagueError::PlayerNotFound(pid));
            }
        }
        Ok(())
    }

    /// Record a played match. Event and both players must belong to this league.
    pub fn record_match(&mut self, m: GameMatch) -> Result<MatchId, LeagueError> {
        self.validate_match(&m)?;
        let id = m.id;
        self.matches.push(m);
        Ok(id)
    }

    pub fn remove_match(&mut self, match_id: MatchId) -> Result<(), LeagueError> {
        let idx = self
            .matches
            .iter()
            .position(|m| m.id == match_id)
            .ok_or(LeagueError::MatchNotFound(match_id))?;
        self.matches.remove(idx);
        Ok(())
    }

    /// Record every row of a CSV match log into `event_id`. Nothing is stored if any row fails.
    pub fn import_matches_csv<R: Read>(
        &mut self,
        event_id: EventId,
        reader: R,
    ) -> Result<Vec<MatchId>, LeagueError> {
        if self.get_event(event_id).is_none() {
            return Err(LeagueError::EventNotFound(event_id));
        }
        let imported = parse_match_log(event_id, reader)?;
        for (i, m) in imported.iter().enumerate() {
            self.validate_match(m).map_err(|e| LeagueError::Import {
                line: i + 1,
                message: e.to_string(),
            })?;
        }
        let ids = imported.iter().map(|m| m.id).collect();
        self.matches.extend(imported);
        Ok(ids)
    }

    /// Attach a scoring system, or pass None to return to legacy rules.
    pub fn set_scoring_system(&mut self, scoring_system: Option<ScoringSystem>) {
        self.scoring_system = scoring_system;
    }

    /// Current standings, recomputed from the stored records.
    pub fn leaderboard(&self) -> Vec<LeaderboardEntry> {
        compute_league_leaderboard(
            self.id,
            &self.events,
            &self.matches,
            &self.players,
            self.scoring_system.as_ref(),
        )
    }

    /// Ranking of one event's participants.
    pub fn event_standings(&self, event_id: EventId) -> Result<Vec<EventStanding>, LeagueError> {
        if self.get_event(event_id).is_none() {
            return Err(LeagueError::EventNotFound(event_id));
        }
        Ok(rank_event_participants(event_id, &self.players, &self.matches))
    }
}
