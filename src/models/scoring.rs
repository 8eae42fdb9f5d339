//! ScoringSystem configuration: league-point formulas and tie-breakers.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a scoring system.
pub type ScoringSystemId = Uuid;

/// Input to a league-point formula, read from a player's cross-event performance.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PointMetric {
    EventAttendance,
    MatchWins,
    GameWins,
    FirstPlace,
    SecondPlace,
    ThirdPlace,
    /// Any name this build does not know; always worth 0.
    #[serde(other)]
    Unknown,
}

/// Metric a configured tie-breaker compares (higher wins).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum TieBreakerType {
    #[serde(rename = "LEAGUE_POINTS")]
    LeaguePoints,
    #[serde(rename = "MATCH_POINTS")]
    MatchPoints,
    #[serde(rename = "OPP_MATCH_WIN_PCT")]
    OppMatchWinPct,
    #[serde(rename = "GAME_WIN_PCT")]
    GameWinPct,
    #[serde(rename = "OPP_GAME_WIN_PCT")]
    OppGameWinPct,
    #[serde(rename = "EVENT_ATTENDANCE_TIE")]
    EventAttendance,
    #[serde(rename = "MATCH_WINS_TIE")]
    MatchWins,
    /// Any name this build does not know; always compares as 0.
    #[serde(other)]
    Unknown,
}

/// One weighted term of the league-point formula: `multiplier × metric`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreFormula {
    /// May be zero or negative.
    pub multiplier: f64,
    pub point_metric: PointMetric,
    #[serde(default)]
    pub order: u32,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TieBreaker {
    #[serde(rename = "type")]
    pub kind: TieBreakerType,
    #[serde(default)]
    pub order: u32,
}

/// A named, reusable configuration attached to a league. A league without one
/// falls back to the built-in legacy rules.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringSystem {
    #[serde(default = "Uuid::new_v4")]
    pub id: ScoringSystemId,
    pub name: String,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub formulas: Vec<ScoreFormula>,
    #[serde(default)]
    pub tie_breakers: Vec<TieBreaker>,
}

impl ScoringSystem {
    /// Empty system with the given name (no formulas, no tie-breakers).
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            is_default: false,
            formulas: Vec::new(),
            tie_breakers: Vec::new(),
        }
    }

    /// Builder-style: append a formula term; its order is its position.
    pub fn with_formula(mut self, multiplier: f64, point_metric: PointMetric) -> Self {
        let order = self.formulas.len() as u32;
        self.formulas.push(ScoreFormula {
            multiplier,
            point_metric,
            order,
        });
        self
    }

    /// Builder-style: append a tie-breaker; its order is its position.
    pub fn with_tie_breaker(mut self, kind: TieBreakerType) -> Self {
        let order = self.tie_breakers.len() as u32;
        self.tie_breakers.push(TieBreaker { kind, order });
        self
    }

    /// Formulas sorted by ascending `order` (stable for equal orders).
    pub fn ordered_formulas(&self) -> Vec<&ScoreFormula> {
        let mut formulas: Vec<_> = self.formulas.iter().collect();
        formulas.sort_by_key(|f| f.order);
        formulas
    }

    /// Tie-breakers sorted by ascending `order` (stable for equal orders).
    pub fn ordered_tie_breakers(&self) -> Vec<&TieBreaker> {
        let mut tie_breakers: Vec<_> = self.tie_breakers.iter().collect();
        tie_breakers.sort_by_key(|t| t.order);
        tie_breakers
    }
}
