//! Match log import: raw CSV rows into GameMatch records for one event.
//!
//! Expected header: `player1_id,player2_id,player1_score,player2_score,draw,round`.
//! `draw` and `round` may be omitted or left empty (defaults: false, 1).

use crate::models::{EventId, GameMatch, LeagueError, PlayerId};
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize)]
struct MatchLogRecord {
    player1_id: PlayerId,
    player2_id: PlayerId,
    player1_score: u32,
    player2_score: u32,
    #[serde(default)]
    draw: Option<bool>,
    #[serde(default)]
    round: Option<u32>,
}

/// Parse a CSV match log. Fails on the first bad row, reporting its 1-based data line.
pub fn parse_match_log<R: Read>(event_id: EventId, reader: R) -> Result<Vec<GameMatch>, LeagueError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut matches = Vec::new();
    for (i, row) in csv_reader.deserialize::<MatchLogRecord>().enumerate() {
        let record = row.map_err(|e| LeagueError::Import {
            line: i + 1,
            message: e.to_string(),
        })?;
        let mut m = GameMatch::new(
            event_id,
            record.player1_id,
            record.player2_id,
            record.player1_score,
            record.player2_score,
        );
        m.draw = record.draw.unwrap_or(false);
        if let Some(round) = record.round {
            m.round = round;
        }
        matches.push(m);
    }
    Ok(matches)
}
