use serde::{Deserialize, Serialize};

/// Storage key under which the leaderboard records are kept.
pub const LEADERBOARD_KEY: &str = "minesweeperScoresV2";

/// One persisted leaderboard row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub name: String,
    pub tiles: u16,
}

impl ScoreRecord {
    pub fn new(name: impl Into<String>, tiles: u16) -> Self {
        Self {
            name: name.into(),
            tiles,
        }
    }
}

/// Persisted leaderboard, highest score first.
pub type ScoreRecords = Vec<ScoreRecord>;

pub fn encode_records(records: &[ScoreRecord]) -> serde_json::Result<String> {
    serde_json::to_string(records)
}

/// Decodes a stored leaderboard. A blank document decodes to no records.
pub fn decode_records(raw: &str) -> serde_json::Result<ScoreRecords> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(raw)
}
