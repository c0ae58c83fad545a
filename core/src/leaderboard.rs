use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use sweeper_protocol::ScoreRecord;

use crate::*;

/// Maximum length of a normalized player name.
pub const NAME_LENGTH: usize = 5;

/// Trims, truncates to [`NAME_LENGTH`] characters and uppercases.
pub fn normalize_name(raw: &str) -> String {
    raw.trim()
        .chars()
        .take(NAME_LENGTH)
        .flat_map(char::to_uppercase)
        .take(NAME_LENGTH)
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    pub tiles_revealed: CellCount,
}

impl From<ScoreRecord> for ScoreEntry {
    fn from(record: ScoreRecord) -> Self {
        Self {
            name: record.name,
            tiles_revealed: record.tiles,
        }
    }
}

impl From<&ScoreEntry> for ScoreRecord {
    fn from(entry: &ScoreEntry) -> Self {
        ScoreRecord::new(entry.name.clone(), entry.tiles_revealed)
    }
}

/// What became of a finished game's score.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Recording {
    /// Entered the leaderboard at `rank` (0 is the top).
    Recorded { name: String, rank: usize },
    /// Score too low for a full leaderboard.
    NotQualified,
    /// The player declined to give a name.
    Cancelled,
    /// The game has not ended yet.
    GameInProgress,
    /// This game's score was already handled.
    AlreadyRecorded,
}

/// Best runs, highest `tiles_revealed` first, at most `capacity` long, names unique.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "UncheckedLeaderboard")]
pub struct Leaderboard {
    entries: Vec<ScoreEntry>,
    capacity: usize,
}

/// Deserialized form, repaired by [`Leaderboard::from_records`] before use.
#[derive(Deserialize)]
struct UncheckedLeaderboard {
    entries: Vec<ScoreEntry>,
    capacity: usize,
}

impl From<UncheckedLeaderboard> for Leaderboard {
    fn from(raw: UncheckedLeaderboard) -> Self {
        let records = raw.entries.iter().map(ScoreRecord::from);
        Self::from_records(records, raw.capacity)
    }
}

impl Default for Leaderboard {
    fn default() -> Self {
        Self::new(DEFAULT_LEADERBOARD_CAPACITY)
    }
}

impl Leaderboard {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Rebuilds a leaderboard from stored records, repairing anything that breaks its ordering,
    /// size or naming rules. When two records share a name the higher score is kept.
    pub fn from_records(records: impl IntoIterator<Item = ScoreRecord>, capacity: usize) -> Self {
        let mut records: Vec<_> = records.into_iter().collect();
        records.sort_by(|a, b| b.tiles.cmp(&a.tiles));

        let mut entries: Vec<ScoreEntry> = Vec::new();
        for record in records {
            let name = normalize_name(&record.name);
            if name.is_empty() || entries.iter().any(|entry| entry.name == name) {
                log::warn!("Dropping stored score {:?}", record);
                continue;
            }
            entries.push(ScoreEntry {
                name,
                tiles_revealed: record.tiles,
            });
        }

        let mut leaderboard = Self { entries, capacity };
        leaderboard.rank();
        leaderboard
    }

    pub fn to_records(&self) -> Vec<ScoreRecord> {
        self.entries.iter().map(ScoreRecord::from).collect()
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    /// The entry a new score has to beat once the leaderboard is full.
    pub fn lowest(&self) -> Option<&ScoreEntry> {
        self.entries.last()
    }

    pub fn qualifies(&self, tiles_revealed: CellCount) -> bool {
        if !self.is_full() {
            return true;
        }
        self.lowest()
            .is_some_and(|lowest| tiles_revealed > lowest.tiles_revealed)
    }

    /// Whether `name` is taken once normalized.
    pub fn contains_name(&self, name: &str) -> bool {
        let name = normalize_name(name);
        self.entries.iter().any(|entry| entry.name == name)
    }

    /// Adds a score under `name`.
    ///
    /// Returns `Ok(false)` and leaves the leaderboard untouched when the score does not qualify.
    /// A name that is empty or already listed after normalization is an error; the caller is
    /// expected to ask for another name.
    pub fn submit(&mut self, name: &str, tiles_revealed: CellCount) -> Result<bool> {
        Ok(self.insert(name, tiles_revealed)?.is_some())
    }

    /// Asks `names` for a player name until one is accepted or the player cancels.
    pub async fn record<N: NameSource>(
        &mut self,
        names: &mut N,
        tiles_revealed: CellCount,
    ) -> Recording {
        if !self.qualifies(tiles_revealed) {
            return Recording::NotQualified;
        }

        let mut rejection = None;
        loop {
            let request = NameRequest {
                tiles_revealed,
                rejection: rejection.take(),
            };
            let Some(candidate) = names.request_name(request).await else {
                log::debug!("Name entry cancelled, {} tiles not recorded", tiles_revealed);
                return Recording::Cancelled;
            };

            match self.insert(&candidate, tiles_revealed) {
                Ok(Some(rank)) => {
                    let name = self.entries[rank].name.clone();
                    log::debug!("Recorded {} with {} tiles at rank {}", name, tiles_revealed, rank);
                    return Recording::Recorded { name, rank };
                }
                Ok(None) => return Recording::NotQualified,
                Err(err) => {
                    log::debug!("Name {:?} rejected: {}", candidate, err);
                    rejection = Some(err);
                }
            }
        }
    }

    fn insert(&mut self, name: &str, tiles_revealed: CellCount) -> Result<Option<usize>> {
        if !self.qualifies(tiles_revealed) {
            return Ok(None);
        }

        let name = normalize_name(name);
        if name.is_empty() {
            return Err(GameError::EmptyName);
        }
        if self.entries.iter().any(|entry| entry.name == name) {
            return Err(GameError::DuplicateName(name));
        }

        // stable sort keeps earlier submissions ahead on ties
        self.entries.push(ScoreEntry {
            name,
            tiles_revealed,
        });
        let index = self.entries.len() - 1;
        let rank = self.entries[..index]
            .iter()
            .filter(|entry| entry.tiles_revealed >= tiles_revealed)
            .count();
        self.rank();
        Ok(Some(rank))
    }

    fn rank(&mut self) {
        self.entries
            .sort_by(|a, b| b.tiles_revealed.cmp(&a.tiles_revealed));
        self.entries.truncate(self.capacity);
    }
}

/// Leaderboard guarded for hosts that submit from several threads.
#[derive(Clone, Debug, Default)]
pub struct SharedLeaderboard {
    inner: Arc<Mutex<Leaderboard>>,
}

impl SharedLeaderboard {
    pub fn new(leaderboard: Leaderboard) -> Self {
        Self {
            inner: Arc::new(Mutex::new(leaderboard)),
        }
    }

    pub fn submit(&self, name: &str, tiles_revealed: CellCount) -> Result<bool> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .submit(name, tiles_revealed)
    }

    pub fn snapshot(&self) -> Leaderboard {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
