use serde::{Deserialize, Serialize};

pub use adjacency::*;
pub use board::*;
pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use host::*;
pub use leaderboard::*;
pub use naming::*;
pub use reveal::*;
pub use storage::*;
pub use types::*;

mod adjacency;
mod board;
mod cell;
mod engine;
mod error;
mod generator;
mod host;
mod leaderboard;
mod naming;
mod reveal;
mod storage;
mod types;

pub const DEFAULT_ROWS: Coord = 10;
pub const DEFAULT_COLS: Coord = 10;
pub const DEFAULT_MINES: CellCount = 10;
pub const DEFAULT_LEADERBOARD_CAPACITY: usize = 5;

/// Board dimensions, mine count and leaderboard capacity.
///
/// Missing fields deserialize to the defaults (10×10, 10 mines, 5 leaderboard entries).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub rows: Coord,
    pub cols: Coord,
    pub mines: CellCount,
    pub leaderboard_capacity: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked(
            (DEFAULT_ROWS, DEFAULT_COLS),
            DEFAULT_MINES,
            DEFAULT_LEADERBOARD_CAPACITY,
        )
    }
}

impl GameConfig {
    pub const fn new_unchecked(
        (rows, cols): Coord2,
        mines: CellCount,
        leaderboard_capacity: usize,
    ) -> Self {
        Self {
            rows,
            cols,
            mines,
            leaderboard_capacity,
        }
    }

    pub fn new(size: Coord2, mines: CellCount, leaderboard_capacity: usize) -> Result<Self> {
        let config = Self::new_unchecked(size, mines, leaderboard_capacity);
        config.validate()?;
        Ok(config)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(raw).map_err(|err| GameError::ConfigFormat(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects boards where placement could never finish or nothing could be ranked.
    pub fn validate(&self) -> Result<()> {
        let cells = self.total_cells();
        if self.mines >= cells || self.leaderboard_capacity == 0 {
            return Err(GameError::InvalidConfiguration {
                mines: self.mines,
                cells,
            });
        }
        Ok(())
    }

    pub const fn size(&self) -> Coord2 {
        (self.rows, self.cols)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.rows, self.cols)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum RevealOutcome {
    #[default]
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }
}
