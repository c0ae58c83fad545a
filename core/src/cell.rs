use serde::{Deserialize, Serialize};

/// One board position. Mutated in place for the whole game.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub is_mine: bool,
    pub is_revealed: bool,
    pub is_flagged: bool,
    /// Mines among the surrounding cells, meaningless on mine cells.
    pub adjacent_count: u8,
}

impl Cell {
    /// Whether a reveal request would open this cell.
    pub const fn is_revealable(self) -> bool {
        !self.is_revealed && !self.is_flagged
    }
}
