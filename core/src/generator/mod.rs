use crate::*;
pub use random::*;

mod random;

/// Places hidden mines on a fresh board once the first reveal is known.
pub trait MinePlacer {
    /// Places exactly `mines` mines, never on `exclude`.
    fn place(&mut self, board: &mut Board, exclude: Coord2, mines: CellCount) -> Result<()>;
}

/// Checks that `mines` more mines fit on `board` without touching `exclude`.
pub(crate) fn check_capacity(board: &Board, exclude: Coord2, mines: CellCount) -> Result<()> {
    let exclude = board.validate_coords(exclude)?;
    let cells = board.total_cells();
    let taken = board.mine_count() + CellCount::from(!board[exclude].is_mine);
    if mines > cells.saturating_sub(taken) {
        return Err(GameError::InvalidConfiguration { mines, cells });
    }
    Ok(())
}
