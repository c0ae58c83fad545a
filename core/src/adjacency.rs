use crate::*;

/// Mines among the neighbors of `coords`.
pub fn adjacent_mine_count(board: &Board, coords: Coord2) -> u8 {
    // at most 8 neighbors
    board
        .iter_neighbors(coords)
        .filter(|&pos| board[pos].is_mine)
        .count() as u8
}

/// Fills in `adjacent_count` for every safe cell. Mine cells are left untouched.
pub fn compute_all(board: &mut Board) {
    for coords in board.coords() {
        if board[coords].is_mine {
            continue;
        }
        let count = adjacent_mine_count(board, coords);
        board[coords].adjacent_count = count;
    }
}
