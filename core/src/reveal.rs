use crate::*;

/// Reveals `coords` and floods outward from zero-count cells.
///
/// Returns the cells that changed from concealed to revealed in this call, in reveal order.
/// Out-of-bounds, revealed, and flagged targets reveal nothing. Propagation stops at numbered cells
/// and never opens a flagged cell. The revealed flag is the visit guard, so every cell is opened at
/// most once and the work list stays bounded by the board size.
pub fn reveal(board: &mut Board, coords: Coord2) -> Vec<Coord2> {
    let mut revealed = Vec::new();
    if !board.contains(coords) {
        return revealed;
    }

    let mut to_visit = vec![coords];
    while let Some(visit_coords) = to_visit.pop() {
        let cell = &mut board[visit_coords];
        if !cell.is_revealable() {
            continue;
        }

        cell.is_revealed = true;
        revealed.push(visit_coords);
        log::trace!(
            "Revealed {:?}, adjacent mines: {}",
            visit_coords,
            cell.adjacent_count
        );

        if cell.is_mine || cell.adjacent_count > 0 {
            continue;
        }

        to_visit.extend(
            board
                .iter_neighbors(visit_coords)
                .filter(|&pos| board[pos].is_revealable()),
        );
    }

    revealed
}
