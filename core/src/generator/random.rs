use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::*;

/// Rejection-sampling placement: draws uniform coordinates and keeps every draw that is neither the
/// excluded cell nor already a mine.
#[derive(Clone, Debug)]
pub struct RandomMinePlacer<R = SmallRng> {
    rng: R,
}

impl RandomMinePlacer {
    pub fn from_seed(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomMinePlacer<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl<R: Rng> MinePlacer for RandomMinePlacer<R> {
    fn place(&mut self, board: &mut Board, exclude: Coord2, mines: CellCount) -> Result<()> {
        place_mines(board, exclude, mines, &mut self.rng)
    }
}

pub fn place_mines<R: Rng + ?Sized>(
    board: &mut Board,
    exclude: Coord2,
    mines: CellCount,
    rng: &mut R,
) -> Result<()> {
    check_capacity(board, exclude, mines)?;

    let (rows, cols) = board.size();
    let mut placed = 0;
    while placed < mines {
        let coords = (rng.random_range(0..rows), rng.random_range(0..cols));
        if coords == exclude || board[coords].is_mine {
            continue;
        }
        board[coords].is_mine = true;
        placed += 1;
    }

    log::debug!(
        "Placed {} mines on {:?} board, excluded {:?}",
        placed,
        board.size(),
        exclude
    );
    Ok(())
}
