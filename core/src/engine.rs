use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - NotStarted -> InProgress
/// - InProgress -> Won
/// - InProgress -> Lost
///
/// Only [`GameSession::reset`] leaves `Won` or `Lost`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// No reveal yet, mines are not placed
    #[default]
    NotStarted,
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_not_started(self) -> bool {
        matches!(self, Self::NotStarted)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Counters shown next to the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub status: GameStatus,
    /// Mine count minus placed flags, negative when over-flagged.
    pub mines_remaining: i32,
    pub elapsed_seconds: u32,
    pub mine_count: CellCount,
}

impl GameState {
    pub fn new(mine_count: CellCount) -> Self {
        Self {
            status: GameStatus::NotStarted,
            mines_remaining: i32::from(mine_count),
            elapsed_seconds: 0,
            mine_count,
        }
    }
}

/// A cell opened by a reveal request, as a renderer needs it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealedCell {
    pub coords: Coord2,
    pub adjacent_count: u8,
}

/// Everything a reveal request changed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RevealReport {
    pub outcome: RevealOutcome,
    /// Newly revealed cells, empty on `NoChange` and `HitMine`.
    pub revealed: Vec<RevealedCell>,
    /// Every mine on the board, only filled on `HitMine`.
    pub mines: Vec<Coord2>,
}

impl RevealReport {
    fn no_change() -> Self {
        Self::default()
    }
}

/// One game from the first reveal to a win or loss.
#[derive(Clone, Debug)]
pub struct GameSession<P = RandomMinePlacer> {
    config: GameConfig,
    board: Board,
    state: GameState,
    revealed_count: CellCount,
    triggered_mine: Option<Coord2>,
    placer: P,
}

impl GameSession {
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self> {
        Self::new(config, RandomMinePlacer::from_seed(seed))
    }
}

impl<P: MinePlacer> GameSession<P> {
    pub fn new(config: GameConfig, placer: P) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            board: Board::new(config.size()),
            state: GameState::new(config.mines),
            revealed_count: 0,
            triggered_mine: None,
            placer,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn status(&self) -> GameStatus {
        self.state.status
    }

    pub fn is_finished(&self) -> bool {
        self.state.status.is_finished()
    }

    pub fn mines_remaining(&self) -> i32 {
        self.state.mines_remaining
    }

    pub fn elapsed_seconds(&self) -> u32 {
        self.state.elapsed_seconds
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<Cell> {
        self.board.get(coords)
    }

    /// The mine that ended the game, if it was lost.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    /// Safe cells revealed so far, the score of this game.
    pub fn tiles_revealed(&self) -> CellCount {
        self.revealed_count
    }

    /// The score to rank, once the game is over.
    pub fn final_score(&self) -> Option<CellCount> {
        self.is_finished().then_some(self.revealed_count)
    }

    /// Abandons the current game and starts a fresh one with the same configuration.
    pub fn reset(&mut self) {
        log::debug!(
            "Reset game, previous status {:?} after {}s",
            self.state.status,
            self.state.elapsed_seconds
        );
        self.board = Board::new(self.config.size());
        self.state = GameState::new(self.config.mines);
        self.revealed_count = 0;
        self.triggered_mine = None;
    }

    pub fn on_reveal(&mut self, coords: Coord2) -> Result<RevealReport> {
        let coords = self.board.validate_coords(coords)?;

        if self.is_finished() || !self.board[coords].is_revealable() {
            return Ok(RevealReport::no_change());
        }

        if self.state.status.is_not_started() {
            self.start(coords)?;
        }

        if self.board[coords].is_mine {
            self.triggered_mine = Some(coords);
            self.end_game(GameStatus::Lost);
            return Ok(RevealReport {
                outcome: RevealOutcome::HitMine,
                revealed: Vec::new(),
                mines: self.board.mine_coords(),
            });
        }

        let revealed: Vec<_> = reveal(&mut self.board, coords)
            .into_iter()
            .map(|coords| RevealedCell {
                coords,
                adjacent_count: self.board[coords].adjacent_count,
            })
            .collect();
        // bounded by the board size
        self.revealed_count += revealed.len() as CellCount;

        let outcome = if self.revealed_count == self.config.safe_cells() {
            self.end_game(GameStatus::Won);
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        };

        Ok(RevealReport {
            outcome,
            revealed,
            mines: Vec::new(),
        })
    }

    pub fn on_flag_toggle(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.board.validate_coords(coords)?;

        let cell = &mut self.board[coords];
        if self.state.status.is_finished() || cell.is_revealed {
            return Ok(MarkOutcome::NoChange);
        }

        cell.is_flagged = !cell.is_flagged;
        if cell.is_flagged {
            self.state.mines_remaining -= 1;
        } else {
            self.state.mines_remaining += 1;
        }
        Ok(MarkOutcome::Changed)
    }

    /// Advances the clock by one second while the game is running.
    pub fn on_tick(&mut self) -> bool {
        if matches!(self.state.status, GameStatus::InProgress) {
            self.state.elapsed_seconds += 1;
            true
        } else {
            false
        }
    }

    fn start(&mut self, first: Coord2) -> Result<()> {
        self.placer.place(&mut self.board, first, self.config.mines)?;
        compute_all(&mut self.board);
        self.state.status = GameStatus::InProgress;
        log::debug!("Game started at {:?}", first);
        Ok(())
    }

    fn end_game(&mut self, status: GameStatus) {
        self.state.status = status;
        log::debug!(
            "Game ended {:?} with {} tiles after {}s",
            status,
            self.revealed_count,
            self.state.elapsed_seconds
        );
    }
}
