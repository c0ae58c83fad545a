use thiserror::Error;

use crate::CellCount;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Coordinates are outside the board")]
    OutOfBounds,
    #[error("Invalid configuration: {mines} mines do not fit in {cells} cells")]
    InvalidConfiguration { mines: CellCount, cells: CellCount },
    #[error("Malformed configuration: {0}")]
    ConfigFormat(String),
    #[error("The name \"{0}\" is already taken")]
    DuplicateName(String),
    #[error("Name is empty")]
    EmptyName,
    #[error("Storage failure: {0}")]
    Storage(String),
}

pub type Result<T> = core::result::Result<T, GameError>;
