use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board must be at least 2x2 to carve out its corner cells")]
    BoardTooSmall,
    #[error("Usable cell count must be even so every tile has a partner")]
    OddUsableCells,
    #[error("Palette must hold at least one tile")]
    EmptyPalette,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
}

pub type Result<T> = core::result::Result<T, GameError>;
