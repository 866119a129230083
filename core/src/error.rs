use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("invalid coordinates")]
    InvalidCoords,
    #[error("too many mines for the board")]
    TooManyMines,
    #[error("board must have at least one cell")]
    EmptyBoard,
    #[error("board shape does not match the configured size")]
    BoardShapeMismatch,
}

pub type Result<T> = core::result::Result<T, GameError>;
