use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Invalid cell encoding {0:#06x}")]
    InvalidCell(u16),
    #[error("Invalid seed, expected up to 16 hex digits")]
    InvalidSeed,
    #[error("Game is not running, no new moves are accepted")]
    NotRunning,
    #[error("Board is still settling")]
    Busy,
}

pub type Result<T> = core::result::Result<T, GameError>;
