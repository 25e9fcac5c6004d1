use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Coordinates out of bounds")]
    OutOfBounds,
    #[error("Grid must have between 1 and 255 rows and columns")]
    InvalidSize,
    #[error("Grid shape does not match declared size")]
    ShapeMismatch,
}

pub type Result<T> = core::result::Result<T, GameError>;
