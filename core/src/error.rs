use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Working palette has no colors to draw from")]
    EmptyPalette,
}

pub type Result<T> = core::result::Result<T, GameError>;
