use thiserror::Error;

use crate::Pos;

/// errors surfaced by the simulation core.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid grid dimension {rows}x{cols}, each must be in 1..=i32::MAX")]
    InvalidDimension { rows: usize, cols: usize },

    #[error("position {pos} is outside of the {rows}x{cols} grid")]
    OutOfBounds { pos: Pos, rows: usize, cols: usize },

    #[error("invalid cell value {0}, expected 0 (dead) or 1 (alive)")]
    InvalidCell(u8),

    #[error("invalid pattern character {found:?} at line {line}, column {column}")]
    InvalidPattern {
        line: usize,
        column: usize,
        found: char,
    },

    #[error("could not read pattern: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
