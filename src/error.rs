//! Error types for the simulation core

use thiserror::Error;

/// Recoverable failures reported by grid, rule, preset and engine operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifeError {
    #[error("coordinates ({x}, {y}) out of range for {width}x{height} grid")]
    OutOfRange {
        x: i64,
        y: i64,
        width: usize,
        height: usize,
    },

    #[error("invalid rule count {count}: neighbor counts must be in 0..=8")]
    InvalidRule { count: u32 },

    #[error("invalid rule notation '{0}', expected something like B3/S23")]
    InvalidRuleNotation(String),

    #[error("invalid pattern character '{ch}' at offset {offset}")]
    InvalidPattern { ch: char, offset: usize },

    #[error("cannot encode coordinate ({x}, {y}): pattern coordinates must be non-negative")]
    UnencodableCoordinate { x: i32, y: i32 },

    #[error("unknown preset: {0}")]
    UnknownPreset(String),
}

pub type Result<T> = std::result::Result<T, LifeError>;
