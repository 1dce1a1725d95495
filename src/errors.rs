//! Error types for position setup and search.
//!
//! Transitions on a well-formed position are infallible; only building a
//! position from outside input and an interrupted search produce errors.

use thiserror::Error;

use crate::game_state::chess_types::{Color, Square};

/// Failure to build a `Position` from a setup or FEN string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PositionError {
    /// A FEN field is missing or could not be parsed
    #[error("Malformed FEN {field}: {reason}")]
    MalformedFen { field: &'static str, reason: String },

    /// Algebraic coordinate outside `a1..h8`
    #[error("Invalid square: {text}")]
    InvalidSquare { text: String },

    /// Two occupancy masks claim the same square
    #[error("Square {square} is occupied by more than one piece")]
    OverlappingPieces { square: Square },

    #[error("{color:?} has more than one king")]
    MultipleKings { color: Color },
}

/// The cancellation outcome of an interruptible search. Carries no score.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Search interrupted")]
pub struct SearchInterrupted;

pub type PositionResult<T> = Result<T, PositionError>;
