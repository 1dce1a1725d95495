//! Conversions between square indices and algebraic coordinates (`e4`).

use crate::errors::PositionError;
use crate::game_state::chess_types::Square;

/// Convert algebraic notation (for example: "e4") to a square index.
#[inline]
pub fn algebraic_to_square(square: &str) -> Result<Square, PositionError> {
    let invalid = || PositionError::InvalidSquare {
        text: square.to_owned(),
    };

    let &[file, rank] = square.as_bytes() else {
        return Err(invalid());
    };

    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err(invalid());
    }

    Ok((rank - b'1') * 8 + (file - b'a'))
}

/// Convert a square index (`0..=63`) to algebraic notation (for example: "e4").
#[inline]
pub fn square_to_algebraic(square: Square) -> Result<String, PositionError> {
    if square > 63 {
        return Err(PositionError::InvalidSquare {
            text: square.to_string(),
        });
    }

    let file_char = char::from(b'a' + square % 8);
    let rank_char = char::from(b'1' + square / 8);
    Ok(format!("{file_char}{rank_char}"))
}
