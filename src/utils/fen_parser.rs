//! FEN-to-`PositionSetup` parser.
//!
//! Reads piece placement, side to move, castling rights and the en-passant
//! square. The move clocks are optional and only checked for being numbers;
//! the tactical core does not track them.

use crate::errors::{PositionError, PositionResult};
use crate::game_state::chess_types::*;
use crate::game_state::position::PositionSetup;
use crate::utils::algebraic::algebraic_to_square;

fn malformed(field: &'static str, reason: impl Into<String>) -> PositionError {
    PositionError::MalformedFen {
        field,
        reason: reason.into(),
    }
}

pub fn parse_fen(fen: &str) -> PositionResult<PositionSetup> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or_else(|| malformed("board", "missing"))?;
    let side_part = parts.next().ok_or_else(|| malformed("side to move", "missing"))?;
    let castling_part = parts
        .next()
        .ok_or_else(|| malformed("castling rights", "missing"))?;
    let en_passant_part = parts
        .next()
        .ok_or_else(|| malformed("en-passant square", "missing"))?;

    for field in ["halfmove clock", "fullmove number"] {
        if let Some(clock) = parts.next() {
            clock
                .parse::<u16>()
                .map_err(|_| malformed(field, format!("not a number: {clock}")))?;
        }
    }

    if parts.next().is_some() {
        return Err(malformed("trailer", "extra fields after fullmove number"));
    }

    let mut setup = PositionSetup::empty();
    parse_board(board_part, &mut setup)?;
    setup.friendly_side = parse_side_to_move(side_part)?;
    setup.castle_rights = parse_castling_rights(castling_part)?;
    setup.en_passant_square = parse_en_passant_square(en_passant_part)?;

    Ok(setup)
}

fn parse_board(board_part: &str, setup: &mut PositionSetup) -> PositionResult<()> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(malformed("board", format!("expected 8 ranks, found {}", ranks.len())));
    }

    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let board_rank = 7 - fen_rank_idx;
        let mut file = 0usize;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(malformed("board", format!("invalid empty-square count '{ch}'")));
                }
                file += empty_count as usize;
                continue;
            }

            let piece = piece_from_fen_char(ch)
                .ok_or_else(|| malformed("board", format!("invalid piece character '{ch}'")))?;

            if file >= 8 {
                return Err(malformed("board", format!("rank {} has too many files", board_rank + 1)));
            }

            setup.piece_locations[piece.index()] |= 1u64 << (board_rank * 8 + file);
            file += 1;
        }

        if file != 8 {
            return Err(malformed(
                "board",
                format!("rank {} does not sum to 8 files", board_rank + 1),
            ));
        }
    }

    Ok(())
}

fn parse_side_to_move(side_part: &str) -> PositionResult<Color> {
    match side_part {
        "w" => Ok(Color::Light),
        "b" => Ok(Color::Dark),
        _ => Err(malformed("side to move", side_part)),
    }
}

fn parse_castling_rights(castling_part: &str) -> PositionResult<CastlingRights> {
    if castling_part == "-" {
        return Ok(0);
    }

    let mut rights: CastlingRights = 0;
    for ch in castling_part.chars() {
        match ch {
            'K' => rights |= CASTLE_LIGHT_KINGSIDE,
            'Q' => rights |= CASTLE_LIGHT_QUEENSIDE,
            'k' => rights |= CASTLE_DARK_KINGSIDE,
            'q' => rights |= CASTLE_DARK_QUEENSIDE,
            _ => return Err(malformed("castling rights", format!("invalid character '{ch}'"))),
        }
    }

    Ok(rights)
}

fn parse_en_passant_square(en_passant_part: &str) -> PositionResult<Option<Square>> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    let square = algebraic_to_square(en_passant_part)?;
    // Only the third and sixth ranks can hold a passed-over square.
    if !matches!(square / 8, 2 | 5) {
        return Err(malformed("en-passant square", en_passant_part));
    }
    Ok(Some(square))
}

fn piece_from_fen_char(ch: char) -> Option<Piece> {
    let color = if ch.is_ascii_uppercase() {
        Color::Light
    } else if ch.is_ascii_lowercase() {
        Color::Dark
    } else {
        return None;
    };

    let kind = match ch.to_ascii_lowercase() {
        'p' => PieceKind::Pawn,
        'n' => PieceKind::Knight,
        'b' => PieceKind::Bishop,
        'r' => PieceKind::Rook,
        'q' => PieceKind::Queen,
        'k' => PieceKind::King,
        _ => return None,
    };

    Some(Piece::new(color, kind))
}
