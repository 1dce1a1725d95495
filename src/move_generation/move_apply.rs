//! Transition model: derive the successor position for a move.
//!
//! Every rule copies the twelve masks, moves the mover, clears whatever was
//! captured, updates castling bookkeeping, the en-passant square and the
//! development status, then hands off to `Position::successor` which flips
//! the side, hashes incrementally and pushes the recent-hash window.
//! The input position is never modified.

use crate::bit_utils::square_mask;
use crate::game_state::chess_types::*;
use crate::game_state::development_status::DevelopmentStatus;
use crate::moves::chess_move::{ChessMove, MoveKind};

impl ChessMove {
    /// Apply this move to `position`. The move must be legal in `position`
    /// (as produced by a generator for it); that is checked in debug builds only.
    pub fn evolve(self, position: &Position) -> Position {
        debug_assert!(
            position.piece_kind_at(position.friendly_side(), self.from()) == Some(self.moved_kind()),
            "{self:?} does not move a friendly {:?}",
            self.moved_kind()
        );

        match self.kind() {
            MoveKind::Normal | MoveKind::Capture => apply_standard(position, self),
            MoveKind::EnPassant => apply_en_passant(position, self),
            MoveKind::Promotion => apply_promotion(position, self),
            MoveKind::Castle => apply_castle(position, self),
        }
    }
}

fn apply_standard(position: &Position, mv: ChessMove) -> Position {
    let friendly = position.friendly_side();
    let (from, to) = (mv.from(), mv.to());
    let moved = mv.moved_kind();

    let mut locations = *position.all_piece_locations();
    let mover = Piece::new(friendly, moved).index();
    locations[mover] &= !square_mask(from);
    locations[mover] |= square_mask(to);

    let mut development = position.development_status();
    if let Some(captured) = mv.captured_kind() {
        development = clear_captured(&mut locations, friendly.opposite(), captured, to, development);
    }

    let en_passant_square = if moved == PieceKind::Pawn && from.abs_diff(to) == 16 {
        Some((from + to) / 2)
    } else {
        None
    };

    position.successor(
        locations,
        updated_castling_rights(position.castle_rights(), friendly, from, to, moved),
        position.castle_status(),
        en_passant_square,
        development,
    )
}

fn apply_en_passant(position: &Position, mv: ChessMove) -> Position {
    let friendly = position.friendly_side();
    let (from, to) = (mv.from(), mv.to());

    let mut locations = *position.all_piece_locations();
    let pawn = Piece::new(friendly, PieceKind::Pawn).index();
    locations[pawn] &= !square_mask(from);
    locations[pawn] |= square_mask(to);

    // The passed pawn sits beside the origin, on the destination's file.
    let passed_pawn_square = (from / 8) * 8 + to % 8;
    locations[Piece::new(friendly.opposite(), PieceKind::Pawn).index()] &=
        !square_mask(passed_pawn_square);

    position.successor(
        locations,
        position.castle_rights(),
        position.castle_status(),
        None,
        position.development_status(),
    )
}

fn apply_promotion(position: &Position, mv: ChessMove) -> Position {
    let friendly = position.friendly_side();
    let (from, to) = (mv.from(), mv.to());
    debug_assert!(mv.promotion_kind().is_some(), "{mv:?} names no promoted kind");
    let promoted = mv.promotion_kind().unwrap_or(PieceKind::Queen);
    debug_assert!(promoted.is_promotion_target());

    let mut locations = *position.all_piece_locations();
    locations[Piece::new(friendly, PieceKind::Pawn).index()] &= !square_mask(from);
    locations[Piece::new(friendly, promoted).index()] |= square_mask(to);

    let mut development = position.development_status().after_promotion(promoted);
    if let Some(captured) = mv.captured_kind() {
        development = clear_captured(&mut locations, friendly.opposite(), captured, to, development);
    }

    position.successor(
        locations,
        updated_castling_rights(position.castle_rights(), friendly, from, to, PieceKind::Pawn),
        position.castle_status(),
        None,
        development,
    )
}

fn apply_castle(position: &Position, mv: ChessMove) -> Position {
    let friendly = position.friendly_side();
    let Some(zone) = mv.castle_zone() else {
        unreachable!("{mv:?} is tagged as a castle but lands on no castle square");
    };

    let mut locations = *position.all_piece_locations();
    let king = Piece::new(friendly, PieceKind::King).index();
    let rook = Piece::new(friendly, PieceKind::Rook).index();
    locations[king] &= !square_mask(zone.king_from());
    locations[king] |= square_mask(zone.king_to());
    locations[rook] &= !square_mask(zone.rook_from());
    locations[rook] |= square_mask(zone.rook_to());

    position.successor(
        locations,
        position.castle_rights() & !CastleZone::rights_of(friendly),
        position.castle_status() | zone.bit(),
        None,
        position.development_status(),
    )
}

fn clear_captured(
    locations: &mut [u64; PIECE_COUNT],
    enemy: Color,
    captured: PieceKind,
    square: Square,
    development: DevelopmentStatus,
) -> DevelopmentStatus {
    let victim = Piece::new(enemy, captured).index();
    debug_assert!(locations[victim] & square_mask(square) != 0);
    locations[victim] &= !square_mask(square);
    development.after_capture(captured)
}

/// Rights lost when a king leaves home, a rook leaves its corner or a corner
/// rook is captured.
fn updated_castling_rights(
    rights: CastlingRights,
    moving_color: Color,
    from: Square,
    to: Square,
    moved: PieceKind,
) -> CastlingRights {
    let mut rights = rights;

    if moved == PieceKind::King {
        rights &= !CastleZone::rights_of(moving_color);
    }

    if moved == PieceKind::Rook {
        if let Some(zone) = CastleZone::from_rook_origin(from) {
            rights &= !zone.bit();
        }
    }

    if let Some(zone) = CastleZone::from_rook_origin(to) {
        rights &= !zone.bit();
    }

    rights
}
