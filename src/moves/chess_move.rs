//! Packed move descriptor.
//!
//! A move is a `u32` holding origin, destination, kind and the moved,
//! captured and promoted piece kinds:
//!
//! ```text
//! bits  0..6   from square
//! bits  6..12  to square
//! bits 12..15  MoveKind
//! bits 15..18  moved piece kind
//! bits 18..21  captured piece kind (7 = none)
//! bits 21..24  promotion piece kind (7 = none)
//! ```

use std::fmt;

use crate::game_state::chess_types::{CastleZone, PieceKind, Square};
use crate::utils::algebraic::square_to_algebraic;

const FROM_SHIFT: u32 = 0;
const TO_SHIFT: u32 = 6;
const KIND_SHIFT: u32 = 12;
const MOVED_PIECE_SHIFT: u32 = 15;
const CAPTURED_PIECE_SHIFT: u32 = 18;
const PROMOTION_PIECE_SHIFT: u32 = 21;

const SQUARE_MASK: u32 = 0x3F;
const CODE_MASK: u32 = 0x7;
const NO_PIECE_CODE: u32 = 0x7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    Normal,
    Capture,
    EnPassant,
    Promotion,
    Castle,
}

impl MoveKind {
    const fn code(self) -> u32 {
        match self {
            MoveKind::Normal => 0,
            MoveKind::Capture => 1,
            MoveKind::EnPassant => 2,
            MoveKind::Promotion => 3,
            MoveKind::Castle => 4,
        }
    }

    const fn from_code(code: u32) -> Self {
        match code {
            1 => MoveKind::Capture,
            2 => MoveKind::EnPassant,
            3 => MoveKind::Promotion,
            4 => MoveKind::Castle,
            _ => MoveKind::Normal,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChessMove(u32);

impl ChessMove {
    #[inline]
    const fn pack(
        from: Square,
        to: Square,
        kind: MoveKind,
        moved: PieceKind,
        captured: Option<PieceKind>,
        promotion: Option<PieceKind>,
    ) -> Self {
        let captured_code = match captured {
            Some(k) => k.index() as u32,
            None => NO_PIECE_CODE,
        };
        let promotion_code = match promotion {
            Some(k) => k.index() as u32,
            None => NO_PIECE_CODE,
        };
        Self(
            ((from as u32 & SQUARE_MASK) << FROM_SHIFT)
                | ((to as u32 & SQUARE_MASK) << TO_SHIFT)
                | (kind.code() << KIND_SHIFT)
                | ((moved.index() as u32) << MOVED_PIECE_SHIFT)
                | (captured_code << CAPTURED_PIECE_SHIFT)
                | (promotion_code << PROMOTION_PIECE_SHIFT),
        )
    }

    /// Quiet move; a pawn moving two ranks opens an en-passant square.
    #[inline]
    pub const fn normal(from: Square, to: Square, moved: PieceKind) -> Self {
        Self::pack(from, to, MoveKind::Normal, moved, None, None)
    }

    #[inline]
    pub const fn capture(from: Square, to: Square, moved: PieceKind, captured: PieceKind) -> Self {
        Self::pack(from, to, MoveKind::Capture, moved, Some(captured), None)
    }

    /// Pawn capture onto the en-passant square `to`.
    #[inline]
    pub const fn en_passant(from: Square, to: Square) -> Self {
        Self::pack(
            from,
            to,
            MoveKind::EnPassant,
            PieceKind::Pawn,
            Some(PieceKind::Pawn),
            None,
        )
    }

    /// Pawn promotion, optionally capturing. `promoted` must be a knight,
    /// bishop, rook or queen.
    #[inline]
    pub fn promotion(
        from: Square,
        to: Square,
        promoted: PieceKind,
        captured: Option<PieceKind>,
    ) -> Self {
        debug_assert!(
            promoted.is_promotion_target(),
            "cannot promote to {promoted:?}"
        );
        Self::pack(
            from,
            to,
            MoveKind::Promotion,
            PieceKind::Pawn,
            captured,
            Some(promoted),
        )
    }

    #[inline]
    pub const fn castle(zone: CastleZone) -> Self {
        Self::pack(
            zone.king_from(),
            zone.king_to(),
            MoveKind::Castle,
            PieceKind::King,
            None,
            None,
        )
    }

    #[inline]
    pub const fn from(self) -> Square {
        ((self.0 >> FROM_SHIFT) & SQUARE_MASK) as Square
    }

    #[inline]
    pub const fn to(self) -> Square {
        ((self.0 >> TO_SHIFT) & SQUARE_MASK) as Square
    }

    #[inline]
    pub const fn kind(self) -> MoveKind {
        MoveKind::from_code((self.0 >> KIND_SHIFT) & CODE_MASK)
    }

    #[inline]
    pub const fn moved_kind(self) -> PieceKind {
        match PieceKind::from_index(((self.0 >> MOVED_PIECE_SHIFT) & CODE_MASK) as usize) {
            Some(kind) => kind,
            None => PieceKind::Pawn,
        }
    }

    #[inline]
    pub const fn captured_kind(self) -> Option<PieceKind> {
        PieceKind::from_index(((self.0 >> CAPTURED_PIECE_SHIFT) & CODE_MASK) as usize)
    }

    #[inline]
    pub const fn promotion_kind(self) -> Option<PieceKind> {
        PieceKind::from_index(((self.0 >> PROMOTION_PIECE_SHIFT) & CODE_MASK) as usize)
    }

    #[inline]
    pub const fn is_capture(self) -> bool {
        self.captured_kind().is_some()
    }

    /// Zone of a castling move.
    #[inline]
    pub const fn castle_zone(self) -> Option<CastleZone> {
        match self.kind() {
            MoveKind::Castle => CastleZone::from_king_target(self.to()),
            _ => None,
        }
    }
}

impl fmt::Display for ChessMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for square in [self.from(), self.to()] {
            f.write_str(&square_to_algebraic(square).map_err(|_| fmt::Error)?)?;
        }
        if let Some(kind) = self.promotion_kind() {
            write!(f, "{}", kind.symbol())?;
        }
        Ok(())
    }
}

impl fmt::Debug for ChessMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChessMove({self} {:?}", self.kind())?;
        if let Some(captured) = self.captured_kind() {
            write!(f, " x{captured:?}")?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::{ChessMove, MoveKind};
    use crate::game_state::chess_types::{CastleZone, PieceKind, Position};
    use crate::game_state::position_hasher::ZobristHasher;

    #[test]
    fn fields_survive_packing() {
        let mv = ChessMove::promotion(52, 61, PieceKind::Knight, Some(PieceKind::Rook));
        assert_eq!(mv.from(), 52);
        assert_eq!(mv.to(), 61);
        assert_eq!(mv.kind(), MoveKind::Promotion);
        assert_eq!(mv.moved_kind(), PieceKind::Pawn);
        assert_eq!(mv.captured_kind(), Some(PieceKind::Rook));
        assert_eq!(mv.promotion_kind(), Some(PieceKind::Knight));
        assert!(mv.is_capture());
    }

    #[test]
    fn quiet_moves_have_no_capture_or_promotion() {
        let mv = ChessMove::normal(6, 21, PieceKind::Knight);
        assert_eq!(mv.kind(), MoveKind::Normal);
        assert_eq!(mv.captured_kind(), None);
        assert_eq!(mv.promotion_kind(), None);
        assert!(!mv.is_capture());
        assert_eq!(mv.castle_zone(), None);
    }

    #[test]
    fn castle_moves_carry_their_zone() {
        let mv = ChessMove::castle(CastleZone::DarkQueenside);
        assert_eq!(mv.from(), 60);
        assert_eq!(mv.to(), 58);
        assert_eq!(mv.moved_kind(), PieceKind::King);
        assert_eq!(mv.castle_zone(), Some(CastleZone::DarkQueenside));
    }

    #[test]
    fn display_uses_long_algebraic() {
        assert_eq!(ChessMove::normal(12, 28, PieceKind::Pawn).to_string(), "e2e4");
        assert_eq!(
            ChessMove::promotion(52, 60, PieceKind::Queen, None).to_string(),
            "e7e8q"
        );
        assert_eq!(ChessMove::en_passant(36, 43).to_string(), "e5d6");
    }

    #[test]
    #[should_panic(expected = "cannot promote")]
    #[cfg(debug_assertions)]
    fn promoting_to_king_is_a_caller_error() {
        let _ = ChessMove::promotion(52, 60, PieceKind::King, None);
    }

    #[test]
    #[should_panic(expected = "names no promoted kind")]
    #[cfg(debug_assertions)]
    fn promotion_without_a_promoted_kind_is_a_caller_error() {
        let pos = Position::from_fen(
            "4k3/P7/8/8/8/8/8/4K3 w - - 0 1",
            ZobristHasher::default_shared(),
        )
        .expect("FEN should parse");
        let malformed = ChessMove::pack(48, 56, MoveKind::Promotion, PieceKind::Pawn, None, None);
        let _ = malformed.evolve(&pos);
    }
}
