//! Game-phase indicator carried by every position.
//!
//! The value is a material phase counter: minor pieces weigh 1, rooks 2 and
//! queens 4, so a full set of pieces sums to `MAX_MATERIAL_PHASE`. It is
//! computed once when a position is set up and then adjusted on captures and
//! promotions only.

use crate::game_state::chess_types::{PieceKind, PIECE_COUNT};

pub const MAX_MATERIAL_PHASE: u16 = 24;

const PHASE_WEIGHTS: [u16; 6] = [0, 1, 1, 2, 4, 0];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DevelopmentStatus {
    material_phase: u16,
}

impl DevelopmentStatus {
    #[inline]
    pub const fn phase_weight(kind: PieceKind) -> u16 {
        PHASE_WEIGHTS[kind.index()]
    }

    pub fn from_piece_locations(piece_locations: &[u64; PIECE_COUNT]) -> Self {
        let material_phase = piece_locations
            .iter()
            .enumerate()
            .map(|(index, bb)| PHASE_WEIGHTS[index % 6] * bb.count_ones() as u16)
            .sum();
        Self { material_phase }
    }

    #[inline]
    #[must_use]
    pub fn after_capture(self, captured: PieceKind) -> Self {
        Self {
            material_phase: self
                .material_phase
                .saturating_sub(Self::phase_weight(captured)),
        }
    }

    #[inline]
    #[must_use]
    pub fn after_promotion(self, promoted: PieceKind) -> Self {
        Self {
            material_phase: self
                .material_phase
                .saturating_add(Self::phase_weight(promoted)),
        }
    }

    /// Raw counter; may exceed `MAX_MATERIAL_PHASE` after promotions.
    #[inline]
    pub const fn material_phase(self) -> u16 {
        self.material_phase
    }

    /// Middle-game share in `0..=MAX_MATERIAL_PHASE`, used for interpolation.
    #[inline]
    pub fn midgame_weight(self) -> i32 {
        i32::from(self.material_phase.min(MAX_MATERIAL_PHASE))
    }
}

#[cfg(test)]
mod tests {
    use super::{DevelopmentStatus, MAX_MATERIAL_PHASE};
    use crate::game_state::chess_types::{Color, Piece, PieceKind, PIECE_COUNT};

    fn starting_locations() -> [u64; PIECE_COUNT] {
        let mut locations = [0u64; PIECE_COUNT];
        for color in Color::BOTH {
            let back = if color == Color::Light { 0 } else { 56 };
            let pawns = if color == Color::Light { 8 } else { 48 };
            locations[Piece::new(color, PieceKind::Pawn).index()] = 0xFFu64 << pawns;
            locations[Piece::new(color, PieceKind::Rook).index()] = (1u64 << back) | (1u64 << (back + 7));
            locations[Piece::new(color, PieceKind::Knight).index()] =
                (1u64 << (back + 1)) | (1u64 << (back + 6));
            locations[Piece::new(color, PieceKind::Bishop).index()] =
                (1u64 << (back + 2)) | (1u64 << (back + 5));
            locations[Piece::new(color, PieceKind::Queen).index()] = 1u64 << (back + 3);
            locations[Piece::new(color, PieceKind::King).index()] = 1u64 << (back + 4);
        }
        locations
    }

    #[test]
    fn full_board_is_maximal_phase() {
        let status = DevelopmentStatus::from_piece_locations(&starting_locations());
        assert_eq!(status.material_phase(), MAX_MATERIAL_PHASE);
        assert_eq!(status.midgame_weight(), 24);
    }

    #[test]
    fn captures_and_promotions_adjust_incrementally() {
        let status = DevelopmentStatus::from_piece_locations(&starting_locations());
        let after_queen_loss = status.after_capture(PieceKind::Queen);
        assert_eq!(after_queen_loss.material_phase(), 20);
        assert_eq!(after_queen_loss.after_capture(PieceKind::Pawn), after_queen_loss);
        assert_eq!(after_queen_loss.after_promotion(PieceKind::Queen), status);
    }

    #[test]
    fn midgame_weight_is_clamped() {
        let status = DevelopmentStatus::from_piece_locations(&starting_locations())
            .after_promotion(PieceKind::Queen);
        assert_eq!(status.material_phase(), 28);
        assert_eq!(status.midgame_weight(), 24);
    }
}
