//! Per-piece attack dispatch.
//!
//! Every `Piece` maps to a pure `(square, occupancy) -> attack mask` function
//! through a table indexed by the piece's fixed index, so callers never branch
//! on piece kind themselves.

use crate::game_state::chess_types::{Color, Piece, PieceKind, Square, PIECE_COUNT};
use crate::moves::attack_tables::{
    bishop_attacks, king_attacks, knight_attacks, pawn_attacks, queen_attacks, rook_attacks,
    BISHOP_RAYS, QUEEN_RAYS, ROOK_RAYS,
};

pub type AttackFn = fn(Square, u64) -> u64;

fn light_pawn_attack_set(square: Square, _occupancy: u64) -> u64 {
    pawn_attacks(Color::Light, square)
}

fn dark_pawn_attack_set(square: Square, _occupancy: u64) -> u64 {
    pawn_attacks(Color::Dark, square)
}

fn knight_attack_set(square: Square, _occupancy: u64) -> u64 {
    knight_attacks(square)
}

fn king_attack_set(square: Square, _occupancy: u64) -> u64 {
    king_attacks(square)
}

const ATTACK_FNS: [AttackFn; PIECE_COUNT] = [
    light_pawn_attack_set,
    knight_attack_set,
    bishop_attacks,
    rook_attacks,
    queen_attacks,
    king_attack_set,
    dark_pawn_attack_set,
    knight_attack_set,
    bishop_attacks,
    rook_attacks,
    queen_attacks,
    king_attack_set,
];

impl Piece {
    /// Squares this piece attacks from `square` given global `occupancy`.
    #[inline]
    pub fn attack_set(self, square: Square, occupancy: u64) -> u64 {
        ATTACK_FNS[self.index()](square, occupancy)
    }

    /// Attack set on an otherwise empty board.
    #[inline]
    pub fn empty_board_attacks(self, square: Square) -> u64 {
        match self.kind {
            PieceKind::Bishop => BISHOP_RAYS[square as usize],
            PieceKind::Rook => ROOK_RAYS[square as usize],
            PieceKind::Queen => QUEEN_RAYS[square as usize],
            _ => self.attack_set(square, 0),
        }
    }

    /// Whether a blocked attack of this piece can be revealed by removing a
    /// blocker.
    #[inline]
    pub const fn can_xray(self) -> bool {
        self.kind.is_slider()
    }
}
