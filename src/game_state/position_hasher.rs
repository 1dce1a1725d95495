//! Zobrist hashing support for position identity and repetition tracking.
//!
//! A `ZobristHasher` is an explicit value handed to whatever builds positions.
//! Keys come from a seeded generator so hashes are deterministic per seed,
//! which keeps tests and debugging reproducible. Build one at startup and
//! share it through an `Arc`; it is never mutated afterwards.

use std::sync::Arc;

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::bit_utils::set_bits;
use crate::game_state::chess_types::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZobristHasher {
    piece_square: [[u64; 64]; PIECE_COUNT],
    side_to_move: u64,
    castling: [u64; 16],
    en_passant_file: [u64; 8],
}

/// Hash-relevant fields on one side of a transition.
#[derive(Debug, Clone, Copy)]
pub struct HashedFields<'a> {
    pub piece_locations: &'a [u64; PIECE_COUNT],
    pub castle_rights: CastlingRights,
    pub en_passant_square: Option<Square>,
}

impl ZobristHasher {
    pub const DEFAULT_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

    pub fn from_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);

        let mut piece_square = [[0u64; 64]; PIECE_COUNT];
        for piece in &mut piece_square {
            for key in piece.iter_mut() {
                *key = rng.random();
            }
        }

        let side_to_move = rng.random();

        let mut castling = [0u64; 16];
        for key in &mut castling {
            *key = rng.random();
        }

        let mut en_passant_file = [0u64; 8];
        for key in &mut en_passant_file {
            *key = rng.random();
        }

        Self {
            piece_square,
            side_to_move,
            castling,
            en_passant_file,
        }
    }

    /// Shared hasher built from `DEFAULT_SEED`. Call once at the composition
    /// root and pass the `Arc` down.
    pub fn default_shared() -> Arc<Self> {
        Arc::new(Self::from_seed(Self::DEFAULT_SEED))
    }

    #[inline]
    pub fn piece_square_key(&self, piece: Piece, square: Square) -> u64 {
        self.piece_square[piece.index()][square as usize]
    }

    #[inline]
    pub fn castling_key(&self, castle_rights: CastlingRights) -> u64 {
        self.castling[(castle_rights & ALL_CASTLING_RIGHTS) as usize]
    }

    #[inline]
    pub fn en_passant_key(&self, en_passant_square: Option<Square>) -> u64 {
        en_passant_square.map_or(0, |sq| self.en_passant_file[(sq % 8) as usize])
    }

    /// Hash computed from scratch.
    pub fn full_key(&self, fields: HashedFields<'_>, side_to_move: Color) -> u64 {
        let mut key = 0u64;

        for piece in Piece::ALL {
            for sq in set_bits(fields.piece_locations[piece.index()]) {
                key ^= self.piece_square_key(piece, sq);
            }
        }

        if side_to_move == Color::Dark {
            key ^= self.side_to_move;
        }

        key ^= self.castling_key(fields.castle_rights);
        key ^ self.en_passant_key(fields.en_passant_square)
    }

    /// Derive the successor hash from `previous_key` by toggling only what
    /// changed between `before` and `after`. The side to move always flips.
    pub fn transition_key(
        &self,
        previous_key: u64,
        before: HashedFields<'_>,
        after: HashedFields<'_>,
    ) -> u64 {
        let mut key = previous_key ^ self.side_to_move;

        for piece in Piece::ALL {
            let changed =
                before.piece_locations[piece.index()] ^ after.piece_locations[piece.index()];
            for sq in set_bits(changed) {
                key ^= self.piece_square_key(piece, sq);
            }
        }

        key ^= self.castling_key(before.castle_rights) ^ self.castling_key(after.castle_rights);
        key ^ self.en_passant_key(before.en_passant_square)
            ^ self.en_passant_key(after.en_passant_square)
    }
}

impl Default for ZobristHasher {
    fn default() -> Self {
        Self::from_seed(Self::DEFAULT_SEED)
    }
}

#[cfg(test)]
mod tests {
    use super::{HashedFields, ZobristHasher};
    use crate::game_state::chess_types::*;

    fn fields(locations: &[u64; PIECE_COUNT], rights: CastlingRights, ep: Option<Square>) -> HashedFields<'_> {
        HashedFields {
            piece_locations: locations,
            castle_rights: rights,
            en_passant_square: ep,
        }
    }

    #[test]
    fn same_seed_gives_same_keys() {
        assert_eq!(ZobristHasher::from_seed(7), ZobristHasher::from_seed(7));
        assert_ne!(ZobristHasher::from_seed(7), ZobristHasher::from_seed(8));
    }

    #[test]
    fn side_to_move_and_rights_change_hash() {
        let hasher = ZobristHasher::default();
        let mut locations = [0u64; PIECE_COUNT];
        locations[Piece::new(Color::Light, PieceKind::King).index()] = 1 << 4;
        locations[Piece::new(Color::Dark, PieceKind::King).index()] = 1 << 60;

        let light = hasher.full_key(fields(&locations, 0, None), Color::Light);
        let dark = hasher.full_key(fields(&locations, 0, None), Color::Dark);
        let with_rights = hasher.full_key(fields(&locations, CASTLE_LIGHT_KINGSIDE, None), Color::Light);
        let with_ep = hasher.full_key(fields(&locations, 0, Some(20)), Color::Light);

        assert_ne!(light, dark);
        assert_ne!(light, with_rights);
        assert_ne!(light, with_ep);
    }

    #[test]
    fn transition_key_matches_full_recompute() {
        let hasher = ZobristHasher::from_seed(99);
        let pawn = Piece::new(Color::Light, PieceKind::Pawn);
        let king = Piece::new(Color::Light, PieceKind::King);

        let mut before = [0u64; PIECE_COUNT];
        before[pawn.index()] = 1 << 12;
        before[king.index()] = 1 << 4;
        let mut after = before;
        after[pawn.index()] = 1 << 28;

        let before_fields = fields(&before, ALL_CASTLING_RIGHTS, None);
        let after_fields = fields(&after, CASTLE_DARK_KINGSIDE, Some(20));
        let previous = hasher.full_key(before_fields, Color::Light);

        assert_eq!(
            hasher.transition_key(previous, before_fields, after_fields),
            hasher.full_key(after_fields, Color::Dark)
        );
    }
}
