//! Immutable position snapshot.
//!
//! A `Position` owns twelve disjoint occupancy masks (see `Piece::index`),
//! the side to move, castling bookkeeping, the en-passant target, a window of
//! recent hashes and the development status. Positions are only produced by
//! setup or by applying a move to an existing position; nothing mutates one
//! after construction, so they can be shared across search threads freely.

use std::fmt;
use std::sync::Arc;

use crate::bit_utils::{multi_or, set_bits, square_mask};
use crate::errors::{PositionError, PositionResult};
use crate::game_state::chess_rules::{RECENT_HASH_COUNT, WIN_SCORE};
use crate::game_state::chess_types::*;
use crate::game_state::development_status::DevelopmentStatus;
use crate::game_state::position_hasher::{HashedFields, ZobristHasher};
use crate::moves::chess_move::ChessMove;
use crate::move_generation::attack_moves::generate_attack_moves;
use crate::utils::algebraic::square_to_algebraic;
use crate::utils::fen_parser::parse_fen;

/// Raw input for building a position outside of a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionSetup {
    pub piece_locations: [u64; PIECE_COUNT],
    pub friendly_side: Color,
    pub castle_rights: CastlingRights,
    pub castle_status: CastleStatus,
    pub en_passant_square: Option<Square>,
}

impl PositionSetup {
    pub fn empty() -> Self {
        Self {
            piece_locations: [0u64; PIECE_COUNT],
            friendly_side: Color::Light,
            castle_rights: 0,
            castle_status: 0,
            en_passant_square: None,
        }
    }

    pub fn starting() -> Self {
        const BACK_RANK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        let mut setup = Self::empty();
        for color in Color::BOTH {
            let (back_rank, pawn_rank) = match color {
                Color::Light => (0u8, 8u8),
                Color::Dark => (56, 48),
            };
            for (file, kind) in (0u8..).zip(BACK_RANK) {
                setup.piece_locations[Piece::new(color, kind).index()] |=
                    square_mask(back_rank + file);
            }
            setup.piece_locations[Piece::new(color, PieceKind::Pawn).index()] =
                0xFFu64 << pawn_rank;
        }
        setup.castle_rights = ALL_CASTLING_RIGHTS;
        setup
    }

    /// Place `piece` on `square`, builder style.
    #[must_use]
    pub fn with_piece(mut self, piece: Piece, square: Square) -> Self {
        self.piece_locations[piece.index()] |= square_mask(square);
        self
    }
}

impl Default for PositionSetup {
    fn default() -> Self {
        Self::empty()
    }
}

/// Decided outcome of a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationState {
    LightWin,
    DarkWin,
}

impl TerminationState {
    /// Score from light's point of view.
    #[inline]
    pub const fn value(self) -> i32 {
        match self {
            TerminationState::LightWin => WIN_SCORE,
            TerminationState::DarkWin => -WIN_SCORE,
        }
    }
}

#[derive(Clone)]
pub struct Position {
    piece_locations: [u64; PIECE_COUNT],
    friendly_side: Color,
    castle_rights: CastlingRights,
    castle_status: CastleStatus,
    en_passant_square: Option<Square>,
    recent_hashes: [u64; RECENT_HASH_COUNT],
    repeats_dropped_hash: bool,
    development_status: DevelopmentStatus,
    hasher: Arc<ZobristHasher>,
}

impl Position {
    /// Validate `setup` and build a position with no known history.
    pub fn from_setup(setup: PositionSetup, hasher: Arc<ZobristHasher>) -> PositionResult<Self> {
        let mut seen = 0u64;
        for bitboard in setup.piece_locations {
            let overlap = seen & bitboard;
            if overlap != 0 {
                return Err(PositionError::OverlappingPieces {
                    square: overlap.trailing_zeros() as Square,
                });
            }
            seen |= bitboard;
        }

        for color in Color::BOTH {
            let kings = setup.piece_locations[Piece::new(color, PieceKind::King).index()];
            if kings.count_ones() > 1 {
                return Err(PositionError::MultipleKings { color });
            }
        }

        Ok(Self::from_validated_setup(setup, hasher))
    }

    pub fn from_fen(fen: &str, hasher: Arc<ZobristHasher>) -> PositionResult<Self> {
        Self::from_setup(parse_fen(fen)?, hasher)
    }

    /// Standard starting position.
    pub fn start(hasher: Arc<ZobristHasher>) -> Self {
        Self::from_validated_setup(PositionSetup::starting(), hasher)
    }

    fn from_validated_setup(setup: PositionSetup, hasher: Arc<ZobristHasher>) -> Self {
        let fields = HashedFields {
            piece_locations: &setup.piece_locations,
            castle_rights: setup.castle_rights,
            en_passant_square: setup.en_passant_square,
        };
        let mut recent_hashes = [0u64; RECENT_HASH_COUNT];
        recent_hashes[0] = hasher.full_key(fields, setup.friendly_side);

        Self {
            development_status: DevelopmentStatus::from_piece_locations(&setup.piece_locations),
            piece_locations: setup.piece_locations,
            friendly_side: setup.friendly_side,
            castle_rights: setup.castle_rights,
            castle_status: setup.castle_status,
            en_passant_square: setup.en_passant_square,
            recent_hashes,
            repeats_dropped_hash: false,
            hasher,
        }
    }

    /// Build the position that follows `self` once the given fields have been
    /// updated by a move. Flips the side to move, derives the hash
    /// incrementally and pushes it onto the recent-hash window. The oldest
    /// slot is compared with the new hash before it is dropped.
    pub(crate) fn successor(
        &self,
        piece_locations: [u64; PIECE_COUNT],
        castle_rights: CastlingRights,
        castle_status: CastleStatus,
        en_passant_square: Option<Square>,
        development_status: DevelopmentStatus,
    ) -> Self {
        let hash = self.hasher.transition_key(
            self.hash(),
            self.hashed_fields(),
            HashedFields {
                piece_locations: &piece_locations,
                castle_rights,
                en_passant_square,
            },
        );

        let mut recent_hashes = [0u64; RECENT_HASH_COUNT];
        recent_hashes[0] = hash;
        recent_hashes[1..].copy_from_slice(&self.recent_hashes[..RECENT_HASH_COUNT - 1]);
        let repeats_dropped_hash = hash == self.recent_hashes[RECENT_HASH_COUNT - 1];

        Self {
            piece_locations,
            friendly_side: self.friendly_side.opposite(),
            castle_rights,
            castle_status,
            en_passant_square,
            recent_hashes,
            repeats_dropped_hash,
            development_status,
            hasher: Arc::clone(&self.hasher),
        }
    }

    fn hashed_fields(&self) -> HashedFields<'_> {
        HashedFields {
            piece_locations: &self.piece_locations,
            castle_rights: self.castle_rights,
            en_passant_square: self.en_passant_square,
        }
    }

    #[inline]
    pub fn piece_locations(&self, piece: Piece) -> u64 {
        self.piece_locations[piece.index()]
    }

    #[inline]
    pub fn all_piece_locations(&self) -> &[u64; PIECE_COUNT] {
        &self.piece_locations
    }

    #[inline]
    pub fn side_locations(&self, color: Color) -> u64 {
        let start = color.index() * 6;
        multi_or(&self.piece_locations[start..start + 6])
    }

    #[inline]
    pub fn occupied_squares(&self) -> u64 {
        multi_or(&self.piece_locations)
    }

    #[inline]
    pub fn friendly_side(&self) -> Color {
        self.friendly_side
    }

    #[inline]
    pub fn enemy_side(&self) -> Color {
        self.friendly_side.opposite()
    }

    #[inline]
    pub fn castle_rights(&self) -> CastlingRights {
        self.castle_rights
    }

    #[inline]
    pub fn castle_status(&self) -> CastleStatus {
        self.castle_status
    }

    #[inline]
    pub fn en_passant_square(&self) -> Option<Square> {
        self.en_passant_square
    }

    #[inline]
    pub fn development_status(&self) -> DevelopmentStatus {
        self.development_status
    }

    #[inline]
    pub fn hash(&self) -> u64 {
        self.recent_hashes[0]
    }

    /// Most recent first; slot 0 is always this position's hash.
    #[inline]
    pub fn recent_hashes(&self) -> &[u64; RECENT_HASH_COUNT] {
        &self.recent_hashes
    }

    #[inline]
    pub fn hasher(&self) -> &Arc<ZobristHasher> {
        &self.hasher
    }

    /// Occupant of `square`, scanning masks in piece index order.
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        let mask = square_mask(square);
        Piece::ALL
            .into_iter()
            .find(|piece| self.piece_locations[piece.index()] & mask != 0)
    }

    /// Kind of `color`'s piece on `square`, if that side has one there.
    pub fn piece_kind_at(&self, color: Color, square: Square) -> Option<PieceKind> {
        let mask = square_mask(square);
        PieceKind::ALL
            .into_iter()
            .find(|&kind| self.piece_locations(Piece::new(color, kind)) & mask != 0)
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        let kings = self.piece_locations(Piece::new(color, PieceKind::King));
        set_bits(kings).next()
    }

    /// Union of every square attacked by `color` given the current occupancy.
    pub fn attacked_squares(&self, color: Color) -> u64 {
        let occupancy = self.occupied_squares();
        let mut attacked = 0u64;
        for kind in PieceKind::ALL {
            let piece = Piece::new(color, kind);
            for square in set_bits(self.piece_locations(piece)) {
                attacked |= piece.attack_set(square, occupancy);
            }
        }
        attacked
    }

    /// Whether `color`'s king stands on a square its opponent attacks.
    pub fn is_king_attacked(&self, color: Color) -> bool {
        let king = self.piece_locations(Piece::new(color, PieceKind::King));
        king & self.attacked_squares(color.opposite()) != 0
    }

    /// A position is decided when the side to move can take the enemy king.
    /// Only that direction is tested; a side to move left in check by its
    /// own previous move is reported on the following ply.
    pub fn termination_state(&self) -> Option<TerminationState> {
        if self.is_king_attacked(self.enemy_side()) {
            Some(match self.friendly_side {
                Color::Light => TerminationState::LightWin,
                Color::Dark => TerminationState::DarkWin,
            })
        } else {
            None
        }
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.termination_state().is_some()
    }

    /// Captures, capture-promotions and en-passant captures for the side to move.
    pub fn attack_moves(&self) -> Vec<ChessMove> {
        generate_attack_moves(self)
    }

    /// Whether this position repeats the one four plies earlier, the
    /// soonest a position can recur. Always false for a setup position.
    #[inline]
    pub fn is_repetition(&self) -> bool {
        self.repeats_dropped_hash
    }

    /// Render the position as FEN with zeroed clocks.
    pub fn to_fen(&self) -> String {
        let mut fen = String::new();
        for rank in (0..8u8).rev() {
            let mut empty = 0;
            for file in 0..8u8 {
                match self.piece_at(rank * 8 + file) {
                    Some(piece) => {
                        if empty > 0 {
                            fen.push(char::from(b'0' + empty));
                            empty = 0;
                        }
                        fen.push(piece.fen_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                fen.push(char::from(b'0' + empty));
            }
            if rank > 0 {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push(match self.friendly_side {
            Color::Light => 'w',
            Color::Dark => 'b',
        });

        fen.push(' ');
        if self.castle_rights == 0 {
            fen.push('-');
        } else {
            for (bit, ch) in [
                (CASTLE_LIGHT_KINGSIDE, 'K'),
                (CASTLE_LIGHT_QUEENSIDE, 'Q'),
                (CASTLE_DARK_KINGSIDE, 'k'),
                (CASTLE_DARK_QUEENSIDE, 'q'),
            ] {
                if self.castle_rights & bit != 0 {
                    fen.push(ch);
                }
            }
        }

        fen.push(' ');
        match self.en_passant_square {
            Some(square) => fen.push_str(
                &square_to_algebraic(square).unwrap_or_else(|_| "-".to_owned()),
            ),
            None => fen.push('-'),
        }

        fen.push_str(" 0 1");
        fen
    }
}

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.piece_locations == other.piece_locations
            && self.friendly_side == other.friendly_side
            && self.castle_rights == other.castle_rights
            && self.castle_status == other.castle_status
            && self.en_passant_square == other.en_passant_square
            && self.recent_hashes == other.recent_hashes
            && self.repeats_dropped_hash == other.repeats_dropped_hash
            && self.development_status == other.development_status
    }
}

impl Eq for Position {}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Position")
            .field("fen", &self.to_fen())
            .field("castle_status", &self.castle_status)
            .field("recent_hashes", &self.recent_hashes)
            .field("repeats_dropped_hash", &self.repeats_dropped_hash)
            .field("development_status", &self.development_status)
            .finish_non_exhaustive()
    }
}
