//! Core value types shared by the position, attack generation and search.
//!
//! Squares are indexed `0 == a1`, `7 == h1`, `63 == h8`. Piece kinds are kept
//! in ascending material order so that index order doubles as the
//! least-valuable-attacker order used by exchange evaluation.

pub use crate::game_state::position::Position;

/// Side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Light,
    Dark,
}

impl Color {
    pub const BOTH: [Color; 2] = [Color::Light, Color::Dark];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::Light => 0,
            Color::Dark => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::Light => Color::Dark,
            Color::Dark => Color::Light,
        }
    }

    /// `+1` for light, `-1` for dark.
    #[inline]
    pub const fn orientation(self) -> i32 {
        match self {
            Color::Light => 1,
            Color::Dark => -1,
        }
    }

    /// Rank a pawn of this color promotes on.
    #[inline]
    pub const fn promotion_rank(self) -> u8 {
        match self {
            Color::Light => 7,
            Color::Dark => 0,
        }
    }

    /// Rank a pawn of this color stands on one step before promoting.
    #[inline]
    pub const fn pre_promotion_rank(self) -> u8 {
        match self {
            Color::Light => 6,
            Color::Dark => 1,
        }
    }
}

/// Piece kind (color is represented separately for cache-friendly layouts).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Ascending value order.
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    #[inline]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(PieceKind::Pawn),
            1 => Some(PieceKind::Knight),
            2 => Some(PieceKind::Bishop),
            3 => Some(PieceKind::Rook),
            4 => Some(PieceKind::Queen),
            5 => Some(PieceKind::King),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_slider(self) -> bool {
        matches!(self, PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen)
    }

    #[inline]
    pub const fn is_promotion_target(self) -> bool {
        !matches!(self, PieceKind::Pawn | PieceKind::King)
    }

    #[inline]
    pub const fn symbol(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }
}

/// A colored piece. Index `0..6` are light pieces, `6..12` dark pieces, each in
/// `PieceKind` order; this is the fixed layout of the twelve occupancy masks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

pub const PIECE_COUNT: usize = 12;

impl Piece {
    pub const ALL: [Piece; PIECE_COUNT] = [
        Piece::new(Color::Light, PieceKind::Pawn),
        Piece::new(Color::Light, PieceKind::Knight),
        Piece::new(Color::Light, PieceKind::Bishop),
        Piece::new(Color::Light, PieceKind::Rook),
        Piece::new(Color::Light, PieceKind::Queen),
        Piece::new(Color::Light, PieceKind::King),
        Piece::new(Color::Dark, PieceKind::Pawn),
        Piece::new(Color::Dark, PieceKind::Knight),
        Piece::new(Color::Dark, PieceKind::Bishop),
        Piece::new(Color::Dark, PieceKind::Rook),
        Piece::new(Color::Dark, PieceKind::Queen),
        Piece::new(Color::Dark, PieceKind::King),
    ];

    #[inline]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.color.index() * 6 + self.kind.index()
    }

    #[inline]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index >= PIECE_COUNT {
            return None;
        }
        let color = if index < 6 { Color::Light } else { Color::Dark };
        match PieceKind::from_index(index % 6) {
            Some(kind) => Some(Self::new(color, kind)),
            None => None,
        }
    }

    /// FEN letter: uppercase for light, lowercase for dark.
    #[inline]
    pub const fn fen_char(self) -> char {
        let c = self.kind.symbol();
        match self.color {
            Color::Light => c.to_ascii_uppercase(),
            Color::Dark => c,
        }
    }
}

/// Board square index (`0..=63`).
pub type Square = u8;

/// Castling rights bitmask, one bit per `CastleZone`.
pub type CastlingRights = u8;
pub const CASTLE_LIGHT_KINGSIDE: CastlingRights = 1 << 0;
pub const CASTLE_LIGHT_QUEENSIDE: CastlingRights = 1 << 1;
pub const CASTLE_DARK_KINGSIDE: CastlingRights = 1 << 2;
pub const CASTLE_DARK_QUEENSIDE: CastlingRights = 1 << 3;
pub const ALL_CASTLING_RIGHTS: CastlingRights = 0x0F;

/// Executed castles, using the same per-zone bits as `CastlingRights`.
pub type CastleStatus = u8;

/// One of the four castles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleZone {
    LightKingside,
    LightQueenside,
    DarkKingside,
    DarkQueenside,
}

impl CastleZone {
    pub const ALL: [CastleZone; 4] = [
        CastleZone::LightKingside,
        CastleZone::LightQueenside,
        CastleZone::DarkKingside,
        CastleZone::DarkQueenside,
    ];

    #[inline]
    pub const fn color(self) -> Color {
        match self {
            CastleZone::LightKingside | CastleZone::LightQueenside => Color::Light,
            CastleZone::DarkKingside | CastleZone::DarkQueenside => Color::Dark,
        }
    }

    #[inline]
    pub const fn bit(self) -> CastlingRights {
        match self {
            CastleZone::LightKingside => CASTLE_LIGHT_KINGSIDE,
            CastleZone::LightQueenside => CASTLE_LIGHT_QUEENSIDE,
            CastleZone::DarkKingside => CASTLE_DARK_KINGSIDE,
            CastleZone::DarkQueenside => CASTLE_DARK_QUEENSIDE,
        }
    }

    #[inline]
    pub const fn king_from(self) -> Square {
        match self.color() {
            Color::Light => 4,
            Color::Dark => 60,
        }
    }

    #[inline]
    pub const fn king_to(self) -> Square {
        match self {
            CastleZone::LightKingside => 6,
            CastleZone::LightQueenside => 2,
            CastleZone::DarkKingside => 62,
            CastleZone::DarkQueenside => 58,
        }
    }

    #[inline]
    pub const fn rook_from(self) -> Square {
        match self {
            CastleZone::LightKingside => 7,
            CastleZone::LightQueenside => 0,
            CastleZone::DarkKingside => 63,
            CastleZone::DarkQueenside => 56,
        }
    }

    #[inline]
    pub const fn rook_to(self) -> Square {
        match self {
            CastleZone::LightKingside => 5,
            CastleZone::LightQueenside => 3,
            CastleZone::DarkKingside => 61,
            CastleZone::DarkQueenside => 59,
        }
    }

    /// Both rights belonging to `color`.
    #[inline]
    pub const fn rights_of(color: Color) -> CastlingRights {
        match color {
            Color::Light => CASTLE_LIGHT_KINGSIDE | CASTLE_LIGHT_QUEENSIDE,
            Color::Dark => CASTLE_DARK_KINGSIDE | CASTLE_DARK_QUEENSIDE,
        }
    }

    /// The zone whose king lands on `king_to`, if any.
    #[inline]
    pub const fn from_king_target(king_to: Square) -> Option<Self> {
        match king_to {
            6 => Some(CastleZone::LightKingside),
            2 => Some(CastleZone::LightQueenside),
            62 => Some(CastleZone::DarkKingside),
            58 => Some(CastleZone::DarkQueenside),
            _ => None,
        }
    }

    /// The zone whose rook starts on `corner`, if any.
    #[inline]
    pub const fn from_rook_origin(corner: Square) -> Option<Self> {
        match corner {
            7 => Some(CastleZone::LightKingside),
            0 => Some(CastleZone::LightQueenside),
            63 => Some(CastleZone::DarkKingside),
            56 => Some(CastleZone::DarkQueenside),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CastleZone, Color, Piece, PieceKind, PIECE_COUNT};

    #[test]
    fn piece_index_layout_is_light_then_dark() {
        for (i, piece) in Piece::ALL.iter().enumerate() {
            assert_eq!(piece.index(), i);
            assert_eq!(Piece::from_index(i), Some(*piece));
        }
        assert_eq!(Piece::from_index(PIECE_COUNT), None);
        assert_eq!(Piece::new(Color::Dark, PieceKind::Pawn).index(), 6);
    }

    #[test]
    fn castle_zone_squares_round_trip() {
        for zone in CastleZone::ALL {
            assert_eq!(CastleZone::from_king_target(zone.king_to()), Some(zone));
            assert_eq!(CastleZone::from_rook_origin(zone.rook_from()), Some(zone));
            assert_ne!(CastleZone::rights_of(zone.color()) & zone.bit(), 0);
        }
    }

    #[test]
    fn only_minor_and_major_pieces_are_promotion_targets() {
        let targets: Vec<PieceKind> = PieceKind::ALL
            .into_iter()
            .filter(|k| k.is_promotion_target())
            .collect();
        assert_eq!(
            targets,
            vec![PieceKind::Knight, PieceKind::Bishop, PieceKind::Rook, PieceKind::Queen]
        );
    }
}
