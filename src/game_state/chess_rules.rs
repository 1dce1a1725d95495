//! Canonical chess-rule constants.
//!
//! Starting position, rank masks and the terminal score shared by the
//! position and the search layer.

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Score magnitude of a decided game (a king can be taken).
pub const WIN_SCORE: i32 = 30_000;

/// Number of recent position hashes kept by every position.
pub const RECENT_HASH_COUNT: usize = 4;

pub const RANK_1: u64 = 0x0000_0000_0000_00FF;

#[inline]
pub const fn rank_mask(rank: u8) -> u64 {
    RANK_1 << (rank as u32 * 8)
}
