//! Attack bitboards for every piece kind.
//!
//! Leapers (pawn, knight, king) read precomputed tables. Sliders walk each
//! ray until the first occupied square, which is included in the result.
//! Empty-board ray tables are kept for sliders so the exchange evaluator can
//! tell which blocked pieces might later see a square.

use crate::game_state::chess_types::{Color, Square};

const KNIGHT_STEPS: [(i32, i32); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

const KING_STEPS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

const DIAGONAL_DIRECTIONS: [(i32, i32); 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];
const ORTHOGONAL_DIRECTIONS: [(i32, i32); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

pub const KNIGHT_ATTACKS: [u64; 64] = generate_step_table(&KNIGHT_STEPS);
pub const KING_ATTACKS: [u64; 64] = generate_step_table(&KING_STEPS);

/// `[color][square]` pawn capture targets.
pub const PAWN_ATTACKS: [[u64; 64]; 2] = [
    generate_step_table(&[(-1, 1), (1, 1)]),
    generate_step_table(&[(-1, -1), (1, -1)]),
];

pub const BISHOP_RAYS: [u64; 64] = generate_ray_table(&DIAGONAL_DIRECTIONS);
pub const ROOK_RAYS: [u64; 64] = generate_ray_table(&ORTHOGONAL_DIRECTIONS);
pub const QUEEN_RAYS: [u64; 64] = merge_tables(&BISHOP_RAYS, &ROOK_RAYS);

#[inline]
pub const fn knight_attacks(square: Square) -> u64 {
    KNIGHT_ATTACKS[square as usize]
}

#[inline]
pub const fn king_attacks(square: Square) -> u64 {
    KING_ATTACKS[square as usize]
}

#[inline]
pub const fn pawn_attacks(color: Color, square: Square) -> u64 {
    PAWN_ATTACKS[color.index()][square as usize]
}

#[inline]
pub fn bishop_attacks(square: Square, occupancy: u64) -> u64 {
    slide(square, &DIAGONAL_DIRECTIONS, occupancy)
}

#[inline]
pub fn rook_attacks(square: Square, occupancy: u64) -> u64 {
    slide(square, &ORTHOGONAL_DIRECTIONS, occupancy)
}

#[inline]
pub fn queen_attacks(square: Square, occupancy: u64) -> u64 {
    bishop_attacks(square, occupancy) | rook_attacks(square, occupancy)
}

fn slide(square: Square, directions: &[(i32, i32); 4], occupancy: u64) -> u64 {
    let origin_file = i32::from(square % 8);
    let origin_rank = i32::from(square / 8);
    let mut attacks = 0u64;

    for &(file_step, rank_step) in directions {
        let mut file = origin_file + file_step;
        let mut rank = origin_rank + rank_step;

        while (0..8).contains(&file) && (0..8).contains(&rank) {
            let bit = 1u64 << (rank * 8 + file);
            attacks |= bit;
            if occupancy & bit != 0 {
                break;
            }
            file += file_step;
            rank += rank_step;
        }
    }

    attacks
}

const fn generate_step_table<const N: usize>(steps: &[(i32, i32); N]) -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = (sq % 8) as i32;
        let rank = (sq / 8) as i32;
        let mut i = 0usize;
        while i < N {
            table[sq] |= bit_if_on_board(file + steps[i].0, rank + steps[i].1);
            i += 1;
        }
        sq += 1;
    }

    table
}

const fn generate_ray_table(directions: &[(i32, i32); 4]) -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let mut d = 0usize;
        while d < 4 {
            let (file_step, rank_step) = directions[d];
            let mut file = (sq % 8) as i32 + file_step;
            let mut rank = (sq / 8) as i32 + rank_step;
            while file >= 0 && file < 8 && rank >= 0 && rank < 8 {
                table[sq] |= 1u64 << (rank * 8 + file);
                file += file_step;
                rank += rank_step;
            }
            d += 1;
        }
        sq += 1;
    }

    table
}

const fn merge_tables(a: &[u64; 64], b: &[u64; 64]) -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;
    while sq < 64 {
        table[sq] = a[sq] | b[sq];
        sq += 1;
    }
    table
}

const fn bit_if_on_board(file: i32, rank: i32) -> u64 {
    if file < 0 || file > 7 || rank < 0 || rank > 7 {
        0
    } else {
        1u64 << (rank * 8 + file)
    }
}
