//! Primitive bitboard helpers.
//!
//! Square iteration, bit scans and mask folding shared by the position,
//! attack generation and the static exchange evaluator.

use crate::game_state::chess_types::Square;

/// One-hot mask for `square`.
#[inline]
pub const fn square_mask(square: Square) -> u64 {
    1u64 << square
}

/// Index of the least significant set bit, or `None` for an empty board.
#[inline]
pub const fn bit_scan_forward(bitboard: u64) -> Option<Square> {
    if bitboard == 0 {
        None
    } else {
        Some(bitboard.trailing_zeros() as Square)
    }
}

/// Isolate the least significant set bit (`0` when empty).
#[inline]
pub const fn lowest_bit(bitboard: u64) -> u64 {
    bitboard & bitboard.wrapping_neg()
}

/// Clear and return the least significant set bit index.
#[inline]
pub fn pop_lsb(bitboard: &mut u64) -> Option<Square> {
    let square = bit_scan_forward(*bitboard)?;
    *bitboard &= *bitboard - 1;
    Some(square)
}

/// OR together every mask in `masks`.
#[inline]
pub fn multi_or(masks: &[u64]) -> u64 {
    masks.iter().fold(0u64, |acc, bb| acc | bb)
}

/// Iterate the set squares of `bitboard` in ascending order.
#[inline]
pub fn set_bits(bitboard: u64) -> SetBits {
    SetBits { remaining: bitboard }
}

#[derive(Debug, Clone, Copy)]
pub struct SetBits {
    remaining: u64,
}

impl Iterator for SetBits {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Square> {
        pop_lsb(&mut self.remaining)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for SetBits {}

#[cfg(test)]
mod tests {
    use super::{bit_scan_forward, lowest_bit, multi_or, pop_lsb, set_bits, square_mask};

    #[test]
    fn set_bits_yields_ascending_squares() {
        let bb = square_mask(3) | square_mask(28) | square_mask(63);
        let squares: Vec<u8> = set_bits(bb).collect();
        assert_eq!(squares, vec![3, 28, 63]);
        assert_eq!(set_bits(bb).len(), 3);
    }

    #[test]
    fn empty_board_has_no_scan_result() {
        assert_eq!(bit_scan_forward(0), None);
        assert_eq!(lowest_bit(0), 0);
        let mut bb = 0u64;
        assert_eq!(pop_lsb(&mut bb), None);
    }

    #[test]
    fn lowest_bit_isolates_single_square() {
        let bb = square_mask(9) | square_mask(40);
        assert_eq!(lowest_bit(bb), square_mask(9));

        let mut working = bb;
        assert_eq!(pop_lsb(&mut working), Some(9));
        assert_eq!(working, square_mask(40));
    }

    #[test]
    fn multi_or_folds_all_masks() {
        assert_eq!(multi_or(&[1, 2, 4, 8]), 15);
        assert_eq!(multi_or(&[]), 0);
    }
}
