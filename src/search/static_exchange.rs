//! Static exchange evaluation.
//!
//! Resolves the capture sequence on a single square without searching: both
//! sides keep recapturing with their least valuable attacker, sliders hidden
//! behind a removed piece join in as x-rays, and the gain list is folded back
//! with the option to stop at any point.

use crate::bit_utils::{bit_scan_forward, lowest_bit, set_bits, square_mask};
use crate::game_state::chess_types::*;
use crate::search::piece_values::PieceValues;

/// Every piece on the board can join at most once, plus the initial target.
const MAX_EXCHANGE_DEPTH: usize = 33;

/// Stateless entry point; all working masks live in a per-call scratch value.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticExchangeEvaluator;

/// Masks for one evaluation.
struct ExchangeScratch {
    target_mask: u64,
    occupancy: u64,
    attadef: u64,
    potential_xrays: u64,
}

impl ExchangeScratch {
    fn new(position: &Position, target: Square) -> Self {
        let target_mask = square_mask(target);
        let occupancy = position.occupied_squares();
        let mut attadef = 0u64;
        let mut potential_xrays = 0u64;

        for piece in Piece::ALL {
            for square in set_bits(position.piece_locations(piece)) {
                if piece.attack_set(square, occupancy) & target_mask != 0 {
                    attadef |= square_mask(square);
                } else if piece.can_xray() && piece.empty_board_attacks(square) & target_mask != 0 {
                    potential_xrays |= square_mask(square);
                }
            }
        }

        Self {
            target_mask,
            occupancy,
            attadef,
            potential_xrays,
        }
    }

    /// Move every hidden slider that now sees the target into `attadef`.
    fn reveal_xrays(&mut self, position: &Position) {
        for square in set_bits(self.potential_xrays) {
            let Some(piece) = position.piece_at(square) else {
                continue;
            };
            if piece.attack_set(square, self.occupancy) & self.target_mask != 0 {
                let bit = square_mask(square);
                self.potential_xrays ^= bit;
                self.attadef ^= bit;
            }
        }
    }

    /// Single-bit mask of `side`'s cheapest remaining attacker, or 0.
    fn least_valuable_attacker(&self, position: &Position, side: Color) -> u64 {
        PieceKind::ALL
            .into_iter()
            .map(|kind| self.attadef & position.piece_locations(Piece::new(side, kind)))
            .find(|&subset| subset != 0)
            .map_or(0, lowest_bit)
    }
}

impl StaticExchangeEvaluator {
    pub const fn new() -> Self {
        Self
    }

    /// Net material result for the side to move of capturing on `target`
    /// with the piece on `from`. Returns 0 if either square is empty.
    pub fn eval(&self, target: Square, from: Square, position: &Position, values: &PieceValues) -> i32 {
        let (Some(victim), Some(mut attacker)) = (position.piece_at(target), position.piece_at(from))
        else {
            return 0;
        };

        let mut scratch = ExchangeScratch::new(position, target);
        let knights = position.piece_locations(Piece::new(Color::Light, PieceKind::Knight))
            | position.piece_locations(Piece::new(Color::Dark, PieceKind::Knight));

        let mut gain = [0i32; MAX_EXCHANGE_DEPTH];
        let mut depth = 0usize;
        let mut from_set = square_mask(from);
        let mut side = position.friendly_side();
        gain[0] = values.value(victim.kind);

        while depth + 1 < MAX_EXCHANGE_DEPTH {
            depth += 1;
            side = side.opposite();

            // Speculative: assumes `attacker` is recaptured.
            gain[depth] = values.value(attacker.kind) - gain[depth - 1];
            if (-gain[depth - 1]).max(gain[depth]) < 0 {
                break;
            }

            scratch.attadef ^= from_set;
            scratch.occupancy ^= from_set;
            if from_set & knights == 0 {
                scratch.reveal_xrays(position);
            }

            from_set = scratch.least_valuable_attacker(position, side);
            match bit_scan_forward(from_set).and_then(|square| position.piece_at(square)) {
                Some(next) => attacker = next,
                None => break,
            }
        }

        for d in (1..depth).rev() {
            gain[d - 1] = -(-gain[d - 1]).max(gain[d]);
        }
        gain[0]
    }

    #[inline]
    pub fn is_good_exchange(
        &self,
        target: Square,
        from: Square,
        position: &Position,
        values: &PieceValues,
    ) -> bool {
        self.eval(target, from, position, values) >= 0
    }
}

#[cfg(test)]
mod tests {
    use super::StaticExchangeEvaluator;
    use crate::game_state::chess_types::*;
    use crate::game_state::position_hasher::ZobristHasher;
    use crate::search::piece_values::PieceValues;

    const D1: Square = 3;
    const D5: Square = 35;
    const E2: Square = 12;
    const E5: Square = 36;

    fn position(fen: &str) -> Position {
        Position::from_fen(fen, ZobristHasher::default_shared()).expect("FEN should parse")
    }

    fn see(fen: &str, target: Square, from: Square) -> i32 {
        StaticExchangeEvaluator::new().eval(target, from, &position(fen), &PieceValues::default())
    }

    #[test]
    fn undefended_capture_wins_the_target() {
        assert_eq!(see("7k/8/8/3p4/8/8/8/K2R4 w - - 0 1", D5, D1), 180);
    }

    #[test]
    fn queen_taking_pawn_defended_pawn_loses() {
        let fen = "7k/8/4p3/3p4/8/8/8/K2Q4 w - - 0 1";
        assert_eq!(see(fen, D5, D1), 180 - 1800);
        assert!(!StaticExchangeEvaluator::new().is_good_exchange(
            D5,
            D1,
            &position(fen),
            &PieceValues::default()
        ));
    }

    #[test]
    fn rook_taking_queen_defended_pawn_loses_the_rook() {
        assert_eq!(see("3q3k/8/8/3p4/8/8/8/K2R4 w - - 0 1", D5, D1), 180 - 980);
    }

    #[test]
    fn queen_behind_rook_joins_as_xray() {
        // Re2xe5 Re8xe5 Qe1xe5 nets the pawn.
        assert_eq!(see("4r2k/8/8/4p3/8/8/4R3/K3Q3 w - - 0 1", E5, E2), 180);
        // Without the queen the rook trade loses.
        assert_eq!(see("4r2k/8/8/4p3/8/8/4R3/K7 w - - 0 1", E5, E2), 180 - 980);
    }

    #[test]
    fn knight_defender_is_counted() {
        // Bxd5 Nxd5 loses bishop for pawn.
        assert_eq!(see("7k/8/5n2/3p4/8/1B6/8/K7 w - - 0 1", D5, 17), 180 - 660);
    }

    #[test]
    fn dark_side_exchanges_are_scored_for_dark() {
        assert_eq!(see("k2r4/8/8/3P4/8/8/8/7K b - - 0 1", D5, 59), 180);
    }

    #[test]
    fn empty_squares_score_zero() {
        assert_eq!(see("7k/8/8/8/8/8/8/K2R4 w - - 0 1", D5, D1), 0);
    }
}
