//! Capture enumeration for the side to move.
//!
//! Only moves that land on enemy occupancy, plus en-passant captures, are
//! produced here. Quiet moves belong to the full move generator.

use crate::bit_utils::set_bits;
use crate::game_state::chess_types::*;
use crate::moves::attack_tables::pawn_attacks;
use crate::moves::chess_move::ChessMove;

pub fn generate_attack_moves(position: &Position) -> Vec<ChessMove> {
    let mut moves = Vec::with_capacity(32);
    generate_attack_moves_in_place(position, &mut moves);
    moves
}

/// Append every capture available to the side to move onto `out`.
///
/// Pawn captures onto the promotion rank become queen promotion-captures.
/// One en-passant capture is emitted per friendly pawn attacking the
/// en-passant square.
pub fn generate_attack_moves_in_place(position: &Position, out: &mut Vec<ChessMove>) {
    let friendly = position.friendly_side();
    let enemy = friendly.opposite();
    let occupancy = position.occupied_squares();
    let enemy_locations = position.side_locations(enemy);
    let promotion_rank = friendly.promotion_rank();

    for kind in PieceKind::ALL {
        let piece = Piece::new(friendly, kind);
        for from in set_bits(position.piece_locations(piece)) {
            let targets = piece.attack_set(from, occupancy) & enemy_locations;
            for to in set_bits(targets) {
                let Some(captured) = position.piece_kind_at(enemy, to) else {
                    continue;
                };
                if kind == PieceKind::Pawn && to / 8 == promotion_rank {
                    out.push(ChessMove::promotion(from, to, PieceKind::Queen, Some(captured)));
                } else {
                    out.push(ChessMove::capture(from, to, kind, captured));
                }
            }
        }
    }

    if let Some(ep_square) = position.en_passant_square() {
        // Friendly pawns that attack the square are those an enemy pawn
        // standing on it would attack.
        let attackers = pawn_attacks(enemy, ep_square)
            & position.piece_locations(Piece::new(friendly, PieceKind::Pawn));
        for from in set_bits(attackers) {
            out.push(ChessMove::en_passant(from, ep_square));
        }
    }
}
