//! Crate root module declarations for the Plum tactical core.
//!
//! Exposes the immutable bitboard position, the capture generator and
//! transition model, the static exchange evaluator and the quiescence search
//! so an outer alpha-beta driver can use them as its leaf evaluator.

pub mod bit_utils;
pub mod errors;

pub mod game_state {
    pub mod chess_rules;
    pub mod chess_types;
    pub mod development_status;
    pub mod position;
    pub mod position_hasher;
}

pub mod moves {
    pub mod attack_tables;
    pub mod chess_move;
    pub mod piece_attacks;
}

pub mod move_generation {
    pub mod attack_moves;
    pub mod move_apply;
}

pub mod search {
    pub mod board_scoring;
    pub mod piece_values;
    pub mod quiescence;
    pub mod static_exchange;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_parser;
}
