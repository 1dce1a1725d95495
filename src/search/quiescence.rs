//! Capture-only negamax search run at the leaves of the main search.
//!
//! Fail-hard alpha-beta over captures and en-passant captures. A coarse delta
//! prune drops the whole node when even the largest swing cannot reach
//! alpha; per-move delta pruning and SEE drop hopeless or losing captures.
//! Cancellation is cooperative through `QuiescenceConfig::stop_flag` and is
//! observed at the entry of every call.

use std::cmp::Reverse;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::sync::Arc;

use crate::bit_utils::set_bits;
use crate::errors::SearchInterrupted;
use crate::game_state::chess_rules::rank_mask;
use crate::game_state::chess_types::*;
use crate::moves::attack_tables::pawn_attacks;
use crate::moves::chess_move::{ChessMove, MoveKind};
use crate::search::board_scoring::BoardEvaluator;
use crate::search::piece_values::PieceValues;
use crate::search::static_exchange::StaticExchangeEvaluator;

pub const DEFAULT_DELTA_SAFETY_MARGIN: i32 = 200;

#[derive(Debug, Clone)]
pub struct QuiescenceConfig {
    pub delta_safety_margin: i32,
    pub stop_flag: Option<Arc<AtomicBool>>,
}

impl Default for QuiescenceConfig {
    fn default() -> Self {
        Self {
            delta_safety_margin: DEFAULT_DELTA_SAFETY_MARGIN,
            stop_flag: None,
        }
    }
}

/// Diagnostics only; never consulted by the search itself.
#[derive(Debug, Default)]
pub struct QuiescenceStats {
    nodes: AtomicU64,
    deepest_ply: AtomicU32,
}

impl QuiescenceStats {
    pub fn nodes(&self) -> u64 {
        self.nodes.load(Ordering::Relaxed)
    }

    pub fn deepest_ply(&self) -> u32 {
        self.deepest_ply.load(Ordering::Relaxed)
    }

    fn record_node(&self, ply: u32) {
        self.nodes.fetch_add(1, Ordering::Relaxed);
        if self.deepest_ply.fetch_max(ply, Ordering::Relaxed) < ply {
            log::debug!("new deepest quiescence ply: {ply}");
        }
    }

    fn reset(&self) {
        self.nodes.store(0, Ordering::Relaxed);
        self.deepest_ply.store(0, Ordering::Relaxed);
    }
}

pub struct QuiescenceSearch<E: BoardEvaluator> {
    evaluator: E,
    config: QuiescenceConfig,
    see: StaticExchangeEvaluator,
    stats: QuiescenceStats,
}

impl<E: BoardEvaluator> QuiescenceSearch<E> {
    pub fn new(evaluator: E) -> Self {
        Self::with_config(evaluator, QuiescenceConfig::default())
    }

    pub fn with_config(evaluator: E, config: QuiescenceConfig) -> Self {
        Self {
            evaluator,
            config,
            see: StaticExchangeEvaluator::new(),
            stats: QuiescenceStats::default(),
        }
    }

    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    pub fn config(&self) -> &QuiescenceConfig {
        &self.config
    }

    pub fn stats(&self) -> &QuiescenceStats {
        &self.stats
    }

    pub fn reset_stats(&self) {
        self.stats.reset();
    }

    /// Score `position` for the side to move within `[alpha, beta]`, exploring
    /// at most `depth` plies of captures.
    ///
    /// With `interruptible` set, a raised stop flag aborts the whole search
    /// with `SearchInterrupted`; the partial result is discarded.
    pub fn search(
        &self,
        position: &Position,
        alpha: i32,
        beta: i32,
        depth: u8,
        interruptible: bool,
    ) -> Result<i32, SearchInterrupted> {
        self.search_ply(position, alpha, beta, depth, interruptible, 1)
    }

    fn search_ply(
        &self,
        position: &Position,
        mut alpha: i32,
        beta: i32,
        depth: u8,
        interruptible: bool,
        ply: u32,
    ) -> Result<i32, SearchInterrupted> {
        if interruptible && self.stop_requested() {
            log::trace!("quiescence interrupted at ply {ply}");
            return Err(SearchInterrupted);
        }
        self.stats.record_node(ply);

        if let Some(termination) = position.termination_state() {
            return Ok(position.friendly_side().orientation() * termination.value());
        }

        let stand_pat = self.evaluator.evaluate(position);
        if stand_pat >= beta {
            return Ok(beta);
        }

        if depth == 0 {
            return Ok(stand_pat.max(alpha));
        }

        let values = self.evaluator.interpolate_piece_values(position);
        if stand_pat < alpha.saturating_sub(big_delta(position, &values)) {
            return Ok(alpha);
        }

        alpha = alpha.max(stand_pat);

        for mv in self.moves_to_probe(position, &values, stand_pat, alpha) {
            let child = mv.evolve(position);
            let score = -self.search_ply(&child, -beta, -alpha, depth - 1, interruptible, ply + 1)?;

            if score >= beta {
                return Ok(beta);
            }
            alpha = alpha.max(score);
        }

        Ok(alpha)
    }

    #[inline]
    fn stop_requested(&self) -> bool {
        self.config
            .stop_flag
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    /// Captures worth searching, most valuable victim first and cheapest
    /// attacker first among equal victims.
    fn moves_to_probe(
        &self,
        position: &Position,
        values: &PieceValues,
        stand_pat: i32,
        alpha: i32,
    ) -> Vec<ChessMove> {
        let margin = self.config.delta_safety_margin;
        let mut moves = position.attack_moves();

        moves.retain(|&mv| {
            let victim = mv.captured_kind().unwrap_or(PieceKind::Pawn);
            if stand_pat < alpha.saturating_sub(values.value(victim) + margin) {
                log::trace!("delta pruned {mv}");
                return false;
            }
            // En-passant geometry does not fit the single-square exchange model.
            if mv.kind() == MoveKind::EnPassant {
                return true;
            }
            let good = self.see.is_good_exchange(mv.to(), mv.from(), position, values);
            if !good {
                log::trace!("SEE pruned {mv}");
            }
            good
        });

        moves.sort_by_key(|mv| {
            let victim = mv.captured_kind().map_or(0, |kind| values.value(kind));
            (Reverse(victim), values.value(mv.moved_kind()))
        });
        moves
    }
}

/// Largest material swing available: a queen, plus a promotion gain if a
/// friendly pawn one step from promoting attacks an enemy piece.
pub fn big_delta(position: &Position, values: &PieceValues) -> i32 {
    let friendly = position.friendly_side();
    let enemies = position.side_locations(friendly.opposite());
    let pawns = position.piece_locations(Piece::new(friendly, PieceKind::Pawn))
        & rank_mask(friendly.pre_promotion_rank());

    let queen = values.value(PieceKind::Queen);
    let promoting = set_bits(pawns).any(|square| pawn_attacks(friendly, square) & enemies != 0);
    if promoting {
        queen + queen - values.value(PieceKind::Pawn)
    } else {
        queen
    }
}
