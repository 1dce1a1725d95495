//! Pluggable board evaluation interface and a material baseline.
//!
//! Search delegates static scoring to `BoardEvaluator` so positional
//! heuristics can be swapped in without touching quiescence or SEE.

use crate::game_state::chess_types::*;
use crate::search::piece_values::PieceValues;

pub trait BoardEvaluator: Send + Sync {
    /// Score from the perspective of the side to move.
    fn evaluate(&self, position: &Position) -> i32;

    /// Piece values for the game phase of `position`.
    fn interpolate_piece_values(&self, position: &Position) -> PieceValues;
}

/// Side-to-move-oriented material count using phase-interpolated values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaterialEvaluator {
    pub midgame: PieceValues,
    pub endgame: PieceValues,
}

impl MaterialEvaluator {
    /// Same table in every phase.
    pub const fn flat(values: PieceValues) -> Self {
        Self {
            midgame: values,
            endgame: values,
        }
    }

    #[inline]
    fn material_balance_light_minus_dark(position: &Position, values: &PieceValues) -> i32 {
        let mut score = 0i32;
        for kind in PieceKind::ALL {
            let light = position.piece_locations(Piece::new(Color::Light, kind)).count_ones() as i32;
            let dark = position.piece_locations(Piece::new(Color::Dark, kind)).count_ones() as i32;
            score += (light - dark) * values.value(kind);
        }
        score
    }
}

impl Default for MaterialEvaluator {
    fn default() -> Self {
        Self {
            midgame: PieceValues::MIDGAME,
            endgame: PieceValues::ENDGAME,
        }
    }
}

impl BoardEvaluator for MaterialEvaluator {
    fn evaluate(&self, position: &Position) -> i32 {
        let values = self.interpolate_piece_values(position);
        position.friendly_side().orientation()
            * Self::material_balance_light_minus_dark(position, &values)
    }

    fn interpolate_piece_values(&self, position: &Position) -> PieceValues {
        PieceValues::interpolate(&self.midgame, &self.endgame, position.development_status())
    }
}
