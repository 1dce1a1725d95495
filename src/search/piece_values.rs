//! Material value tables indexed by `PieceKind`.
//!
//! Units are centipawns x2. Mid-game and end-game tables are blended by the
//! development status' material phase.

use std::ops::Index;

use crate::game_state::chess_types::PieceKind;
use crate::game_state::development_status::{DevelopmentStatus, MAX_MATERIAL_PHASE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceValues([i32; 6]);

impl PieceValues {
    pub const MIDGAME: PieceValues = PieceValues([180, 640, 660, 980, 1800, 20000]);
    pub const ENDGAME: PieceValues = PieceValues([220, 600, 640, 1040, 1860, 20000]);

    #[inline]
    pub const fn new(values: [i32; 6]) -> Self {
        Self(values)
    }

    #[inline]
    pub const fn value(&self, kind: PieceKind) -> i32 {
        self.0[kind.index()]
    }

    /// Linear blend: all `midgame` at full phase, all `endgame` at phase 0.
    pub fn interpolate(midgame: &Self, endgame: &Self, status: DevelopmentStatus) -> Self {
        let weight = status.midgame_weight();
        let max = i32::from(MAX_MATERIAL_PHASE);
        let mut values = [0i32; 6];
        for (i, value) in values.iter_mut().enumerate() {
            *value = (midgame.0[i] * weight + endgame.0[i] * (max - weight)) / max;
        }
        Self(values)
    }
}

impl Default for PieceValues {
    fn default() -> Self {
        Self::MIDGAME
    }
}

impl Index<PieceKind> for PieceValues {
    type Output = i32;

    #[inline]
    fn index(&self, kind: PieceKind) -> &i32 {
        &self.0[kind.index()]
    }
}
