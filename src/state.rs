use std::fmt;

use crate::constants::*;
use crate::moves::{Move, MOVE_TABLES};

/// Represent the cube on the facelet level as 54 color values.
///
/// The values are the [crate::facelet::Color] discriminants, faces in U, F, R, B, L, D order.
/// Moves only permute the array, so every value keeps its count of 9.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CubeState {
    pub f: [u8; N_FACELETS],
}

impl Default for CubeState {
    /// The solved state: face `k` carries color value `k`.
    fn default() -> Self {
        let mut f = [0; N_FACELETS];
        for (i, v) in f.iter_mut().enumerate() {
            *v = (i / N_FACE_CELLS) as u8;
        }
        Self { f }
    }
}

impl fmt::Display for CubeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for v in self.f {
            write!(f, "{}", v)?;
        }
        Ok(())
    }
}

impl CubeState {
    /// Apply one move, returning the new state.
    pub fn apply_move(&self, m: Move) -> Self {
        let transform = MOVE_TABLES.transform(m);
        let mut f = [0; N_FACELETS];
        for (i, v) in f.iter_mut().enumerate() {
            *v = self.f[transform[i] as usize];
        }
        Self { f }
    }

    /// Apply a sequence of moves.
    pub fn apply_moves(&self, moves: &[Move]) -> Self {
        moves.iter().fold(*self, |state, m| state.apply_move(*m))
    }

    /// Goal test: every face shows a single color, the one on its center.
    ///
    /// The color-to-face pairing is not checked.
    pub fn is_solved(&self) -> bool {
        self.f.chunks(N_FACE_CELLS).all(|face| {
            let center = face[CENTER];
            face.iter().all(|v| *v == center)
        })
    }

    /// Number of facelets matching the center of their face.
    pub fn solved_count(&self) -> usize {
        self.f
            .chunks(N_FACE_CELLS)
            .map(|face| face.iter().filter(|v| **v == face[CENTER]).count())
            .sum()
    }

    /// Gain in matching facelets relative to `start`, as a fraction of all facelets.
    pub fn progress_from(&self, start: &CubeState) -> f64 {
        (self.solved_count() as f64 - start.solved_count() as f64) / N_FACELETS as f64
    }
}
