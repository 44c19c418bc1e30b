//! Hand-authored move sequences replayed by the fallback stages of the solver.
use std::fmt;

use crate::moves::Move::{self, *};

/// Layer-by-layer solving phases, in the order the systematic fallback visits them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Cross,
    FirstLayerCorners,
    SecondLayer,
    LastLayerCross,
    LastLayerCorners,
    FinalPermutation,
}

pub const ALL_PHASES: [Phase; 6] = [
    Phase::Cross,
    Phase::FirstLayerCorners,
    Phase::SecondLayer,
    Phase::LastLayerCross,
    Phase::LastLayerCorners,
    Phase::FinalPermutation,
];

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Cross => "cross",
            Phase::FirstLayerCorners => "first-layer corners",
            Phase::SecondLayer => "second layer",
            Phase::LastLayerCross => "last-layer cross",
            Phase::LastLayerCorners => "last-layer corners",
            Phase::FinalPermutation => "final permutation",
        };
        write!(f, "{}", name)
    }
}

#[rustfmt::skip]
const CROSS: [&[Move]; 4] = [
    &[F, R, U3, R3, U3, R, U, R3, F3],
    &[R, U3, R3, F, R, F3],
    &[F, U, R, U3, R3, F3],
    &[R, U, R3, U3, R, U, R3],
];

#[rustfmt::skip]
const FIRST_LAYER_CORNERS: [&[Move]; 4] = [
    &[R, U3, R3, U3, R, U, R3, U],
    &[F, R, U3, R3, F3],
    &[R, U, R3, U3, R, U, R3],
    &[F, U, F3, U3, F, U, F3],
];

#[rustfmt::skip]
const SECOND_LAYER: [&[Move]; 4] = [
    &[U, R, U3, R3, U3, F3, U, F],
    &[U3, L3, U, L, U, F, U3, F3],
    &[R, U3, R3, U3, R, U, R3, U, R, U3, R3],
    &[F, U, F3, U, F, U3, F3, U3, F, U, F3],
];

#[rustfmt::skip]
const LAST_LAYER_CROSS: [&[Move]; 3] = [
    &[F, R, U, R3, U3, F3],
    &[F, U, R, U3, R3, F3],
    &[R, U, R3, U, R, U2, R3],
];

#[rustfmt::skip]
const LAST_LAYER_CORNERS: [&[Move]; 3] = [
    &[R, U, R3, U, R, U2, R3],
    &[R, U2, R3, U3, R, U3, R3],
    &[L3, U3, L, U3, L3, U2, L],
];

#[rustfmt::skip]
const FINAL_PERMUTATION: [&[Move]; 4] = [
    &[R, U, R3, F3, R, U, R3, U3, R3, F, R2, U3, R3],
    &[R3, F, R3, B2, R, F3, R3, B2, R2],
    &[R2, U, R, U, R3, U3, R3, U3, R3, U, R3],
    &[R, U3, R, F2, R3, U, R, F2, R2],
];

impl Phase {
    /// Candidate sequences for this phase, tried in order.
    pub fn sequences(self) -> &'static [&'static [Move]] {
        match self {
            Phase::Cross => &CROSS,
            Phase::FirstLayerCorners => &FIRST_LAYER_CORNERS,
            Phase::SecondLayer => &SECOND_LAYER,
            Phase::LastLayerCross => &LAST_LAYER_CROSS,
            Phase::LastLayerCorners => &LAST_LAYER_CORNERS,
            Phase::FinalPermutation => &FINAL_PERMUTATION,
        }
    }
}

/// Permutation-fixing sequences cycled by the guaranteed-termination stage.
#[rustfmt::skip]
pub const PERMUTATION_FIXERS: [(&str, &[Move]); 6] = [
    ("sexy move", &[R, U, R3, U3]),
    ("corner-edge 3-cycle", &[R, U, R3, F3, R, U, R3, U3, R3, F, R2, U3, R3]),
    ("anti-sune", &[R, U2, R3, U3, R, U3, R3]),
    ("sune", &[R, U, R3, U, R, U2, R3]),
    ("F-sledgehammer", &[F, R, U3, R3, U3, R, U, R3, F3]),
    ("A-perm", &[R3, F, R3, B2, R, F3, R3, B2, R2]),
];

/// Moves the guaranteed-termination stage picks from when it perturbs the state.
pub const PERTURBATION_MOVES: [Move; 3] = [U, R, F];
