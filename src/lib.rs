//! A crate for solving the 3x3 Rubik's cube from a painted facelet configuration.
//!
//! The solver runs a cascade of bounded searches (breadth-first, layer-by-layer replay, iterative deepening)
//! and ends with a replay loop that always returns a move sequence.

#[macro_use]
extern crate lazy_static;

/// Module containing functions for scrambling the cube.
pub mod scramble;

pub mod error;

/// Module containing 3x3 cube constants and default search budgets.
pub mod constants;
pub mod catalog;
pub mod config;
pub mod facelet;
pub mod move_order;
pub mod moves;
pub mod solver;
pub mod state;

pub use crate::config::SolverConfig;
pub use crate::error::Error;
pub use crate::facelet::{decode, encode, validate, Facelets};
pub use crate::moves::{describe, Move};
pub use crate::scramble::{gen_scramble, scramble};
pub use crate::solver::{solve, SolveResult, Solver};
pub use crate::state::CubeState;
