//! Cube Packing Solver Library
//!
//! Packs eight fixed 8-block pieces into a 4x4x4 cube by backtracking over
//! every piece, rotation code and alignment block at the first empty cell.

pub mod geometry;
pub mod grid;
pub mod persistence;
pub mod pieces;
pub mod solver;

use solver::{Outcome, Solver};

/// Runs the escalating search once on a fresh solver and returns the result.
pub fn solve() -> Outcome {
    Solver::new().solve().outcome
}
