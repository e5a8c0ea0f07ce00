//! Backtracking search that packs all eight pieces into the cube.
//!
//! The search always fills the first empty cell in index order. Some block of
//! whichever piece ends up there must cover that cell, so instead of trying
//! every anchor in the cube the solver only tries anchors that put one of the
//! piece's blocks on the target cell.
//!
//! Only the first `max_block` blocks of every rotated piece are tried as that
//! alignment point. With `max_block = 8` the search is complete; smaller
//! bounds are faster bets. [`Solver::solve`] runs the bounds in
//! [`SEARCH_BOUNDS`] in order and stops at the first one that finds a packing.

use std::fmt;

use crate::geometry::{Point, Rotation};
use crate::grid::{format_solution, Board};
use crate::pieces::{piece, Placement, BLOCKS_PER_PIECE, NUM_PIECES, PIECES};

/// Bitmask with one bit set per piece (bit `i` is piece `i`).
const ALL_PIECES_PLACED: u8 = 0xff;

const _: () = assert!(NUM_PIECES == u8::BITS as usize, "piece mask is a u8");

/// Alignment bounds tried by [`Solver::solve`], cheapest first.
pub const SEARCH_BOUNDS: [usize; 4] = [2, 4, 6, 8];

/// A complete packing: one placement per piece, in the order they were placed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Solution {
    placements: [Placement; NUM_PIECES],
    max_block: usize,
}

impl Solution {
    /// Builds a solution from placements, e.g. when reloading one from disk.
    pub fn new(placements: [Placement; NUM_PIECES], max_block: usize) -> Self {
        Self {
            placements,
            max_block,
        }
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// The alignment bound of the pass that found this solution.
    pub fn max_block(&self) -> usize {
        self.max_block
    }

    /// Returns true if the placements use every piece once and fill all 64
    /// cells without overlapping or leaving the cube.
    pub fn covers_cube(&self) -> bool {
        let mut used_pieces = 0u8;
        let mut board = Board::EMPTY;

        for placement in &self.placements {
            if placement.piece_index >= NUM_PIECES {
                return false;
            }
            let bit = 1 << placement.piece_index;
            if used_pieces & bit != 0 {
                return false;
            }
            used_pieces |= bit;

            if !board.try_fill(
                piece(placement.piece_index),
                placement.rotation,
                placement.anchor,
            ) {
                return false;
            }
        }

        used_pieces == ALL_PIECES_PLACED && board.is_full()
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for placement in &self.placements {
            let (x, y, z) = placement.anchor;
            let (xy_turns, yz_turns, xz_turns) = placement.rotation.fields();
            writeln!(
                f,
                "Piece {} at <{},{},{}> with rotation <{},{},{}>",
                placement.piece_index, x, y, z, xy_turns, yz_turns, xz_turns
            )?;
        }
        writeln!(f)?;
        write!(f, "{}", format_solution(&self.placements))
    }
}

/// How a single search pass ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Every piece was placed.
    Solved(Solution),
    /// No packing exists for the bound that was used.
    Exhausted,
}

impl Outcome {
    pub fn solution(&self) -> Option<&Solution> {
        match self {
            Outcome::Solved(solution) => Some(solution),
            Outcome::Exhausted => None,
        }
    }

    pub fn is_solved(&self) -> bool {
        matches!(self, Outcome::Solved(_))
    }
}

/// Work done by one search pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Calls into the recursive search, root included.
    pub nodes: u64,
    /// Successful `try_fill` calls.
    pub fills: u64,
}

/// Summary of one pass run by [`Solver::solve`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PassReport {
    pub max_block: usize,
    pub stats: SearchStats,
    pub solved: bool,
}

/// Result of the escalating search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolveReport {
    pub outcome: Outcome,
    /// One entry per pass, in the order they ran.
    pub passes: Vec<PassReport>,
}

/// Owns the board and the current search path.
///
/// Each solver is independent, so several can run side by side.
pub struct Solver {
    board: Board,
    /// Placements on the current search path, first placed first.
    placed: [Placement; NUM_PIECES],
    placed_count: usize,
    stats: SearchStats,
}

impl Default for Solver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver {
    pub fn new() -> Self {
        Self {
            board: Board::EMPTY,
            placed: [Placement::EMPTY; NUM_PIECES],
            placed_count: 0,
            stats: SearchStats::default(),
        }
    }

    /// The board as left by the last pass.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Statistics of the last pass.
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Runs the passes in [`SEARCH_BOUNDS`] until one finds a packing.
    ///
    /// The last bound is exhaustive, so an `Exhausted` outcome here means the
    /// pieces cannot fill the cube at all.
    pub fn solve(&mut self) -> SolveReport {
        let mut passes = Vec::with_capacity(SEARCH_BOUNDS.len());

        for &max_block in &SEARCH_BOUNDS {
            let outcome = self.search(max_block);
            passes.push(PassReport {
                max_block,
                stats: self.stats,
                solved: outcome.is_solved(),
            });
            if outcome.is_solved() {
                return SolveReport { outcome, passes };
            }
        }

        SolveReport {
            outcome: Outcome::Exhausted,
            passes,
        }
    }

    /// Runs a single pass from an empty board, trying blocks
    /// `0..max_block` of every rotated piece as the alignment point.
    ///
    /// Panics if `max_block` is not in `1..=8`.
    pub fn search(&mut self, max_block: usize) -> Outcome {
        assert!(
            (1..=BLOCKS_PER_PIECE).contains(&max_block),
            "search bound out of range"
        );

        self.board = Board::EMPTY;
        self.placed_count = 0;
        self.stats = SearchStats::default();

        if self.place_remaining((0, 0, 0), 0, max_block) {
            Outcome::Solved(Solution::new(self.placed, max_block))
        } else {
            Outcome::Exhausted
        }
    }

    /// Fills the first empty cell at or after `target` with one of the pieces
    /// missing from `placed_mask`, then recurses.
    ///
    /// On success the board and path keep the winning placements; on failure
    /// both are back to how they were on entry.
    fn place_remaining(&mut self, target: Point, placed_mask: u8, max_block: usize) -> bool {
        self.stats.nodes += 1;

        if placed_mask == ALL_PIECES_PLACED {
            return true;
        }

        let Some(target) = self.board.first_unoccupied_from(target) else {
            return false;
        };

        let snapshot = self.board.snapshot();

        for (piece_index, piece) in PIECES.iter().enumerate() {
            if placed_mask & (1 << piece_index) != 0 {
                continue;
            }

            for rotation in Rotation::all() {
                for block_index in 0..max_block {
                    let anchor = piece.translated_anchor(target, block_index, rotation);
                    if !self.board.try_fill(piece, rotation, anchor) {
                        continue;
                    }
                    self.stats.fills += 1;

                    self.placed[self.placed_count] = Placement {
                        piece_index,
                        rotation,
                        anchor,
                    };
                    self.placed_count += 1;

                    let next_mask = placed_mask | (1 << piece_index);
                    if self.place_remaining(target, next_mask, max_block) {
                        return true;
                    }

                    self.placed_count -= 1;
                    self.board.restore(snapshot);
                }
            }
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solve_finds_valid_packing() {
        let mut solver = Solver::new();
        let report = solver.solve();

        let solution = report.outcome.solution().expect("puzzle is solvable");
        assert!(solution.covers_cube());
        assert_eq!(solution.placements().len(), NUM_PIECES);
        assert!(solver.board().is_full());

        let last_pass = report.passes.last().unwrap();
        assert!(last_pass.solved);
        assert_eq!(last_pass.max_block, solution.max_block());
        assert!(report.passes[..report.passes.len() - 1]
            .iter()
            .all(|pass| !pass.solved));
    }

    #[test]
    fn test_solution_cells_tile_the_cube() {
        let report = Solver::new().solve();
        let solution = report.outcome.solution().unwrap();

        let mut cells: Vec<Point> = solution
            .placements()
            .iter()
            .flat_map(|placement| placement.cells())
            .collect();
        assert!(cells.iter().all(|&cell| crate::grid::in_bounds(cell)));
        cells.sort_unstable();
        cells.dedup();
        assert_eq!(cells.len(), crate::grid::GRID_SIZE);
    }

    #[test]
    fn test_each_placement_covers_first_empty_cell() {
        let report = Solver::new().solve();
        let solution = report.outcome.solution().unwrap();

        let mut board = Board::EMPTY;
        for placement in solution.placements() {
            let target = board.first_unoccupied_from((0, 0, 0)).unwrap();
            assert!(placement.cells().contains(&target));
            assert!(board.try_fill(
                piece(placement.piece_index),
                placement.rotation,
                placement.anchor
            ));
        }
        assert!(board.is_full());
    }

    #[test]
    fn test_exhaustive_bound_solves_alone() {
        let mut solver = Solver::new();
        let outcome = solver.search(BLOCKS_PER_PIECE);
        let solution = outcome.solution().expect("complete search must solve");
        assert!(solution.covers_cube());
        assert_eq!(solution.max_block(), BLOCKS_PER_PIECE);
    }

    #[test]
    fn test_every_fill_opens_one_node() {
        let mut solver = Solver::new();
        solver.search(SEARCH_BOUNDS[0]);
        let stats = solver.stats();
        assert_eq!(stats.nodes, stats.fills + 1);
    }

    #[test]
    fn test_search_is_deterministic() {
        let mut solver = Solver::new();
        let first = solver.solve();
        let second = solver.solve();
        assert_eq!(first, second);
    }

    #[test]
    fn test_independent_solvers_agree() {
        let reports: Vec<SolveReport> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..2)
                .map(|_| scope.spawn(|| Solver::new().solve()))
                .collect();
            handles
                .into_iter()
                .map(|handle| handle.join().unwrap())
                .collect()
        });
        assert_eq!(reports[0], reports[1]);
    }

    #[test]
    fn test_covers_cube_rejects_partial_or_repeated_pieces() {
        let solution = *Solver::new().solve().outcome.solution().unwrap();

        let mut repeated = solution.placements;
        repeated[1].piece_index = repeated[0].piece_index;
        assert!(!Solution::new(repeated, solution.max_block).covers_cube());

        let mut shifted = solution.placements;
        shifted[0].anchor.0 += 1;
        assert!(!Solution::new(shifted, solution.max_block).covers_cube());
    }

    #[test]
    #[should_panic(expected = "search bound out of range")]
    fn test_zero_bound_panics() {
        Solver::new().search(0);
    }

    #[test]
    #[should_panic(expected = "search bound out of range")]
    fn test_oversized_bound_panics() {
        Solver::new().search(BLOCKS_PER_PIECE + 1);
    }
}
