//! Occupancy grid for the 4x4x4 cube.
//!
//! Cells are stored in a flat array indexed x-major (`x * 16 + y * 4 + z`),
//! so walking the indices upward visits z fastest, then y, then x. The search
//! relies on that order when it looks for the next empty cell.

use crate::geometry::{translate, Point, Rotation};
use crate::pieces::{Piece, Placement, BLOCKS_PER_PIECE};

/// Cells per axis.
pub const DIM: usize = 4;

/// Total number of cells in the cube.
pub const GRID_SIZE: usize = DIM * DIM * DIM;

/// Converts (x, y, z) coordinates to a linear cell index.
///
/// Index order is x-major: `idx = x * DIM * DIM + y * DIM + z`.
#[inline(always)]
pub const fn coord_to_idx(x: i32, y: i32, z: i32) -> usize {
    (x as usize) * DIM * DIM + (y as usize) * DIM + (z as usize)
}

/// Converts a linear cell index to (x, y, z) coordinates.
#[inline(always)]
pub const fn idx_to_coord(cell_index: usize) -> Point {
    (
        (cell_index / (DIM * DIM)) as i32,
        ((cell_index / DIM) % DIM) as i32,
        (cell_index % DIM) as i32,
    )
}

/// Returns true if the point lies inside the cube on every axis.
#[inline(always)]
pub const fn in_bounds((x, y, z): Point) -> bool {
    let dim = DIM as i32;
    x >= 0 && y >= 0 && z >= 0 && x < dim && y < dim && z < dim
}

/// Which cells of the cube are currently taken.
///
/// A cell is `true` iff a placed piece covers it. The board is `Copy`, so a
/// snapshot is just a copy of the array.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Board {
    cells: [bool; GRID_SIZE],
}

impl Default for Board {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Board {
    /// A board with every cell free.
    pub const EMPTY: Self = Self {
        cells: [false; GRID_SIZE],
    };

    /// Returns true if `point` is inside the cube and taken.
    #[inline]
    pub fn is_occupied(&self, point: Point) -> bool {
        in_bounds(point) && self.cells[coord_to_idx(point.0, point.1, point.2)]
    }

    /// Number of taken cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&cell| cell)
    }

    /// Places `piece` rotated by `rotation` with its origin at `anchor`.
    ///
    /// Either all eight cells are free and inside the cube, in which case they
    /// are all marked and `true` is returned, or nothing changes and `false`
    /// is returned.
    pub fn try_fill(&mut self, piece: &Piece, rotation: Rotation, anchor: Point) -> bool {
        let mut targets = [0usize; BLOCKS_PER_PIECE];

        // check every block before touching the grid
        for (target, &block) in targets.iter_mut().zip(piece.blocks(rotation)) {
            let (x, y, z) = translate(block, anchor);
            if !in_bounds((x, y, z)) {
                return false;
            }
            let cell_index = coord_to_idx(x, y, z);
            if self.cells[cell_index] {
                return false;
            }
            *target = cell_index;
        }

        for cell_index in targets {
            self.cells[cell_index] = true;
        }

        true
    }

    /// Copies the current occupancy out.
    #[inline(always)]
    pub fn snapshot(&self) -> Board {
        *self
    }

    /// Puts back occupancy taken with [`Board::snapshot`].
    #[inline(always)]
    pub fn restore(&mut self, snapshot: Board) {
        *self = snapshot;
    }

    /// Finds the first free cell at or after `start` in index order.
    ///
    /// Returns `None` when every remaining cell is taken.
    pub fn first_unoccupied_from(&self, start: Point) -> Option<Point> {
        assert!(in_bounds(start), "scan must start inside the cube");
        let first = coord_to_idx(start.0, start.1, start.2);
        (first..GRID_SIZE)
            .find(|&cell_index| !self.cells[cell_index])
            .map(idx_to_coord)
    }
}

/// Converts a solution (list of placements) to a flat grid.
///
/// Each cell contains a 1-based piece number, or 0 for empty.
pub fn solution_to_grid(solution: &[Placement]) -> [u8; GRID_SIZE] {
    let mut grid = [0u8; GRID_SIZE];

    for placement in solution {
        let piece_number = (placement.piece_index + 1) as u8;
        for (x, y, z) in placement.cells() {
            if in_bounds((x, y, z)) {
                grid[coord_to_idx(x, y, z)] = piece_number;
            }
        }
    }

    grid
}

/// Formats a solution as a human-readable string.
///
/// Displays the DIM z-slices side by side, with 1-based piece numbers.
/// Empty cells show as '.'.
pub fn format_solution(solution: &[Placement]) -> String {
    let grid = solution_to_grid(solution);

    // header: z=0, z=1, ..., z=DIM-1, each label as wide as a slice
    let mut header = String::new();
    for z in 0..DIM {
        if z > 0 {
            header.push_str("  ");
        }
        header.push_str(&format!("{:<width$}", format!("z={z}"), width = DIM));
    }
    let mut output = String::from(header.trim_end());
    output.push('\n');

    // rows from top (y=DIM-1) to bottom (y=0)
    for y in (0..DIM).rev() {
        for z in 0..DIM {
            if z > 0 {
                output.push_str("  ");
            }
            for x in 0..DIM {
                let piece_number = grid[x * DIM * DIM + y * DIM + z];
                let display_char = if piece_number == 0 {
                    '.'
                } else {
                    char::from(b'0' + piece_number)
                };
                output.push(display_char);
            }
        }
        output.push('\n');
    }

    output
}
