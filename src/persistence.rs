//! File I/O for saving and loading a solved packing.
//!
//! Binary format for `solution.bin` (little endian):
//! - u32: placement count (always 8)
//! - u32: alignment bound of the pass that found the solution
//! - repeat per placement, in placement order:
//!   - u32: piece index (0-based)
//!   - u8: rotation code
//!   - 3 x i8: anchor (x, y, z)

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use crate::geometry::{Rotation, NUM_ROTATIONS};
use crate::pieces::{Placement, BLOCKS_PER_PIECE, NUM_PIECES};
use crate::solver::Solution;

pub const SOLUTION_BIN: &str = "solution.bin";
pub const SOLUTION_TXT: &str = "solution.txt";

/// Saves the solution to both binary and text files inside `dir`.
pub fn save(dir: &Path, solution: &Solution) -> std::io::Result<()> {
    save_text(dir, solution)?;
    save_binary(dir, solution)?;
    Ok(())
}

/// Saves the solution in human-readable text format.
fn save_text(dir: &Path, solution: &Solution) -> std::io::Result<()> {
    let mut file = File::create(dir.join(SOLUTION_TXT))?;
    writeln!(
        file,
        "Solved with alignment bound {}:\n",
        solution.max_block()
    )?;
    write!(file, "{}", solution)?;
    Ok(())
}

/// Saves the solution in compact binary format.
fn save_binary(dir: &Path, solution: &Solution) -> std::io::Result<()> {
    let mut file = File::create(dir.join(SOLUTION_BIN))?;

    file.write_all(&(solution.placements().len() as u32).to_le_bytes())?;
    file.write_all(&(solution.max_block() as u32).to_le_bytes())?;

    for placement in solution.placements() {
        let (x, y, z) = placement.anchor;
        file.write_all(&(placement.piece_index as u32).to_le_bytes())?;
        file.write_all(&[placement.rotation.code()])?;
        file.write_all(&[x as i8 as u8, y as i8 as u8, z as i8 as u8])?;
    }

    Ok(())
}

/// Loads the solution saved in `dir`.
///
/// Returns `None` if the file is missing, truncated, or does not describe a
/// complete packing of the cube.
pub fn load(dir: &Path) -> Option<Solution> {
    let mut file = File::open(dir.join(SOLUTION_BIN)).ok()?;
    let mut u32_buffer = [0u8; 4];

    file.read_exact(&mut u32_buffer).ok()?;
    let placement_count = u32::from_le_bytes(u32_buffer) as usize;
    if placement_count != NUM_PIECES {
        return None;
    }

    file.read_exact(&mut u32_buffer).ok()?;
    let max_block = u32::from_le_bytes(u32_buffer) as usize;
    if !(1..=BLOCKS_PER_PIECE).contains(&max_block) {
        return None;
    }

    let mut placements = [Placement::EMPTY; NUM_PIECES];
    for placement in &mut placements {
        file.read_exact(&mut u32_buffer).ok()?;
        let piece_index = u32::from_le_bytes(u32_buffer) as usize;
        if piece_index >= NUM_PIECES {
            return None;
        }

        let mut rotation_buffer = [0u8; 1];
        file.read_exact(&mut rotation_buffer).ok()?;
        if rotation_buffer[0] as usize >= NUM_ROTATIONS {
            return None;
        }

        let mut anchor_buffer = [0u8; 3];
        file.read_exact(&mut anchor_buffer).ok()?;

        *placement = Placement {
            piece_index,
            rotation: Rotation::new(rotation_buffer[0]),
            anchor: (
                anchor_buffer[0] as i8 as i32,
                anchor_buffer[1] as i8 as i32,
                anchor_buffer[2] as i8 as i32,
            ),
        };
    }

    let solution = Solution::new(placements, max_block);
    solution.covers_cube().then_some(solution)
}
