//! Cube Packing Solver
//!
//! Fills a 4x4x4 cube with eight pieces, each made of two 2x2 plates. The
//! solver stops at the first packing it finds, prints it and saves it to
//! disk, and can show it in an interactive 3D viewer.

mod visualization;

use std::path::Path;
use std::time::Instant;

use clap::{Parser, Subcommand};

use cube_solver::pieces::PIECES;
use cube_solver::solver::{Outcome, PassReport, Solution, SolveReport, Solver};
use cube_solver::{geometry, persistence};

/// Solves the 4x4x4 cube packing puzzle and visualizes the result.
#[derive(Parser)]
#[command(name = "cube-solver")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Solve the puzzle and save the solution to disk.
    Solve {
        /// Run a single pass with this alignment bound instead of escalating.
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=8))]
        bound: Option<u8>,
    },
    /// Print the saved solution.
    Show,
    /// Display the saved solution in an interactive 3D viewer.
    Display,
    /// Show how many distinct orientations each piece has.
    Pieces,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Solve { bound }) => {
            run_solver(bound.map(usize::from));
        }
        Some(Command::Show) => run_show(),
        Some(Command::Display) => run_display(),
        Some(Command::Pieces) => run_pieces(),
        None => {
            // default: solve and display
            if let Some(solution) = run_solver(None) {
                println!("Controls: Up/Down explode, R reset");
                visualization::display(solution);
            }
        }
    }
}

/// Solves the puzzle, prints and saves the result, and returns the solution.
fn run_solver(bound: Option<usize>) -> Option<Solution> {
    let mut solver = Solver::new();
    let started = Instant::now();

    let report = match bound {
        Some(max_block) => {
            let outcome = solver.search(max_block);
            SolveReport {
                outcome,
                passes: vec![PassReport {
                    max_block,
                    stats: solver.stats(),
                    solved: outcome.is_solved(),
                }],
            }
        }
        None => solver.solve(),
    };

    let elapsed = started.elapsed();

    for pass in &report.passes {
        println!(
            "Bound {}: {} nodes, {} fills, {}",
            pass.max_block,
            pass.stats.nodes,
            pass.stats.fills,
            if pass.solved { "solved" } else { "exhausted" }
        );
    }

    let Outcome::Solved(solution) = report.outcome else {
        println!("No solution");
        println!("Finished in {} ms.", elapsed.as_millis());
        return None;
    };

    println!();
    print!("{}", solution);
    println!("Finished in {} ms.", elapsed.as_millis());

    if let Err(e) = persistence::save(Path::new("."), &solution) {
        eprintln!("Failed to save solution: {}", e);
    } else {
        println!(
            "Wrote {} and {}",
            persistence::SOLUTION_TXT,
            persistence::SOLUTION_BIN
        );
    }

    Some(solution)
}

/// Prints the saved solution.
fn run_show() {
    match persistence::load(Path::new(".")) {
        Some(solution) => print!("{}", solution),
        None => eprintln!("No valid solution.bin found. Run 'cube-solver solve' first."),
    }
}

/// Loads and displays the saved solution.
fn run_display() {
    match persistence::load(Path::new(".")) {
        Some(solution) => {
            println!("Controls: Up/Down explode, R reset");
            visualization::display(solution);
        }
        None => {
            eprintln!("No valid solution.bin found. Run 'cube-solver solve' first.");
        }
    }
}

/// Prints each piece's plate layout and distinct orientation count.
fn run_pieces() {
    for (piece_index, piece) in PIECES.iter().enumerate() {
        let (x, y, z) = piece.offset();
        println!(
            "Piece {}: second plate at <{},{},{}> {:?}, {} of {} rotation codes distinct",
            piece_index,
            x,
            y,
            z,
            piece.plate(),
            piece.distinct_orientations(),
            geometry::NUM_ROTATIONS
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solution_snapshot() {
        let report = Solver::new().solve();
        let solution = report.outcome.solution().expect("puzzle is solvable");

        let output = format!(
            "Solved with alignment bound {}:\n\n{}",
            solution.max_block(),
            solution
        );

        insta::assert_snapshot!(output);
    }

    #[test]
    fn test_solution_is_valid() {
        let outcome = cube_solver::solve();
        assert!(outcome.solution().is_some_and(Solution::covers_cube));
    }
}
