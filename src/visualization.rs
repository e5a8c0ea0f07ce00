//! 3D visualization of a solved cube using kiss3d.

use kiss3d::prelude::*;
use rustc_hash::FxHashMap;

use cube_solver::grid::{idx_to_coord, solution_to_grid, DIM};
use cube_solver::solver::Solution;

/// Returns the display color for a given piece index (0-7).
///
/// The mapping is stable to keep colors consistent across renders.
fn piece_color(piece_index: usize) -> Color {
    match piece_index {
        0 => Color::new(1.0, 0.2, 0.2, 1.0), // red
        1 => Color::new(0.2, 1.0, 0.2, 1.0), // green
        2 => Color::new(0.2, 0.2, 1.0, 1.0), // blue
        3 => Color::new(1.0, 1.0, 0.2, 1.0), // yellow
        4 => Color::new(1.0, 0.2, 1.0, 1.0), // magenta
        5 => Color::new(0.2, 1.0, 1.0, 1.0), // cyan
        6 => Color::new(1.0, 0.6, 0.2, 1.0), // orange
        _ => Color::new(0.8, 0.8, 0.8, 1.0), // grey
    }
}

/// Represents a rendered cube in the 3D scene.
struct RenderedCube {
    node: SceneNode3d,
    /// The cube's position when not exploded.
    base_position: Vec3,
    piece_index: usize,
}

/// Builds the 3D scene for a solution.
///
/// Solver cells map x->X, y->Y, z->Z in world units, shifted so the cube is
/// centered at the origin. Returns the rendered cubes and each piece's
/// centroid (in solver coordinates) for the explosion animation.
fn build_scene(
    scene: &mut SceneNode3d,
    solution: &Solution,
) -> (Vec<RenderedCube>, FxHashMap<usize, Vec3>) {
    /// Size of each rendered cube (slightly smaller than 1.0 for visible gaps).
    const CUBE_SIZE: f32 = 0.9;
    const CELL_SPACING: f32 = 1.0;
    const CENTER_OFFSET: f32 = -((DIM - 1) as f32) / 2.0;

    let mut piece_centroids: FxHashMap<usize, Vec3> = FxHashMap::default();
    for placement in solution.placements() {
        let cells = placement.cells();
        let position_sum: Vec3 = cells
            .iter()
            .map(|&(x, y, z)| Vec3::new(x as f32, y as f32, z as f32))
            .fold(Vec3::ZERO, |acc, pos| acc + pos);
        piece_centroids.insert(placement.piece_index, position_sum / cells.len() as f32);
    }

    let grid = solution_to_grid(solution.placements());

    let mut rendered_cubes = Vec::new();
    for (cell_index, &piece_number) in grid.iter().enumerate() {
        if piece_number == 0 {
            continue;
        }
        let piece_index = (piece_number - 1) as usize;
        let (x, y, z) = idx_to_coord(cell_index);
        let base_position = Vec3::new(
            x as f32 * CELL_SPACING + CENTER_OFFSET,
            y as f32 * CELL_SPACING + CENTER_OFFSET,
            z as f32 * CELL_SPACING + CENTER_OFFSET,
        );
        let node = scene
            .add_cube(CUBE_SIZE, CUBE_SIZE, CUBE_SIZE)
            .set_color(piece_color(piece_index))
            .set_position(base_position);
        rendered_cubes.push(RenderedCube {
            node,
            base_position,
            piece_index,
        });
    }

    (rendered_cubes, piece_centroids)
}

/// Displays a solution in an interactive 3D viewer.
pub fn display(solution: Solution) {
    pollster::block_on(display_async(solution));
}

async fn display_async(solution: Solution) {
    let mut window = Window::new(&format!(
        "Cube packing (bound {}) - [Up/Down] explode, [R] reset",
        solution.max_block()
    ))
    .await;

    let mut camera = OrbitCamera3d::default();
    camera.set_dist(10.0);

    let mut scene = SceneNode3d::empty();
    scene
        .add_light(Light::point(100.0))
        .set_position(Vec3::new(6.0, 6.0, 6.0));

    // center point in solver coordinates for explosion direction calculation
    let half = (DIM - 1) as f32 / 2.0;
    let grid_center = Vec3::new(half, half, half);
    let (mut rendered_cubes, piece_centroids) = build_scene(&mut scene, &solution);

    // how much to expand pieces outward (0.0 = compact, higher = more exploded)
    let mut explosion_amount: f32 = 0.0;
    const EXPLOSION_SPEED: f32 = 0.05;

    loop {
        for event in window.events().iter() {
            if let kiss3d::event::WindowEvent::Key(key, action, _) = event.value {
                use kiss3d::event::{Action, Key};
                if action == Action::Press {
                    match key {
                        Key::Up => explosion_amount += EXPLOSION_SPEED,
                        Key::Down => {
                            explosion_amount = (explosion_amount - EXPLOSION_SPEED).max(0.0)
                        }
                        Key::R => explosion_amount = 0.0,
                        _ => {}
                    }
                }
            }
        }

        for cube in &mut rendered_cubes {
            let centroid = piece_centroids
                .get(&cube.piece_index)
                .copied()
                .unwrap_or(grid_center);
            let explosion_direction = (centroid - grid_center).normalize_or_zero();
            cube.node.set_position(
                cube.base_position + explosion_direction * explosion_amount * 2.0,
            );
        }

        if !window.render_3d(&mut scene, &mut camera).await {
            break;
        }
    }
}
