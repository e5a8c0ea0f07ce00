//! Puzzle piece definitions.
//!
//! Every piece is made of two 2x2 plates. The first plate always sits at the
//! origin in the xy plane; the second plate starts at a per-piece offset and
//! either lies flat (extends along y) or stands up (extends along z).

use rustc_hash::FxHashSet;

use crate::geometry::{offset_between, rotate, translate, Point, Rotation, NUM_ROTATIONS};

/// Number of unit cubes in every piece.
pub const BLOCKS_PER_PIECE: usize = 8;

/// Number of pieces in the puzzle.
pub const NUM_PIECES: usize = 8;

/// How the second plate of a piece is laid out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Plate {
    /// The plate extends along x and y.
    Flat,
    /// The plate extends along x and z.
    Standing,
}

/// The block positions of one piece under a single rotation.
pub type Blocks = [Point; BLOCKS_PER_PIECE];

/// An immutable piece with its blocks precomputed for every rotation code.
pub struct Piece {
    offset: Point,
    plate: Plate,
    /// `blocks[code]` holds the rotated block offsets for that code.
    blocks: [Blocks; NUM_ROTATIONS],
}

impl Piece {
    /// Builds a piece whose second plate starts at `offset`.
    ///
    /// The rotation table is filled here, once; the solver only ever reads it.
    pub const fn new(offset: Point, plate: Plate) -> Self {
        let (x, y, z) = offset;
        let (third, fourth) = match plate {
            Plate::Flat => ((x, y + 1, z), (x + 1, y + 1, z)),
            Plate::Standing => ((x, y, z + 1), (x + 1, y, z + 1)),
        };
        let base: Blocks = [
            // first plate
            (0, 0, 0),
            (0, 1, 0),
            (1, 0, 0),
            (1, 1, 0),
            // second plate
            (x, y, z),
            (x + 1, y, z),
            third,
            fourth,
        ];

        let mut blocks = [[(0, 0, 0); BLOCKS_PER_PIECE]; NUM_ROTATIONS];
        let mut code = 0;
        while code < NUM_ROTATIONS {
            let rotation = Rotation::new(code as u8);
            let mut block = 0;
            while block < BLOCKS_PER_PIECE {
                blocks[code][block] = rotate(base[block], rotation);
                block += 1;
            }
            code += 1;
        }

        Self {
            offset,
            plate,
            blocks,
        }
    }

    /// Offset of the second plate.
    pub const fn offset(&self) -> Point {
        self.offset
    }

    pub const fn plate(&self) -> Plate {
        self.plate
    }

    /// Returns the block offsets under `rotation`.
    #[inline(always)]
    pub fn blocks(&self, rotation: Rotation) -> &Blocks {
        &self.blocks[rotation.index()]
    }

    /// Returns the anchor that puts block `block_index` exactly on `target`
    /// when the piece is rotated by `rotation`.
    ///
    /// Panics if `block_index` is not below [`BLOCKS_PER_PIECE`].
    #[inline(always)]
    pub fn translated_anchor(
        &self,
        target: Point,
        block_index: usize,
        rotation: Rotation,
    ) -> Point {
        assert!(block_index < BLOCKS_PER_PIECE, "block index out of range");
        offset_between(self.blocks(rotation)[block_index], target)
    }

    /// Counts the geometrically distinct orientations among the 64 codes.
    ///
    /// Two codes are the same orientation when their block sets coincide
    /// after translation to the origin. Symmetric pieces have fewer than 24.
    pub fn distinct_orientations(&self) -> usize {
        let orientations: FxHashSet<Blocks> = Rotation::all()
            .map(|rotation| normalize_to_origin(*self.blocks(rotation)))
            .collect();
        orientations.len()
    }
}

/// Translates blocks so the minimum x, y, z are all zero, then sorts them.
///
/// Two block sets that differ only by translation and order normalize to the
/// same array.
fn normalize_to_origin(mut blocks: Blocks) -> Blocks {
    let min_x = blocks.iter().map(|&(x, _, _)| x).min().unwrap_or(0);
    let min_y = blocks.iter().map(|&(_, y, _)| y).min().unwrap_or(0);
    let min_z = blocks.iter().map(|&(_, _, z)| z).min().unwrap_or(0);

    for (x, y, z) in &mut blocks {
        *x -= min_x;
        *y -= min_y;
        *z -= min_z;
    }

    blocks.sort_unstable();
    blocks
}

/// The eight pieces that must fill the 4x4x4 cube.
///
/// Each entry gives the offset and layout of the second plate.
pub static PIECES: [Piece; NUM_PIECES] = [
    Piece::new((1, 0, 1), Plate::Standing),
    Piece::new((1, 1, 1), Plate::Flat),
    Piece::new((2, 0, 0), Plate::Standing),
    Piece::new((0, 1, 1), Plate::Flat),
    Piece::new((2, 1, 0), Plate::Flat),
    Piece::new((2, 1, 0), Plate::Flat),
    Piece::new((2, 1, 0), Plate::Standing),
    Piece::new((0, 1, 1), Plate::Standing),
];

/// Returns the piece at `piece_index`.
///
/// Panics if `piece_index` is not below [`NUM_PIECES`].
#[inline(always)]
pub fn piece(piece_index: usize) -> &'static Piece {
    assert!(piece_index < NUM_PIECES, "piece index out of range");
    &PIECES[piece_index]
}

/// A piece placed in the cube: which piece, how it is rotated, and where
/// its local origin ends up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    pub piece_index: usize,
    pub rotation: Rotation,
    pub anchor: Point,
}

impl Placement {
    /// A zero-valued placeholder for fixed-size array initialization.
    pub const EMPTY: Self = Self {
        piece_index: 0,
        rotation: Rotation::IDENTITY,
        anchor: (0, 0, 0),
    };

    /// Returns the absolute cells covered by this placement.
    pub fn cells(&self) -> Blocks {
        let blocks = *piece(self.piece_index).blocks(self.rotation);
        blocks.map(|block| translate(block, self.anchor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_face_connected(blocks: &Blocks) -> bool {
        let mut reached = [false; BLOCKS_PER_PIECE];
        let mut frontier = vec![0];
        reached[0] = true;
        while let Some(current) = frontier.pop() {
            let (cx, cy, cz) = blocks[current];
            for (next, &(nx, ny, nz)) in blocks.iter().enumerate() {
                let distance = (cx - nx).abs() + (cy - ny).abs() + (cz - nz).abs();
                if distance == 1 && !reached[next] {
                    reached[next] = true;
                    frontier.push(next);
                }
            }
        }
        reached.iter().all(|&r| r)
    }

    #[test]
    fn test_identity_blocks_match_plate_layout() {
        let flat = Piece::new((1, 1, 1), Plate::Flat);
        assert_eq!(
            flat.blocks(Rotation::IDENTITY),
            &[
                (0, 0, 0),
                (0, 1, 0),
                (1, 0, 0),
                (1, 1, 0),
                (1, 1, 1),
                (2, 1, 1),
                (1, 2, 1),
                (2, 2, 1),
            ]
        );

        let standing = Piece::new((2, 0, 0), Plate::Standing);
        assert_eq!(standing.blocks(Rotation::IDENTITY)[6], (2, 0, 1));
        assert_eq!(standing.blocks(Rotation::IDENTITY)[7], (3, 0, 1));
    }

    #[test]
    fn test_every_rotation_has_eight_distinct_blocks() {
        for (piece_index, piece) in PIECES.iter().enumerate() {
            for rotation in Rotation::all() {
                let distinct: FxHashSet<Point> =
                    piece.blocks(rotation).iter().copied().collect();
                assert_eq!(
                    distinct.len(),
                    BLOCKS_PER_PIECE,
                    "Piece {piece_index} has overlapping blocks under {rotation:?}"
                );
            }
        }
    }

    #[test]
    fn test_pieces_are_face_connected() {
        for (piece_index, piece) in PIECES.iter().enumerate() {
            assert!(
                is_face_connected(piece.blocks(Rotation::IDENTITY)),
                "Piece {piece_index} falls apart"
            );
        }
    }

    #[test]
    fn test_rotation_table_is_stable() {
        let piece = &PIECES[3];
        for rotation in Rotation::all() {
            let expected: Vec<Point> = piece
                .blocks(Rotation::IDENTITY)
                .iter()
                .map(|&block| rotate(block, rotation))
                .collect();
            assert_eq!(piece.blocks(rotation).to_vec(), expected);
        }
    }

    #[test]
    fn test_translated_anchor_aligns_block_on_target() {
        let target = (2, 1, 3);
        for piece in &PIECES {
            for rotation in Rotation::all() {
                for block_index in 0..BLOCKS_PER_PIECE {
                    let anchor = piece.translated_anchor(target, block_index, rotation);
                    let block = piece.blocks(rotation)[block_index];
                    assert_eq!(
                        (anchor.0 + block.0, anchor.1 + block.1, anchor.2 + block.2),
                        target
                    );
                }
            }
        }
    }

    #[test]
    fn test_distinct_orientations() {
        let counts: Vec<usize> = PIECES.iter().map(Piece::distinct_orientations).collect();
        assert_eq!(counts, vec![24, 12, 12, 12, 12, 12, 12, 24]);
    }

    #[test]
    fn test_placement_cells_follow_anchor() {
        let placement = Placement {
            piece_index: 2,
            rotation: Rotation::IDENTITY,
            anchor: (0, 1, 2),
        };
        let cells = placement.cells();
        assert_eq!(cells[0], (0, 1, 2));
        assert_eq!(cells[4], (2, 1, 2));
        assert_eq!(cells[7], (3, 1, 3));
    }

    #[test]
    #[should_panic(expected = "block index out of range")]
    fn test_translated_anchor_rejects_block_index() {
        PIECES[0].translated_anchor((0, 0, 0), BLOCKS_PER_PIECE, Rotation::IDENTITY);
    }

    #[test]
    #[should_panic(expected = "piece index out of range")]
    fn test_piece_rejects_index() {
        piece(NUM_PIECES);
    }
}
