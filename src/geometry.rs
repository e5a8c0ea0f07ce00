//! 3D rotation and translation utilities.
//!
//! A rotation is encoded as a 6-bit code holding three 2-bit counters. Each
//! counter says how many quarter turns to apply in one coordinate plane:
//!
//! - bits 0-1: turns in the xy plane, `(x, y, z) -> (y, -x, z)`
//! - bits 2-3: turns in the yz plane, `(x, y, z) -> (x, -z, y)`
//! - bits 4-5: turns in the xz plane, `(x, y, z) -> (-z, y, x)`
//!
//! The turns are always applied in that order. The cube only has 24 distinct
//! orientations, so several of the 64 codes describe the same orientation.
//! Nothing de-duplicates them; the solver simply retries the repeats.

/// A 3D coordinate representing a unit cube position or an offset.
pub type Point = (i32, i32, i32);

/// Number of rotation codes (three 2-bit fields).
pub const NUM_ROTATIONS: usize = 64;

/// A rotation code in `0..NUM_ROTATIONS`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rotation(u8);

impl Rotation {
    /// The code that applies no turns at all.
    pub const IDENTITY: Self = Self(0);

    /// Wraps a raw rotation code.
    ///
    /// Panics if `code` is not below [`NUM_ROTATIONS`].
    pub const fn new(code: u8) -> Self {
        assert!((code as usize) < NUM_ROTATIONS, "rotation code out of range");
        Self(code)
    }

    /// Returns the raw 6-bit code.
    #[inline(always)]
    pub const fn code(self) -> u8 {
        self.0
    }

    /// Returns the code as a table index.
    #[inline(always)]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Splits the code into its `(xy, yz, xz)` quarter-turn counts.
    #[inline(always)]
    pub const fn fields(self) -> (u8, u8, u8) {
        (self.0 & 3, (self.0 >> 2) & 3, (self.0 >> 4) & 3)
    }

    /// Iterates over every rotation code in ascending order.
    pub fn all() -> impl Iterator<Item = Rotation> {
        (0..NUM_ROTATIONS as u8).map(Rotation)
    }

    /// Applies this rotation to a point.
    #[inline]
    pub const fn apply(self, point: Point) -> Point {
        rotate(point, self)
    }
}

/// Quarter turn in the xy plane.
#[inline(always)]
const fn turn_xy((x, y, z): Point) -> Point {
    (y, -x, z)
}

/// Quarter turn in the yz plane.
#[inline(always)]
const fn turn_yz((x, y, z): Point) -> Point {
    (x, -z, y)
}

/// Quarter turn in the xz plane.
#[inline(always)]
const fn turn_xz((x, y, z): Point) -> Point {
    (-z, y, x)
}

/// Rotates a point around the origin.
///
/// The xy turns are applied first, then the yz turns, then the xz turns, so a
/// given code always lands on the same orientation.
pub const fn rotate(point: Point, rotation: Rotation) -> Point {
    let (xy_turns, yz_turns, xz_turns) = rotation.fields();
    let mut rotated = point;

    let mut turn = 0;
    while turn < xy_turns {
        rotated = turn_xy(rotated);
        turn += 1;
    }

    turn = 0;
    while turn < yz_turns {
        rotated = turn_yz(rotated);
        turn += 1;
    }

    turn = 0;
    while turn < xz_turns {
        rotated = turn_xz(rotated);
        turn += 1;
    }

    rotated
}

/// Translates `point` by `offset`.
#[inline(always)]
pub const fn translate(point: Point, offset: Point) -> Point {
    (point.0 + offset.0, point.1 + offset.1, point.2 + offset.2)
}

/// Returns the offset that moves `from` onto `to`.
#[inline(always)]
pub const fn offset_between(from: Point, to: Point) -> Point {
    (to.0 - from.0, to.1 - from.1, to.2 - from.2)
}
