//! Hexagonal coordinate utilities.
//!
//! Board cells use "odd-row-shifted" offset coordinates: every odd row is
//! drawn half a cell to the right of the even rows. Neighbour and rotation
//! arithmetic depends on row parity in that form, so every movement is
//! computed in cube coordinates (`x + y + z == 0`) and converted back.

use std::ops::{Add, Sub};

use crate::pieces::Cell;

/// A hex position in cube coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cube {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Cube {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

impl Add for Cube {
    type Output = Cube;

    fn add(self, other: Cube) -> Cube {
        Cube::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Sub for Cube {
    type Output = Cube;

    fn sub(self, other: Cube) -> Cube {
        Cube::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

/// One step east along the row.
pub const EAST: Cube = Cube::new(1, -1, 0);
/// One step west along the row.
pub const WEST: Cube = Cube::new(-1, 1, 0);
/// One step down and to the right.
pub const SOUTH_EAST: Cube = Cube::new(0, -1, 1);
/// One step down and to the left.
pub const SOUTH_WEST: Cube = Cube::new(-1, 0, 1);

/// Converts an offset cell to cube coordinates.
///
/// `y - (y & 1)` is always even, so the division is exact for negative rows too.
#[inline]
pub const fn cell_to_cube(cell: Cell) -> Cube {
    let x = cell.x - (cell.y - (cell.y & 1)) / 2;
    let z = cell.y;
    Cube::new(x, -x - z, z)
}

/// Converts cube coordinates back to an offset cell.
#[inline]
pub const fn cube_to_cell(cube: Cube) -> Cell {
    Cell {
        x: cube.x + (cube.z - (cube.z & 1)) / 2,
        y: cube.z,
    }
}

/// Cube-space delta that carries `from` onto `to`.
#[inline]
pub fn delta_between(from: Cell, to: Cell) -> Cube {
    cell_to_cube(to) - cell_to_cube(from)
}

/// Translates a cell by a cube-space delta.
#[inline]
pub fn translate(cell: Cell, delta: Cube) -> Cell {
    cube_to_cell(cell_to_cube(cell) + delta)
}

/// Direction of a 60 degree turn, as seen on a board drawn with row 0 on top.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Turn {
    Clockwise,
    CounterClockwise,
}

/// Rotates `cell` by 60 degrees around `pivot`.
///
/// With `d = pivot - cell` in cube space, a clockwise turn lands on
/// `pivot + (d.z, d.x, d.y)` and a counter-clockwise turn on
/// `pivot + (d.y, d.z, d.x)`. East of the pivot turns into south-east
/// (clockwise) or north-east (counter-clockwise).
///
/// This is the turn of the puzzle files: row 0 is the top row, odd rows are
/// shifted half a cell right, and six turns in one direction restore a unit.
/// A plain cyclic permutation of `d` would turn by 120 degrees instead.
pub fn rotate(cell: Cell, pivot: Cell, turn: Turn) -> Cell {
    let center = cell_to_cube(pivot);
    let d = center - cell_to_cube(cell);
    let offset = match turn {
        Turn::Clockwise => Cube::new(d.z, d.x, d.y),
        Turn::CounterClockwise => Cube::new(d.y, d.z, d.x),
    };
    cube_to_cell(center + offset)
}
