//! Cells, moves and units (the falling pieces).
//!
//! A unit is a set of member cells plus a pivot. Units are values: every
//! translation or rotation builds a new unit and leaves the source alone.

use serde::{Deserialize, Serialize};

use crate::geometry::{self, Cube, Turn};
use crate::grid::Board;

/// An offset coordinate on the hex board.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// One atomic command applied to a unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Move {
    East,
    West,
    SouthEast,
    SouthWest,
    RotateClockwise,
    RotateCounterClockwise,
}

impl Move {
    pub const ALL: [Move; 6] = [
        Move::East,
        Move::West,
        Move::SouthEast,
        Move::SouthWest,
        Move::RotateClockwise,
        Move::RotateCounterClockwise,
    ];

    /// Returns true if `self` directly reverses `previous` along the row.
    #[inline]
    pub fn undoes(self, previous: Move) -> bool {
        matches!(
            (previous, self),
            (Move::East, Move::West) | (Move::West, Move::East)
        )
    }
}

/// Canonical form of a placement: pivot plus members sorted.
///
/// Two units with equal keys are equal under [`Unit`]'s `PartialEq`.
pub type PlacementKey = (Cell, Vec<Cell>);

/// A piece: member cells and the pivot they rotate around.
///
/// The pivot does not have to be one of the members.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Unit {
    pub members: Vec<Cell>,
    pub pivot: Cell,
}

impl Unit {
    pub fn new(members: Vec<Cell>, pivot: Cell) -> Self {
        Self { members, pivot }
    }

    /// Rigidly translates the unit by the cube-space offset from `old_pivot`
    /// to `new_pivot`. Members and pivot move together.
    pub fn move_to(&self, new_pivot: Cell, old_pivot: Cell) -> Unit {
        self.translate(geometry::delta_between(old_pivot, new_pivot))
    }

    /// Applies one move. Rotations turn the members around the pivot and
    /// leave the pivot where it is.
    pub fn step(&self, command: Move) -> Unit {
        let delta = match command {
            Move::East => geometry::EAST,
            Move::West => geometry::WEST,
            Move::SouthEast => geometry::SOUTH_EAST,
            Move::SouthWest => geometry::SOUTH_WEST,
            Move::RotateClockwise => return self.turn(Turn::Clockwise),
            Move::RotateCounterClockwise => return self.turn(Turn::CounterClockwise),
        };
        self.translate(delta)
    }

    fn translate(&self, delta: Cube) -> Unit {
        Unit {
            members: self
                .members
                .iter()
                .map(|&member| geometry::translate(member, delta))
                .collect(),
            pivot: geometry::translate(self.pivot, delta),
        }
    }

    fn turn(&self, turn: Turn) -> Unit {
        Unit {
            members: self
                .members
                .iter()
                .map(|&member| geometry::rotate(member, self.pivot, turn))
                .collect(),
            pivot: self.pivot,
        }
    }

    /// True if every member is on the board and unoccupied. The pivot is not checked.
    pub fn is_valid(&self, board: &Board) -> bool {
        self.members.iter().all(|&member| board.cell_is_valid(member))
    }

    pub fn width(&self) -> i32 {
        extent(self.members.iter().map(|member| member.x))
    }

    pub fn height(&self) -> i32 {
        extent(self.members.iter().map(|member| member.y))
    }

    /// The first member with the smallest column.
    pub fn min_x_cell(&self) -> Option<Cell> {
        self.members.iter().copied().min_by_key(|member| member.x)
    }

    /// The first member with the smallest row.
    pub fn min_y_cell(&self) -> Option<Cell> {
        self.members.iter().copied().min_by_key(|member| member.y)
    }

    pub fn placement_key(&self) -> PlacementKey {
        let mut members = self.members.clone();
        members.sort_unstable();
        (self.pivot, members)
    }
}

/// Bounding-box span of a set of coordinates, 0 when empty.
fn extent(values: impl Iterator<Item = i32>) -> i32 {
    let (min, max) = values.fold((i32::MAX, i32::MIN), |(lo, hi), value| {
        (lo.min(value), hi.max(value))
    });
    if min > max {
        0
    } else {
        1 + max - min
    }
}

/// Units compare by pivot and by members as a multiset; member order is ignored.
/// Width and height follow from the members, so they match whenever the keys do.
impl PartialEq for Unit {
    fn eq(&self, other: &Self) -> bool {
        self.pivot == other.pivot
            && self.members.len() == other.members.len()
            && self.placement_key() == other.placement_key()
    }
}

impl Eq for Unit {}
