//! Board representation and row clearing.
//!
//! The board is a flat row-major array of occupancy flags. Row 0 is the top
//! row; odd rows are drawn shifted half a cell to the right. Every operation
//! that changes occupancy returns a new board.

use std::fmt;

use crate::pieces::Cell;

/// Glyph for an occupied cell.
const FULL: char = '⬢';
/// Glyph for an empty cell.
const EMPTY: char = '⬡';
/// Glyph for a cell covered by an overlaid unit.
const OVERLAY: char = '◆';

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl Board {
    /// Builds a board with `filled` marked occupied.
    ///
    /// Every filled cell must lie on the board; an out-of-range cell panics.
    pub fn new(height: usize, width: usize, filled: &[Cell]) -> Self {
        let mut board = Self {
            width: if height == 0 { 0 } else { width },
            height,
            cells: vec![false; width * height],
        };
        for &cell in filled {
            let index = board.index(cell);
            board.cells[index] = true;
        }
        board
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Flat index of an on-board cell.
    #[inline(always)]
    fn index(&self, cell: Cell) -> usize {
        assert!(
            self.contains(cell),
            "cell ({}, {}) is outside the {}x{} board",
            cell.x,
            cell.y,
            self.width,
            self.height
        );
        cell.y as usize * self.width + cell.x as usize
    }

    #[inline]
    fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0
            && cell.y >= 0
            && (cell.x as usize) < self.width
            && (cell.y as usize) < self.height
    }

    /// Occupancy of an on-board cell. Check [`Board::cell_is_valid`] first;
    /// asking about an off-board cell panics.
    #[inline]
    pub fn is_cell_full(&self, cell: Cell) -> bool {
        self.cells[self.index(cell)]
    }

    /// True if the cell is on the board and empty.
    #[inline]
    pub fn cell_is_valid(&self, cell: Cell) -> bool {
        self.contains(cell) && !self.is_cell_full(cell)
    }

    /// Returns a copy with `cells` marked occupied in addition to the current ones.
    pub fn fill_cells(&self, cells: &[Cell]) -> Board {
        let mut board = self.clone();
        for &cell in cells {
            let index = board.index(cell);
            board.cells[index] = true;
        }
        board
    }

    fn row(&self, row: usize) -> &[bool] {
        &self.cells[row * self.width..(row + 1) * self.width]
    }

    pub fn is_row_full(&self, row: usize) -> bool {
        self.row(row).iter().all(|&full| full)
    }

    /// Removes every full row and drops the rows above it.
    ///
    /// Surviving rows keep their relative order and end up at the bottom of a
    /// fresh grid; the top is backfilled with empty rows. Returns the new
    /// board and the number of rows removed.
    pub fn clear_full_rows(&self) -> (Board, usize) {
        let kept: Vec<usize> = (0..self.height).filter(|&row| !self.is_row_full(row)).collect();
        let cleared = self.height - kept.len();
        if cleared == 0 {
            return (self.clone(), 0);
        }

        let mut cells = vec![false; self.cells.len()];
        for (offset, &row) in kept.iter().enumerate() {
            let dest = (cleared + offset) * self.width;
            cells[dest..dest + self.width].copy_from_slice(self.row(row));
        }

        let board = Board {
            width: self.width,
            height: self.height,
            cells,
        };
        (board, cleared)
    }
}

/// Formats the board with `overlay` cells drawn on top.
///
/// One line per row, cells separated by a space, odd rows indented by one
/// space. Overlay cells off the board are ignored.
pub fn format_board(board: &Board, overlay: &[Cell]) -> String {
    let mut output = String::new();
    for y in 0..board.height() {
        if y > 0 {
            output.push('\n');
        }
        if y % 2 == 1 {
            output.push(' ');
        }
        for x in 0..board.width() {
            if x > 0 {
                output.push(' ');
            }
            let cell = Cell::new(x as i32, y as i32);
            let glyph = if overlay.contains(&cell) {
                OVERLAY
            } else if board.is_cell_full(cell) {
                FULL
            } else {
                EMPTY
            };
            output.push(glyph);
        }
    }
    output
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_board(self, &[]))
    }
}
