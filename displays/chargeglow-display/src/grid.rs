//! Logical pixel buffer
//!
//! Coordinates are `(row, col)`, row 0 at the top, col 0 at the left.

use crate::color::Color;

/// Width and height of the square grid
pub const GRID_SIZE: usize = 8;

/// 8x8 buffer of palette colors
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PixelGrid {
    cells: [[Color; GRID_SIZE]; GRID_SIZE],
}

impl Default for PixelGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl PixelGrid {
    /// Create an all-black grid
    pub const fn new() -> Self {
        Self {
            cells: [[Color::Black; GRID_SIZE]; GRID_SIZE],
        }
    }

    /// Reset every cell to black
    pub fn clear(&mut self) {
        self.cells = [[Color::Black; GRID_SIZE]; GRID_SIZE];
    }

    /// Paint one cell
    ///
    /// Coordinates outside the grid are ignored.
    pub fn set(&mut self, row: i32, col: i32, color: Color) {
        if let (Ok(r), Ok(c)) = (usize::try_from(row), usize::try_from(col)) {
            if r < GRID_SIZE && c < GRID_SIZE {
                self.cells[r][c] = color;
            }
        }
    }

    /// Read one cell, `None` outside the grid
    pub fn get(&self, row: usize, col: usize) -> Option<Color> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Iterate `(row, col, color)` in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, Color)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .flat_map(|(r, row)| row.iter().enumerate().map(move |(c, &color)| (r, c, color)))
    }

    /// Number of cells holding something other than black
    pub fn lit_count(&self) -> usize {
        self.cells().filter(|&(_, _, c)| c != Color::Black).count()
    }
}
