//! Logical → physical pixel mapping
//!
//! The matrix is wired left-to-right on every row (no serpentine), so the
//! physical address is plain row-major order.

use crate::grid::GRID_SIZE;

/// Number of addressable pixels on the strip
pub const LED_COUNT: usize = GRID_SIZE * GRID_SIZE;

/// Strip address of the cell at `(row, col)`
#[inline]
pub const fn physical_index(row: usize, col: usize) -> usize {
    row * GRID_SIZE + col
}
