//! Per-tick animations
//!
//! Two independent animators advance once per render tick:
//! - `BorderAnimator` walks a highlight clockwise around the grid perimeter
//! - `ChargeSweep` moves the charging bar up through the interior rows

use crate::grid::GRID_SIZE;

/// Number of cells on the outer ring of the grid
pub const PERIMETER_LEN: usize = 4 * GRID_SIZE - 4;

/// Interior row the charge sweep starts from (bottom)
pub const SWEEP_FIRST_ROW: u8 = GRID_SIZE as u8 - 2;

/// Interior row the charge sweep ends on (top)
pub const SWEEP_LAST_ROW: u8 = 1;

/// A position on the perimeter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HighlightCursor {
    index: u8,
    x: u8,
    y: u8,
}

impl HighlightCursor {
    /// Cursor for perimeter index `index` (taken modulo the perimeter length)
    pub const fn at(index: usize) -> Self {
        let i = index % PERIMETER_LEN;
        let n = GRID_SIZE;
        let (x, y) = if i < n {
            (i, 0)
        } else if i < 2 * n - 1 {
            (n - 1, i - (n - 1))
        } else if i < 3 * n - 2 {
            ((n - 1) - (i - (2 * n - 2)), n - 1)
        } else {
            (0, (n - 1) - (i - (3 * n - 3)))
        };
        Self {
            index: i as u8,
            x: x as u8,
            y: y as u8,
        }
    }

    /// Perimeter index in `[0, PERIMETER_LEN)`
    pub const fn index(&self) -> usize {
        self.index as usize
    }

    /// Column of the highlighted cell
    pub const fn x(&self) -> usize {
        self.x as usize
    }

    /// Row of the highlighted cell
    pub const fn y(&self) -> usize {
        self.y as usize
    }

    /// Whether the cursor sits on `(row, col)`
    pub const fn covers(&self, row: usize, col: usize) -> bool {
        self.y as usize == row && self.x as usize == col
    }

    /// Blink phase derived from the index
    pub const fn is_even(&self) -> bool {
        self.index % 2 == 0
    }
}

/// Clockwise highlight around the grid border
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BorderAnimator {
    /// Index the next tick will produce
    next: u8,
    /// Cell produced by the last tick
    current: HighlightCursor,
}

impl BorderAnimator {
    pub const fn new() -> Self {
        Self {
            next: 0,
            current: HighlightCursor::at(0),
        }
    }

    /// Produce the cell for the current index, then advance by one
    pub fn tick(&mut self) -> HighlightCursor {
        self.current = HighlightCursor::at(self.next as usize);
        self.next = ((self.next as usize + 1) % PERIMETER_LEN) as u8;
        self.current
    }

    /// Number of ticks taken so far, modulo the perimeter length
    pub const fn position(&self) -> usize {
        self.next as usize
    }

    /// Cell produced by the most recent tick
    pub const fn cursor(&self) -> HighlightCursor {
        self.current
    }
}

/// Row animation driving the charging pattern
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChargeSweep {
    row: u8,
}

impl Default for ChargeSweep {
    fn default() -> Self {
        Self::new()
    }
}

impl ChargeSweep {
    pub const fn new() -> Self {
        Self {
            row: SWEEP_FIRST_ROW,
        }
    }

    /// Current row
    pub const fn row(&self) -> u8 {
        self.row
    }

    /// Move one row up, wrapping back to the bottom
    pub fn tick(&mut self) -> u8 {
        self.row = if self.row <= SWEEP_LAST_ROW {
            SWEEP_FIRST_ROW
        } else {
            self.row - 1
        };
        self.row
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges() {
        assert_eq!((HighlightCursor::at(0).x(), HighlightCursor::at(0).y()), (0, 0));
        assert_eq!((HighlightCursor::at(7).x(), HighlightCursor::at(7).y()), (7, 0));
        assert_eq!((HighlightCursor::at(8).x(), HighlightCursor::at(8).y()), (7, 1));
        assert_eq!((HighlightCursor::at(14).x(), HighlightCursor::at(14).y()), (7, 7));
        assert_eq!((HighlightCursor::at(15).x(), HighlightCursor::at(15).y()), (6, 7));
        assert_eq!((HighlightCursor::at(21).x(), HighlightCursor::at(21).y()), (0, 7));
        assert_eq!((HighlightCursor::at(22).x(), HighlightCursor::at(22).y()), (0, 6));
        assert_eq!((HighlightCursor::at(27).x(), HighlightCursor::at(27).y()), (0, 1));
    }

    #[test]
    fn test_index_wraps() {
        assert_eq!(HighlightCursor::at(28), HighlightCursor::at(0));
        assert_eq!(HighlightCursor::at(57).index(), 1);
    }

    #[test]
    fn test_tick_returns_then_advances() {
        let mut animator = BorderAnimator::new();
        let first = animator.tick();
        assert_eq!(first.index(), 0);
        assert_eq!(animator.position(), 1);
        assert_eq!(animator.cursor(), first);

        let second = animator.tick();
        assert_eq!((second.x(), second.y()), (1, 0));
    }

    #[test]
    fn test_full_cycle_returns_to_start() {
        let mut animator = BorderAnimator::new();
        for _ in 0..PERIMETER_LEN {
            animator.tick();
        }
        assert_eq!(animator.position(), 0);
        assert_eq!(animator.tick().index(), 0);
    }

    #[test]
    fn test_covers() {
        let cursor = HighlightCursor::at(9); // (x=7, y=2)
        assert!(cursor.covers(2, 7));
        assert!(!cursor.covers(7, 2));
    }

    #[test]
    fn test_sweep_rises_and_wraps() {
        let mut sweep = ChargeSweep::new();
        assert_eq!(sweep.row(), 6);
        let rows: [u8; 7] = core::array::from_fn(|_| sweep.tick());
        assert_eq!(rows, [5, 4, 3, 2, 1, 6, 5]);
    }
}
