//! Frame rendering
//!
//! Builds the logical grid for the current scene and converts it to a
//! physical frame.
//!
//! Connected layout (C = cyan, M = magenta, left half = slot 1):
//! ```text
//!   C C C C M M M M
//!   C . . C M . . M
//!   C . . C M . . M
//!   ...
//!   C C C C M M M M
//! ```
//! Each slot draws its pattern in the two free columns of its half.

use crate::animation::HighlightCursor;
use crate::color::{Color, Rgb, DEFAULT_HIGHLIGHT_STEP};
use crate::grid::{PixelGrid, GRID_SIZE};
use crate::layout::{physical_index, LED_COUNT};

/// State token painted as a charging bar
pub const STATE_CHARGING: &str = "charging";
/// State token painted as a zig-zag
pub const STATE_DISCONNECTED: &str = "disconnected";
/// State token painted as two stacked pairs
pub const STATE_UNKNOWN: &str = "unknown";

/// Which half of the grid a slot occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SlotSide {
    Left,
    Right,
}

impl SlotSide {
    /// First column of this half
    pub const fn col_base(self) -> i32 {
        match self {
            SlotSide::Left => 0,
            SlotSide::Right => 4,
        }
    }
}

/// Pattern drawn for a recognised slot state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SlotPattern {
    Charging,
    Disconnected,
    Unknown,
}

impl SlotPattern {
    /// Pattern for a state token, `None` when nothing is drawn
    pub fn from_state(state: &str) -> Option<Self> {
        match state {
            STATE_CHARGING => Some(SlotPattern::Charging),
            STATE_DISCONNECTED => Some(SlotPattern::Disconnected),
            STATE_UNKNOWN => Some(SlotPattern::Unknown),
            _ => None,
        }
    }
}

/// Everything a render pass depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Scene {
    /// Event channel (and network) up
    pub connected: bool,
    /// Pattern for slot 1 (left half)
    pub left: Option<SlotPattern>,
    /// Pattern for slot 2 (right half)
    pub right: Option<SlotPattern>,
    /// Highlighted perimeter cell
    pub cursor: HighlightCursor,
    /// Row supplied by the charge sweep
    pub sweep_row: u8,
}

impl Scene {
    /// Build a scene from raw slot state tokens
    pub fn new(
        connected: bool,
        slot1: Option<&str>,
        slot2: Option<&str>,
        cursor: HighlightCursor,
        sweep_row: u8,
    ) -> Self {
        Self {
            connected,
            left: slot1.and_then(SlotPattern::from_state),
            right: slot2.and_then(SlotPattern::from_state),
            cursor,
            sweep_row,
        }
    }
}

/// One full set of physical pixel values
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    pixels: [Rgb; LED_COUNT],
}

impl Frame {
    /// All pixels off
    pub const fn blank() -> Self {
        Self {
            pixels: [Rgb::new(0, 0, 0); LED_COUNT],
        }
    }

    /// Pixel at a physical index
    pub fn pixel(&self, index: usize) -> Option<Rgb> {
        self.pixels.get(index).copied()
    }

    /// Ordered `(physical index, 0xRRGGBB)` writes
    pub fn writes(&self) -> impl Iterator<Item = (usize, u32)> + '_ {
        self.pixels.iter().enumerate().map(|(i, p)| (i, p.to_u32()))
    }

    /// Packed colors arranged as grid rows
    pub fn rows(&self) -> [[u32; GRID_SIZE]; GRID_SIZE] {
        let mut rows = [[0u32; GRID_SIZE]; GRID_SIZE];
        for (r, row) in rows.iter_mut().enumerate() {
            for (c, value) in row.iter_mut().enumerate() {
                *value = self.pixels[physical_index(r, c)].to_u32();
            }
        }
        rows
    }
}

/// Grid owner and renderer
#[derive(Debug, Clone)]
pub struct RenderEngine {
    grid: PixelGrid,
    highlight: HighlightCursor,
    highlight_step: u8,
}

impl Default for RenderEngine {
    fn default() -> Self {
        Self::new(DEFAULT_HIGHLIGHT_STEP)
    }
}

impl RenderEngine {
    /// Create a renderer that darkens the highlighted cell by `highlight_step`
    pub const fn new(highlight_step: u8) -> Self {
        Self {
            grid: PixelGrid::new(),
            highlight: HighlightCursor::at(0),
            highlight_step,
        }
    }

    /// Current logical grid
    pub fn grid(&self) -> &PixelGrid {
        &self.grid
    }

    /// Cursor used by the last render
    pub fn highlight(&self) -> HighlightCursor {
        self.highlight
    }

    /// Rebuild the grid for `scene` and produce its frame
    pub fn render(&mut self, scene: &Scene) -> Frame {
        self.grid.clear();
        self.highlight = scene.cursor;

        if scene.connected {
            draw_frame(&mut self.grid);
            if let Some(pattern) = scene.left {
                draw_slot(&mut self.grid, SlotSide::Left, pattern, scene.sweep_row);
            }
            if let Some(pattern) = scene.right {
                draw_slot(&mut self.grid, SlotSide::Right, pattern, scene.sweep_row);
            }
        } else {
            draw_no_link(&mut self.grid, scene.cursor);
        }

        self.compose()
    }

    /// Manually paint one cell (out-of-range coordinates are ignored)
    pub fn set_cell(&mut self, row: i32, col: i32, color: Color) {
        self.grid.set(row, col, color);
    }

    /// Blank the grid
    pub fn clear(&mut self) {
        self.grid.clear();
    }

    /// Convert the grid as it stands into a physical frame
    pub fn compose(&self) -> Frame {
        let mut frame = Frame::blank();
        for (row, col, color) in self.grid.cells() {
            let mut rgb = color.rgb();
            if self.highlight.covers(row, col) {
                rgb = rgb.dimmed(self.highlight_step);
            }
            frame.pixels[physical_index(row, col)] = rgb;
        }
        frame
    }
}

fn draw_frame(grid: &mut PixelGrid) {
    for col in [1, 2] {
        grid.set(0, col, Color::Cyan);
        grid.set(7, col, Color::Cyan);
    }
    for col in [5, 6] {
        grid.set(0, col, Color::Magenta);
        grid.set(7, col, Color::Magenta);
    }
    for row in 0..GRID_SIZE as i32 {
        grid.set(row, 0, Color::Cyan);
        grid.set(row, 3, Color::Cyan);
        grid.set(row, 4, Color::Magenta);
        grid.set(row, 7, Color::Magenta);
    }
}

fn draw_slot(grid: &mut PixelGrid, side: SlotSide, pattern: SlotPattern, sweep_row: u8) {
    let base = side.col_base();
    let row = sweep_row as i32;

    match pattern {
        SlotPattern::Charging => {
            grid.set(row, base + 1, Color::Blue);
            grid.set(row, base + 2, Color::Blue);
        }
        SlotPattern::Disconnected => {
            for i in 1..7 {
                let col = if (i + row) % 2 == 0 { 1 } else { 2 };
                grid.set(i, base + col, Color::Yellow);
            }
        }
        SlotPattern::Unknown => {
            let start = if row % 2 == 0 { 2 } else { 3 };
            for r in [start, start + 2] {
                grid.set(r, base + 1, Color::Red);
                grid.set(r, base + 2, Color::Red);
            }
        }
    }
}

fn draw_no_link(grid: &mut PixelGrid, cursor: HighlightCursor) {
    if cursor.is_even() {
        grid.set(0, 0, Color::Blue);
    }
    for r in (1..GRID_SIZE as i32).step_by(2) {
        for c in r..GRID_SIZE as i32 {
            grid.set(c, 7 - r, Color::Red);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene(connected: bool, slot1: Option<&str>, slot2: Option<&str>) -> Scene {
        Scene::new(connected, slot1, slot2, HighlightCursor::at(0), 6)
    }

    #[test]
    fn test_pattern_from_state() {
        assert_eq!(SlotPattern::from_state("charging"), Some(SlotPattern::Charging));
        assert_eq!(
            SlotPattern::from_state("disconnected"),
            Some(SlotPattern::Disconnected)
        );
        assert_eq!(SlotPattern::from_state("unknown"), Some(SlotPattern::Unknown));
        assert_eq!(SlotPattern::from_state("Charging"), None);
        assert_eq!(SlotPattern::from_state("idle"), None);
    }

    #[test]
    fn test_connected_frame_only() {
        let mut engine = RenderEngine::default();
        engine.render(&scene(true, None, None));
        let grid = engine.grid();

        // Four full columns plus four corner pairs
        assert_eq!(grid.lit_count(), 4 * 8 + 8);
        assert_eq!(grid.get(0, 1), Some(Color::Cyan));
        assert_eq!(grid.get(7, 6), Some(Color::Magenta));
        assert_eq!(grid.get(3, 0), Some(Color::Cyan));
        assert_eq!(grid.get(3, 4), Some(Color::Magenta));
        assert_eq!(grid.get(3, 1), Some(Color::Black));
    }

    #[test]
    fn test_charging_uses_sweep_row() {
        let mut engine = RenderEngine::default();
        engine.render(&Scene::new(
            true,
            Some("charging"),
            Some("charging"),
            HighlightCursor::at(0),
            4,
        ));
        let grid = engine.grid();
        for col in [1, 2, 5, 6] {
            assert_eq!(grid.get(4, col), Some(Color::Blue));
        }
        assert_eq!(grid.lit_count(), 40 + 4);
    }

    #[test]
    fn test_disconnected_zigzag() {
        let mut engine = RenderEngine::default();
        engine.render(&Scene::new(
            true,
            Some("disconnected"),
            None,
            HighlightCursor::at(0),
            1,
        ));
        let grid = engine.grid();
        // (i + 1) even → column 1, odd → column 2
        for i in 1..7usize {
            let expected_col = if (i + 1) % 2 == 0 { 1 } else { 2 };
            let other_col = 3 - expected_col;
            assert_eq!(grid.get(i, expected_col), Some(Color::Yellow));
            assert_eq!(grid.get(i, other_col), Some(Color::Black));
        }
    }

    #[test]
    fn test_unknown_pairs_follow_row_parity() {
        let mut engine = RenderEngine::default();

        engine.render(&Scene::new(true, None, Some("unknown"), HighlightCursor::at(0), 2));
        for row in [2, 4] {
            assert_eq!(engine.grid().get(row, 5), Some(Color::Red));
            assert_eq!(engine.grid().get(row, 6), Some(Color::Red));
        }

        engine.render(&Scene::new(true, None, Some("unknown"), HighlightCursor::at(0), 3));
        for row in [3, 5] {
            assert_eq!(engine.grid().get(row, 5), Some(Color::Red));
        }
        assert_eq!(engine.grid().get(2, 5), Some(Color::Black));
    }

    #[test]
    fn test_unrecognised_state_draws_nothing() {
        let mut a = RenderEngine::default();
        let mut b = RenderEngine::default();
        let fa = a.render(&scene(true, Some("idle"), Some("")));
        let fb = b.render(&scene(true, None, None));
        assert_eq!(fa, fb);
    }

    #[test]
    fn test_no_link_hatch() {
        let mut engine = RenderEngine::default();
        engine.render(&Scene::new(false, Some("charging"), None, HighlightCursor::at(2), 6));
        let grid = engine.grid();

        assert_eq!(grid.get(0, 0), Some(Color::Blue));
        // r = 1: rows 1..8 in column 6
        assert_eq!(grid.get(1, 6), Some(Color::Red));
        assert_eq!(grid.get(7, 6), Some(Color::Red));
        // r = 7: only row 7 in column 0
        assert_eq!(grid.get(7, 0), Some(Color::Red));
        assert_eq!(grid.get(6, 0), Some(Color::Black));
        // 7 + 5 + 3 + 1 hatch cells + corner
        assert_eq!(grid.lit_count(), 17);
    }

    #[test]
    fn test_no_link_corner_blinks() {
        let mut engine = RenderEngine::default();
        engine.render(&Scene::new(false, None, None, HighlightCursor::at(3), 6));
        assert_eq!(engine.grid().get(0, 0), Some(Color::Black));
    }

    #[test]
    fn test_highlight_dims_one_pixel() {
        let mut engine = RenderEngine::default();
        let cursor = HighlightCursor::at(3); // (x=3, y=0), a cyan cell
        let frame = engine.render(&Scene::new(true, None, None, cursor, 6));

        assert_eq!(frame.pixel(3), Some(Rgb::new(0, 205, 205)));
        assert_eq!(frame.pixel(2), Some(Color::Cyan.rgb()));
        let dimmed = engine
            .grid()
            .cells()
            .zip(frame.writes())
            .filter(|&((_, _, color), (_, value))| color.rgb().to_u32() != value)
            .count();
        assert_eq!(dimmed, 1);
    }

    #[test]
    fn test_render_is_idempotent() {
        let mut engine = RenderEngine::default();
        let s = Scene::new(true, Some("unknown"), Some("charging"), HighlightCursor::at(11), 5);
        let first = engine.render(&s);
        let second = engine.render(&s);
        assert_eq!(first, second);
        assert_eq!(engine.compose(), first);
    }

    #[test]
    fn test_manual_cell_survives_until_next_render() {
        let mut engine = RenderEngine::default();
        let s = scene(true, None, None);
        engine.render(&s);
        engine.set_cell(3, 2, Color::Green);
        assert_eq!(engine.compose().pixel(physical_index(3, 2)), Some(Color::Green.rgb()));

        engine.render(&s);
        assert_eq!(engine.grid().get(3, 2), Some(Color::Black));
    }

    #[test]
    fn test_frame_rows_match_grid() {
        let mut engine = RenderEngine::default();
        let frame = engine.render(&scene(true, Some("charging"), None));
        let rows = frame.rows();
        assert_eq!(rows[6][1], 0x0000FF);
        // Cursor at index 0 dims the cyan corner
        assert_eq!(rows[0][0], 0x00CDCD);
    }
}
