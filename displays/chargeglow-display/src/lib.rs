//! Pixel grid, animation and rendering for the Chargeglow status matrix
//!
//! This crate provides:
//! - `Color` palette and 24-bit `Rgb` values with highlight dimming
//! - `PixelGrid`, the 8x8 logical color buffer
//! - `BorderAnimator` and `ChargeSweep`, the two per-tick animations
//! - `RenderEngine`, which turns connectivity and slot states into a `Frame`
//! - `LedStrip` trait for the addressable pixel hardware
//!
//! # Architecture
//!
//! Rendering is a pure function of its inputs: the engine rebuilds the grid
//! from scratch on every pass, then maps it to physical order and applies
//! the highlight while producing the output frame. The grid itself never
//! stores highlighted colors, so rendering twice with the same inputs
//! produces the same frame.
//!
//! ```text
//! Scene ──► PixelGrid (logical, 8x8 Color) ──► Frame (physical, 64 x 0xRRGGBB) ──► LedStrip
//!                                         ▲
//!                          highlight cursor (one cell dimmed)
//! ```

#![no_std]
#![deny(unsafe_code)]

pub mod animation;
pub mod backend;
pub mod color;
pub mod grid;
pub mod layout;
pub mod render;

// Re-export key types
pub use animation::{BorderAnimator, ChargeSweep, HighlightCursor, PERIMETER_LEN};
pub use backend::{LedStrip, StripError};
pub use color::{Color, Rgb, DEFAULT_HIGHLIGHT_STEP};
pub use grid::{PixelGrid, GRID_SIZE};
pub use layout::{physical_index, LED_COUNT};
pub use render::{
    Frame, RenderEngine, Scene, SlotPattern, SlotSide, STATE_CHARGING, STATE_DISCONNECTED,
    STATE_UNKNOWN,
};
