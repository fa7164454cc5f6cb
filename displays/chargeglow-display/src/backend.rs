//! LED strip backend trait
//!
//! Defines the interface to the addressable pixel hardware.

use crate::render::Frame;

/// LED strip errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StripError {
    /// Data line transfer failed
    Communication,
    /// Strip not initialized
    NotInitialized,
}

/// LED strip backend trait
///
/// Implementations push a whole frame per call: every pixel value is
/// already computed when `show` is invoked, so the strip never latches a
/// half-updated picture.
pub trait LedStrip {
    /// Latch a complete frame onto the strip
    fn show(&mut self, frame: &Frame) -> Result<(), StripError>;

    /// Set the global brightness (0 = off, 255 = full)
    fn set_brightness(&mut self, level: u8) -> Result<(), StripError>;

    /// Turn every pixel off
    fn clear(&mut self) -> Result<(), StripError> {
        self.show(&Frame::blank())
    }
}
