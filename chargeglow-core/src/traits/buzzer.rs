//! Audible alert trait

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A train of equal beeps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BeepPattern {
    /// Number of beeps
    pub beeps: u8,
    /// Length of each beep
    pub duration_ms: u16,
    /// Silence between beeps (not after the last one)
    pub gap_ms: u16,
}

impl Default for BeepPattern {
    fn default() -> Self {
        Self {
            beeps: 2,
            duration_ms: 100,
            gap_ms: 50,
        }
    }
}

impl BeepPattern {
    /// Wall time the pattern occupies
    pub fn total_ms(&self) -> u32 {
        let beeps = self.beeps as u32;
        beeps * self.duration_ms as u32 + beeps.saturating_sub(1) * self.gap_ms as u32
    }
}

/// Trait for the alert buzzer
///
/// Implementations may block for the length of the pattern.
pub trait Buzzer {
    /// Play a beep pattern
    fn play(&mut self, pattern: &BeepPattern);
}
