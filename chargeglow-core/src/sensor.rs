//! Sensor slots
//!
//! Two fixed slots, each holding the last state token reported for the
//! entity bound to it. An empty token means the slot has not been set.

use heapless::String;

use crate::text::truncated;

/// Maximum state token length
pub const MAX_STATE_LEN: usize = 32;

/// A reported state token
pub type SensorState = String<MAX_STATE_LEN>;

/// Slot identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SlotId {
    /// Slot 1, drawn on the left half
    One,
    /// Slot 2, drawn on the right half
    Two,
}

impl SlotId {
    pub const ALL: [SlotId; 2] = [SlotId::One, SlotId::Two];

    /// Slot for a 1-based number
    pub fn from_number(n: u32) -> Option<Self> {
        match n {
            1 => Some(SlotId::One),
            2 => Some(SlotId::Two),
            _ => None,
        }
    }

    /// 1-based number of this slot
    pub const fn number(self) -> u8 {
        match self {
            SlotId::One => 1,
            SlotId::Two => 2,
        }
    }

    const fn index(self) -> usize {
        self.number() as usize - 1
    }
}

/// Current state of both slots
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SensorSlots {
    states: [SensorState; 2],
}

impl SensorSlots {
    pub const fn new() -> Self {
        Self {
            states: [String::new(), String::new()],
        }
    }

    /// State token of a slot (empty when unset)
    pub fn get(&self, slot: SlotId) -> &str {
        self.states[slot.index()].as_str()
    }

    /// Overwrite a slot, truncating long tokens
    pub fn set(&mut self, slot: SlotId, state: &str) {
        self.states[slot.index()] = truncated(state);
    }

    /// Reset a slot to unset
    pub fn clear(&mut self, slot: SlotId) {
        self.states[slot.index()].clear();
    }

    /// Whether a slot has ever been set
    pub fn is_set(&self, slot: SlotId) -> bool {
        !self.states[slot.index()].is_empty()
    }
}
