//! Configuration type definitions
//!
//! Every section and field has a default, so a partial file only needs to
//! name what differs.

use core::fmt;

use chargeglow_display::DEFAULT_HIGHLIGHT_STEP;
use heapless::String;

use crate::sensor::SlotId;
use crate::traits::BeepPattern;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum access token length
pub const MAX_TOKEN_LEN: usize = 256;

/// Maximum entity id length
pub const MAX_ENTITY_LEN: usize = 64;

/// Default render tick period
pub const DEFAULT_TICK_INTERVAL_MS: u32 = 100;

/// Default strip brightness
pub const DEFAULT_BRIGHTNESS: u8 = 20;

/// An entity id on the event server
pub type EntityId = String<MAX_ENTITY_LEN>;

/// Event channel settings
#[derive(Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ChannelConfig {
    /// Token sent in the `auth` message
    pub access_token: String<MAX_TOKEN_LEN>,
    /// Warn when the handshake has not finished this long after opening
    pub handshake_timeout_ms: Option<u32>,
}

impl fmt::Debug for ChannelConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChannelConfig")
            .field("access_token", &"<redacted>")
            .field("handshake_timeout_ms", &self.handshake_timeout_ms)
            .finish()
    }
}

/// Entities bound to the two slots
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SlotConfig {
    /// Entity drawn on the left half
    pub slot_1: EntityId,
    /// Entity drawn on the right half
    pub slot_2: EntityId,
}

impl Default for SlotConfig {
    fn default() -> Self {
        Self {
            slot_1: String::try_from("sensor.charger_1_status").unwrap_or_default(),
            slot_2: String::try_from("sensor.charger_2_status").unwrap_or_default(),
        }
    }
}

impl SlotConfig {
    /// Entity id bound to a slot
    pub fn entity(&self, slot: SlotId) -> &str {
        match slot {
            SlotId::One => self.slot_1.as_str(),
            SlotId::Two => self.slot_2.as_str(),
        }
    }
}

/// Matrix settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DisplayConfig {
    /// Global strip brightness (0-255)
    pub brightness: u8,
    /// Render tick period
    pub tick_interval_ms: u32,
    /// Amount subtracted from each channel of the highlighted cell
    pub highlight_step: u8,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            brightness: DEFAULT_BRIGHTNESS,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            highlight_step: DEFAULT_HIGHLIGHT_STEP,
        }
    }
}

/// Complete device configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DeviceConfig {
    pub channel: ChannelConfig,
    pub slots: SlotConfig,
    pub display: DisplayConfig,
    pub alert: BeepPattern,
}
