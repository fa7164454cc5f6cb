//! Status snapshot served to the local status endpoint

use alloc::string::String;
use alloc::vec::Vec;

use chargeglow_display::GRID_SIZE;
use serde::Serialize;

/// Point-in-time view of the device
///
/// Field names are the JSON keys the status page reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusSnapshot {
    /// Seconds since start
    pub uptime: u64,
    pub wifi_connected: bool,
    pub ws_connected: bool,
    pub sensor_1_state: String,
    pub sensor_2_state: String,
    #[serde(rename = "displayBrightness")]
    pub display_brightness: u8,
    pub should_render: bool,
    /// Log lines, newest first
    #[serde(rename = "logBuffer")]
    pub log_buffer: Vec<String>,
    /// Grid rows as `0xRRGGBB`, highlight applied
    #[serde(rename = "displayArray")]
    pub display_array: [[u32; GRID_SIZE]; GRID_SIZE],
}

impl StatusSnapshot {
    /// Serialize as compact JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
