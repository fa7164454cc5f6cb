//! Event channel transport trait

use alloc::string::String;
use core::fmt;

/// Errors that can occur on the event channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError {
    /// Channel is not open
    NotConnected,
    /// Frame could not be written
    SendFailed,
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::NotConnected => write!(f, "channel not connected"),
            TransportError::SendFailed => write!(f, "send failed"),
        }
    }
}

/// Something that happened on the channel since the last poll
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportEvent {
    /// Connection established
    Opened,
    /// Connection closed or lost
    Closed,
    /// One complete text frame
    Text(String),
}

/// Trait for the persistent duplex message channel
///
/// Connection management and reconnects belong to the implementation. The
/// control loop only drains events and sends text frames.
pub trait EventTransport {
    /// Next pending event, without blocking
    fn poll(&mut self) -> Option<TransportEvent>;

    /// Send one text frame
    fn send(&mut self, text: &str) -> Result<(), TransportError>;
}
