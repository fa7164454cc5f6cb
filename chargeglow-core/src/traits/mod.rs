//! Hardware and transport traits
//!
//! These traits define the interface between the application logic
//! and device-specific implementations.

pub mod buzzer;
pub mod transport;

pub use buzzer::{BeepPattern, Buzzer};
pub use transport::{EventTransport, TransportError, TransportEvent};
