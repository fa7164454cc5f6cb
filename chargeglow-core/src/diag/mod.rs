//! Diagnostics
//!
//! In-memory log of recent events, readable over the status endpoint and
//! the serial console.

pub mod ring;

pub use ring::{LogEntry, LogLevel, LogRing, LOG_CAPACITY, LOG_LINE_LEN};
