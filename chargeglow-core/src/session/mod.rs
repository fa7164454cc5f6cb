//! Event channel session
//!
//! Drives the authenticate → subscribe → receive-events handshake over a
//! persistent duplex channel. The state machine is explicit, finite and
//! deterministic; the channel wrapper turns decoded frames into state
//! transitions and a list of effects for the caller to run.

pub mod channel;
pub mod events;
pub mod machine;

pub use channel::{ChannelSession, Effect, Effects, EventChannel, MAX_EFFECTS};
pub use events::SessionEvent;
pub use machine::{ErrorKind, SessionState};
