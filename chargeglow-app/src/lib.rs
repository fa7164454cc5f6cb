//! Control loop for the Chargeglow status matrix
//!
//! Ties the event channel, sensor slots, renderer and diagnostics together
//! behind one [`Controller`]. Everything here is board-agnostic: the strip,
//! buzzer and channel transport are passed in through the core traits, and
//! the HTTP and serial front-ends are pure functions over request text.
//!
//! # Loop
//!
//! ```text
//! transport.poll() ──► EventChannel ──► SensorSlots ──┐
//!                          │ effects                  │
//!                          ▼                          ▼
//!                  transport.send / buzzer     tick ──► RenderEngine ──► LedStrip
//! ```

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

pub mod config;
pub mod controller;
pub mod http;
pub mod serial;
pub mod status;

pub use config::{load_config, ConfigError};
pub use controller::Controller;
pub use http::{route, Response};
pub use serial::{execute, Command, CommandError};
pub use status::StatusSnapshot;
