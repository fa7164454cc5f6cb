//! Board-agnostic core logic for the Chargeglow status matrix
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware and transport traits (buzzer, event channel)
//! - Session state machine for the event channel handshake
//! - Sensor slot storage
//! - Diagnostic log ring
//! - Configuration type definitions

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

pub mod config;
pub mod diag;
pub mod sensor;
pub mod session;
pub mod text;
pub mod traits;
