//! Event channel protocol
//!
//! This crate defines the JSON messages exchanged between the status matrix
//! and the home automation server over a persistent duplex channel
//! (a websocket in practice). It knows nothing about sessions or state:
//! it only turns text into typed messages and back.
//!
//! # Protocol Overview
//!
//! Every message is a single JSON object discriminated by its `type` field:
//! ```text
//! server → device   auth_required | auth_ok | auth_invalid | event | result
//! device → server   auth | subscribe_trigger
//! ```
//!
//! The handshake is always `auth_required → auth → auth_ok`, after which the
//! device subscribes to one state trigger per watched entity and then only
//! receives `result` acknowledgements and `event` notifications.

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

pub mod inbound;
pub mod outbound;

pub use inbound::{decode, DecodeError, InboundMessage, StateChange, MAX_INBOUND_LEN};
pub use outbound::{EncodeError, OutboundMessage, Trigger, TRIGGER_PLATFORM_STATE};
