//! Configuration types
//!
//! Board-agnostic configuration structures, deserialized from TOML by the
//! application.

pub mod types;

pub use types::*;
