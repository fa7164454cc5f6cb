//! Configuration loading

mod loader;

pub use loader::{load_config, validate, ConfigError, MAX_CONFIG_SIZE};
