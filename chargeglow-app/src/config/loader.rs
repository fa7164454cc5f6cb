//! TOML configuration loader
//!
//! Parses the device configuration and rejects settings the control loop
//! cannot run with. Missing sections and fields take their defaults.
//!
//! ```toml
//! [channel]
//! access_token = "..."
//! handshake_timeout_ms = 10000
//!
//! [slots]
//! slot_1 = "sensor.garage_charger_status"
//! slot_2 = "sensor.driveway_charger_status"
//!
//! [display]
//! brightness = 20
//! tick_interval_ms = 100
//!
//! [alert]
//! beeps = 2
//! ```

use core::fmt;

use chargeglow_core::config::DeviceConfig;
use chargeglow_core::sensor::SlotId;

/// Maximum TOML config size
pub const MAX_CONFIG_SIZE: usize = 8192;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Text exceeds [`MAX_CONFIG_SIZE`]
    TooLarge,
    /// TOML syntax error or a value of the wrong type (byte offset if known)
    Parse { offset: Option<usize> },
    /// A slot has no entity id
    EmptyEntity(SlotId),
    /// Both slots are bound to the same entity
    DuplicateEntity,
    /// Tick interval of zero
    ZeroTickInterval,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::TooLarge => write!(f, "config exceeds {} bytes", MAX_CONFIG_SIZE),
            ConfigError::Parse { offset: Some(at) } => write!(f, "invalid config at byte {}", at),
            ConfigError::Parse { offset: None } => write!(f, "invalid config"),
            ConfigError::EmptyEntity(slot) => {
                write!(f, "slot_{} has no entity id", slot.number())
            }
            ConfigError::DuplicateEntity => write!(f, "slot_1 and slot_2 name the same entity"),
            ConfigError::ZeroTickInterval => write!(f, "tick_interval_ms must be nonzero"),
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse {
            offset: e.span().map(|span| span.start),
        }
    }
}

/// Parse and validate a TOML configuration
pub fn load_config(text: &str) -> Result<DeviceConfig, ConfigError> {
    if text.len() > MAX_CONFIG_SIZE {
        return Err(ConfigError::TooLarge);
    }
    let config: DeviceConfig = toml::from_str(text)?;
    validate(&config)?;
    Ok(config)
}

/// Check a configuration for settings the loop cannot run with
pub fn validate(config: &DeviceConfig) -> Result<(), ConfigError> {
    for slot in SlotId::ALL {
        if config.slots.entity(slot).trim().is_empty() {
            return Err(ConfigError::EmptyEntity(slot));
        }
    }
    if config.slots.entity(SlotId::One) == config.slots.entity(SlotId::Two) {
        return Err(ConfigError::DuplicateEntity);
    }
    if config.display.tick_interval_ms == 0 {
        return Err(ConfigError::ZeroTickInterval);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chargeglow_core::traits::BeepPattern;

    const FULL: &str = r#"
[channel]
access_token = "abc.def"
handshake_timeout_ms = 5000

[slots]
slot_1 = "sensor.left_status"
slot_2 = "sensor.right_status"

[display]
brightness = 40
tick_interval_ms = 250
highlight_step = 30

[alert]
beeps = 3
duration_ms = 80
gap_ms = 40
"#;

    #[test]
    fn test_full_config() {
        let config = load_config(FULL).unwrap();
        assert_eq!(config.channel.access_token.as_str(), "abc.def");
        assert_eq!(config.channel.handshake_timeout_ms, Some(5000));
        assert_eq!(config.slots.entity(SlotId::Two), "sensor.right_status");
        assert_eq!(config.display.brightness, 40);
        assert_eq!(config.display.tick_interval_ms, 250);
        assert_eq!(config.display.highlight_step, 30);
        assert_eq!(
            config.alert,
            BeepPattern {
                beeps: 3,
                duration_ms: 80,
                gap_ms: 40
            }
        );
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = load_config("").unwrap();
        assert_eq!(config, DeviceConfig::default());
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config = load_config("[display]\nbrightness = 255\n").unwrap();
        assert_eq!(config.display.brightness, 255);
        assert_eq!(config.display.tick_interval_ms, 100);
        assert_eq!(config.alert, BeepPattern::default());
    }

    #[test]
    fn test_syntax_error() {
        assert!(matches!(
            load_config("[display\nbrightness = 1"),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_out_of_range_brightness() {
        assert!(matches!(
            load_config("[display]\nbrightness = 300\n"),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_rejects_empty_entity() {
        assert_eq!(
            load_config("[slots]\nslot_2 = \"  \"\n"),
            Err(ConfigError::EmptyEntity(SlotId::Two))
        );
    }

    #[test]
    fn test_rejects_duplicate_entity() {
        assert_eq!(
            load_config("[slots]\nslot_1 = \"sensor.x\"\nslot_2 = \"sensor.x\"\n"),
            Err(ConfigError::DuplicateEntity)
        );
    }

    #[test]
    fn test_rejects_zero_tick() {
        assert_eq!(
            load_config("[display]\ntick_interval_ms = 0\n"),
            Err(ConfigError::ZeroTickInterval)
        );
    }

    #[test]
    fn test_too_large() {
        let text = "#".repeat(MAX_CONFIG_SIZE + 1);
        assert_eq!(load_config(&text), Err(ConfigError::TooLarge));
    }
}
