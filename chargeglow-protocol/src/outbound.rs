//! Device → server messages

use alloc::string::String;
use core::fmt;

use serde::Serialize;

/// Trigger platform used for every subscription
pub const TRIGGER_PLATFORM_STATE: &str = "state";

/// Errors that can occur while encoding an outbound message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncodeError {
    /// Serializer rejected the message
    Serialize,
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodeError::Serialize => write!(f, "failed to serialize message"),
        }
    }
}

/// Trigger description inside a `subscribe_trigger` request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Trigger<'a> {
    pub platform: &'static str,
    pub entity_id: &'a str,
}

/// Messages from the device to the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboundMessage<'a> {
    /// Answer to `auth_required`
    Auth { access_token: &'a str },
    /// Subscribe to state changes of one entity
    SubscribeTrigger { id: u32, trigger: Trigger<'a> },
}

impl<'a> OutboundMessage<'a> {
    /// Build an authentication message
    pub fn auth(access_token: &'a str) -> Self {
        OutboundMessage::Auth { access_token }
    }

    /// Build a state-trigger subscription for `entity_id`
    pub fn subscribe_state(id: u32, entity_id: &'a str) -> Self {
        OutboundMessage::SubscribeTrigger {
            id,
            trigger: Trigger {
                platform: TRIGGER_PLATFORM_STATE,
                entity_id,
            },
        }
    }

    /// Correlation id, if this message carries one
    pub fn id(&self) -> Option<u32> {
        match self {
            OutboundMessage::Auth { .. } => None,
            OutboundMessage::SubscribeTrigger { id, .. } => Some(*id),
        }
    }

    /// Encode this message as JSON text
    pub fn encode(&self) -> Result<String, EncodeError> {
        serde_json::to_string(self).map_err(|_| EncodeError::Serialize)
    }
}
