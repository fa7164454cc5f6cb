//! Server → device messages
//!
//! Decoding is two-step: the text is first parsed into a permissive
//! envelope where every field is optional, then the `type` discriminator
//! decides which fields are required. Fields the device does not care
//! about (`ha_version`, `context`, `from_state`, ...) are ignored.

use alloc::string::String;
use core::fmt;

use heapless::String as HString;
use serde::Deserialize;

/// Largest inbound text accepted, in bytes
pub const MAX_INBOUND_LEN: usize = 4096;

/// Longest unknown discriminator kept for diagnostics
pub const MAX_KIND_LEN: usize = 24;

const TYPE_AUTH_REQUIRED: &str = "auth_required";
const TYPE_AUTH_OK: &str = "auth_ok";
const TYPE_AUTH_INVALID: &str = "auth_invalid";
const TYPE_EVENT: &str = "event";
const TYPE_RESULT: &str = "result";

/// Errors that can occur while decoding an inbound message
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// Text exceeds [`MAX_INBOUND_LEN`]
    TooLarge,
    /// Not a JSON object (position of the first offending byte)
    Malformed { line: usize, column: usize },
    /// Object has no string `type` field
    MissingType,
    /// `type` names a message the device does not handle
    UnknownType(HString<MAX_KIND_LEN>),
    /// A field required by this message type is absent
    MissingField(&'static str),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::TooLarge => write!(f, "message exceeds {} bytes", MAX_INBOUND_LEN),
            DecodeError::Malformed { line, column } => {
                write!(f, "malformed JSON at {}:{}", line, column)
            }
            DecodeError::MissingType => write!(f, "missing message type"),
            DecodeError::UnknownType(kind) => write!(f, "unknown message type '{}'", kind),
            DecodeError::MissingField(field) => write!(f, "missing field {}", field),
        }
    }
}

/// A state change carried by an `event` message
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StateChange {
    /// `event.variables.trigger.entity_id`
    pub entity_id: String,
    /// `event.variables.trigger.to_state.state`, absent when the entity was removed
    pub state: Option<String>,
}

/// Messages from the server to the device
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InboundMessage {
    /// Server greets a fresh connection and wants a token
    AuthRequired,
    /// Token accepted
    AuthOk,
    /// Token rejected
    AuthInvalid { message: Option<String> },
    /// A subscribed trigger fired
    Event(StateChange),
    /// Acknowledgement of a request carrying `id`
    Result {
        id: u32,
        success: bool,
        error_message: Option<String>,
    },
}

impl InboundMessage {
    /// The wire discriminator of this message
    pub fn kind(&self) -> &'static str {
        match self {
            InboundMessage::AuthRequired => TYPE_AUTH_REQUIRED,
            InboundMessage::AuthOk => TYPE_AUTH_OK,
            InboundMessage::AuthInvalid { .. } => TYPE_AUTH_INVALID,
            InboundMessage::Event(_) => TYPE_EVENT,
            InboundMessage::Result { .. } => TYPE_RESULT,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    kind: Option<String>,
    id: Option<u32>,
    success: Option<bool>,
    message: Option<String>,
    error: Option<ErrorBody>,
    event: Option<EventBody>,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct EventBody {
    variables: Option<Variables>,
}

#[derive(Debug, Default, Deserialize)]
struct Variables {
    trigger: Option<TriggerBody>,
}

#[derive(Debug, Default, Deserialize)]
struct TriggerBody {
    entity_id: Option<String>,
    to_state: Option<StateBody>,
}

#[derive(Debug, Default, Deserialize)]
struct StateBody {
    state: Option<String>,
}

/// Decode one inbound text message
pub fn decode(text: &str) -> Result<InboundMessage, DecodeError> {
    if text.len() > MAX_INBOUND_LEN {
        return Err(DecodeError::TooLarge);
    }

    let envelope: Envelope = serde_json::from_str(text).map_err(|e| DecodeError::Malformed {
        line: e.line(),
        column: e.column(),
    })?;

    let kind = envelope.kind.as_deref().ok_or(DecodeError::MissingType)?;
    match kind {
        TYPE_AUTH_REQUIRED => Ok(InboundMessage::AuthRequired),
        TYPE_AUTH_OK => Ok(InboundMessage::AuthOk),
        TYPE_AUTH_INVALID => Ok(InboundMessage::AuthInvalid {
            message: envelope.message,
        }),
        TYPE_EVENT => {
            let trigger = envelope
                .event
                .and_then(|e| e.variables)
                .and_then(|v| v.trigger)
                .ok_or(DecodeError::MissingField("event.variables.trigger"))?;
            let entity_id = trigger
                .entity_id
                .ok_or(DecodeError::MissingField("trigger.entity_id"))?;
            Ok(InboundMessage::Event(StateChange {
                entity_id,
                state: trigger.to_state.and_then(|s| s.state),
            }))
        }
        TYPE_RESULT => Ok(InboundMessage::Result {
            id: envelope.id.ok_or(DecodeError::MissingField("id"))?,
            success: envelope.success.ok_or(DecodeError::MissingField("success"))?,
            error_message: envelope.error.and_then(|e| e.message),
        }),
        other => Err(DecodeError::UnknownType(truncated(other))),
    }
}

fn truncated(s: &str) -> HString<MAX_KIND_LEN> {
    let mut out = HString::new();
    for c in s.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}
