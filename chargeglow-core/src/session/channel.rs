//! Event channel protocol handler
//!
//! Owns the session state and message-id counter. Each inbound text frame
//! is decoded, applied to the state machine and the sensor slots, and
//! answered with a short list of [`Effect`]s: frames to send and alerts to
//! play. The handler itself performs no I/O.

use alloc::string::String;

use chargeglow_protocol::{decode, InboundMessage, OutboundMessage, StateChange};
use heapless::{String as HString, Vec};

use super::events::SessionEvent;
use super::machine::SessionState;
use crate::config::{DeviceConfig, SlotConfig, MAX_TOKEN_LEN};
use crate::diag::LogRing;
use crate::sensor::{SensorSlots, SlotId};

/// Most effects a single frame can produce
///
/// `auth_ok` queues one subscribe per slot; every other frame queues at
/// most one effect.
pub const MAX_EFFECTS: usize = SlotId::ALL.len();

/// Action requested by the protocol handler
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Effect {
    /// Send this text frame on the channel
    Send(String),
    /// A slot changed, play the alert
    Alert(SlotId),
}

/// Effects produced by one frame, in order
pub type Effects = Vec<Effect, MAX_EFFECTS>;

/// Message-id counter and connectivity flag
///
/// The id counter is never reset, so ids stay unique across reconnects.
/// Once `u32::MAX` has been handed out no further ids are issued.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelSession {
    next_id: Option<u32>,
    connected: bool,
}

impl Default for ChannelSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChannelSession {
    pub const fn new() -> Self {
        Self {
            next_id: Some(1),
            connected: false,
        }
    }

    /// Take the next message id, `None` once the id space is used up
    pub fn issue_id(&mut self) -> Option<u32> {
        let id = self.next_id?;
        self.next_id = id.checked_add(1);
        Some(id)
    }

    /// Most recently issued id
    pub fn last_id(&self) -> Option<u32> {
        match self.next_id {
            Some(next) => next.checked_sub(1).filter(|&id| id > 0),
            None => Some(u32::MAX),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }
}

/// Protocol handler for one persistent event channel
#[derive(Debug, Clone)]
pub struct EventChannel {
    token: HString<MAX_TOKEN_LEN>,
    slots: SlotConfig,
    handshake_timeout_ms: Option<u32>,
    session: ChannelSession,
    /// Subscription ids of this session still awaiting a `result`
    pending: Vec<u32, MAX_EFFECTS>,
    state: SessionState,
    opened_at_ms: Option<u64>,
    stall_reported: bool,
}

impl EventChannel {
    /// Create a handler bound to the configured token and entities
    pub fn new(config: &DeviceConfig) -> Self {
        Self {
            token: config.channel.access_token.clone(),
            slots: config.slots.clone(),
            handshake_timeout_ms: config.channel.handshake_timeout_ms,
            session: ChannelSession::new(),
            pending: Vec::new(),
            state: SessionState::Disconnected,
            opened_at_ms: None,
            stall_reported: false,
        }
    }

    /// Current session state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Id counter and connectivity
    pub fn session(&self) -> &ChannelSession {
        &self.session
    }

    /// Whether the channel is open
    pub fn is_connected(&self) -> bool {
        self.session.connected
    }

    /// Entity bound to a slot
    pub fn entity(&self, slot: SlotId) -> &str {
        self.slots.entity(slot)
    }

    fn apply(&mut self, event: SessionEvent) {
        self.state = self.state.transition(event);
    }

    /// Channel connected; a new session starts
    pub fn on_opened(&mut self, now_ms: u64, log: &mut LogRing) {
        log.info(format_args!("Event channel opened"));
        self.apply(SessionEvent::ChannelOpened);
        self.session.connected = true;
        self.opened_at_ms = Some(now_ms);
        self.stall_reported = false;
        self.pending.clear();
    }

    /// Channel closed; the session ends
    pub fn on_closed(&mut self, log: &mut LogRing) {
        log.info(format_args!("Event channel closed"));
        self.apply(SessionEvent::ChannelClosed);
        self.session.connected = false;
        self.opened_at_ms = None;
        self.pending.clear();
    }

    /// Warn once per session when the handshake overruns the configured limit
    pub fn check_handshake(&mut self, now_ms: u64, log: &mut LogRing) {
        let (Some(limit), Some(opened)) = (self.handshake_timeout_ms, self.opened_at_ms) else {
            return;
        };
        if self.stall_reported || self.state.is_subscribed() || self.state.is_error() {
            return;
        }
        if now_ms.saturating_sub(opened) >= limit as u64 {
            log.warn(format_args!(
                "Handshake not complete after {} ms ({:?})",
                limit, self.state
            ));
            self.stall_reported = true;
        }
    }

    /// Process one inbound text frame
    pub fn handle_text(
        &mut self,
        text: &str,
        slots: &mut SensorSlots,
        log: &mut LogRing,
    ) -> Effects {
        let mut effects = Effects::new();

        let message = match decode(text) {
            Ok(message) => message,
            Err(e) => {
                log.error(format_args!("Discarding frame: {}", e));
                return effects;
            }
        };

        match message {
            InboundMessage::AuthRequired => self.on_auth_required(&mut effects, log),
            InboundMessage::AuthOk => self.on_auth_ok(&mut effects, log),
            InboundMessage::AuthInvalid { message } => {
                log.error(format_args!(
                    "Auth invalid: {}",
                    message.as_deref().unwrap_or("check the access token")
                ));
                self.apply(SessionEvent::AuthRejected);
            }
            InboundMessage::Event(change) => self.on_state_change(change, slots, &mut effects, log),
            InboundMessage::Result {
                id,
                success,
                error_message,
            } => self.on_result(id, success, error_message.as_deref(), log),
        }

        effects
    }

    fn on_auth_required(&mut self, effects: &mut Effects, log: &mut LogRing) {
        let next = self.state.transition(SessionEvent::AuthRequested);
        if next != SessionState::AuthRequired {
            log.warn(format_args!("Ignoring auth_required in {:?}", self.state));
            return;
        }
        self.state = next;
        log.info(format_args!("Auth required, sending token"));
        queue(effects, &OutboundMessage::auth(&self.token), log);
    }

    fn on_auth_ok(&mut self, effects: &mut Effects, log: &mut LogRing) {
        let next = self.state.transition(SessionEvent::AuthAccepted);
        if next != SessionState::Authenticated {
            log.warn(format_args!("Ignoring auth_ok in {:?}", self.state));
            return;
        }
        self.state = next;
        log.info(format_args!("Auth OK"));

        self.pending.clear();
        for slot in SlotId::ALL {
            let Some(id) = self.session.issue_id() else {
                log.error(format_args!("Message ids exhausted, cannot subscribe"));
                break;
            };
            let entity = self.slots.entity(slot);
            if queue(effects, &OutboundMessage::subscribe_state(id, entity), log) {
                log.info(format_args!("Subscribing to {} (id {})", entity, id));
                // Capacity matches the number of slots
                let _ = self.pending.push(id);
            }
        }
        if !self.pending.is_empty() {
            self.apply(SessionEvent::SubscribeSent);
        }
    }

    fn on_result(&mut self, id: u32, success: bool, error: Option<&str>, log: &mut LogRing) {
        let Some(index) = self.pending.iter().position(|&pending| pending == id) else {
            log.warn(format_args!("Result for unknown id {}, ignored", id));
            return;
        };
        self.pending.swap_remove(index);

        if success {
            log.info(format_args!("Subscription successful for ID: {}", id));
            self.apply(SessionEvent::SubscriptionConfirmed);
        } else {
            log.error(format_args!(
                "Subscription failed for ID {}: {}",
                id,
                error.unwrap_or("no reason given")
            ));
            self.apply(SessionEvent::SubscriptionFailed);
        }
    }

    fn on_state_change(
        &mut self,
        change: StateChange,
        slots: &mut SensorSlots,
        effects: &mut Effects,
        log: &mut LogRing,
    ) {
        if !self.state.accepts_events() {
            log.warn(format_args!(
                "Event for {} before subscribing, ignored",
                change.entity_id
            ));
            return;
        }

        let Some(slot) = SlotId::ALL
            .into_iter()
            .find(|&slot| self.entity(slot) == change.entity_id)
        else {
            log.debug(format_args!("Event for unbound entity {}", change.entity_id));
            return;
        };

        let Some(state) = change.state else {
            log.warn(format_args!(
                "Event for {} carries no state, ignored",
                change.entity_id
            ));
            return;
        };

        slots.set(slot, &state);
        log.info(format_args!(
            "Sensor {} state updated: {}",
            slot.number(),
            slots.get(slot)
        ));
        push(effects, Effect::Alert(slot), log);
    }
}

fn push(effects: &mut Effects, effect: Effect, log: &mut LogRing) -> bool {
    if effects.push(effect).is_err() {
        log.error(format_args!("Effect queue full, effect dropped"));
        return false;
    }
    true
}

fn queue(effects: &mut Effects, message: &OutboundMessage<'_>, log: &mut LogRing) -> bool {
    match message.encode() {
        Ok(text) => push(effects, Effect::Send(text), log),
        Err(e) => {
            log.error(format_args!("Cannot encode frame: {}", e));
            false
        }
    }
}
