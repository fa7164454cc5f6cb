//! Session state machine definition
//!
//! What the channel sends and accepts is a function of the current state
//! and an event.

use super::events::SessionEvent;

/// Session states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SessionState {
    /// No session on the channel
    #[default]
    Disconnected,
    /// Credentials sent, waiting for the verdict
    AuthRequired,
    /// Credentials accepted
    Authenticated,
    /// Subscribe requests in flight
    Subscribing,
    /// At least one subscription confirmed
    Subscribed,
    /// Session unusable until the channel is reopened
    Error(ErrorKind),
}

/// Types of session errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ErrorKind {
    /// Access token rejected
    AuthRejected,
}

impl SessionState {
    /// Check if state-change events are processed in this state
    pub fn accepts_events(&self) -> bool {
        matches!(self, SessionState::Subscribing | SessionState::Subscribed)
    }

    /// Check if this is an error state
    pub fn is_error(&self) -> bool {
        matches!(self, SessionState::Error(_))
    }

    /// Check if the handshake has completed
    pub fn is_subscribed(&self) -> bool {
        matches!(self, SessionState::Subscribed)
    }

    /// Process an event and return the next state
    pub fn transition(self, event: SessionEvent) -> Self {
        use SessionEvent::*;
        use SessionState::*;

        match (self, event) {
            // Opening or closing the channel always starts over
            (_, ChannelOpened) | (_, ChannelClosed) => Disconnected,

            // Error is absorbing for the rest of the session
            (Error(kind), _) => Error(kind),

            (_, AuthRejected) => Error(ErrorKind::AuthRejected),

            (Disconnected, AuthRequested) | (AuthRequired, AuthRequested) => AuthRequired,
            (Disconnected, AuthAccepted) | (AuthRequired, AuthAccepted) => Authenticated,

            (Authenticated, SubscribeSent) => Subscribing,

            (Subscribing, SubscriptionConfirmed) | (Subscribed, SubscriptionConfirmed) => {
                Subscribed
            }

            // Failures are logged by the caller and the handshake carries on
            (Subscribing, SubscriptionFailed) => Subscribing,

            // Invalid transitions - stay in current state
            _ => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(events: &[SessionEvent]) -> SessionState {
        events
            .iter()
            .fold(SessionState::Disconnected, |s, &e| s.transition(e))
    }

    #[test]
    fn test_happy_path() {
        use SessionEvent::*;
        let state = run(&[
            ChannelOpened,
            AuthRequested,
            AuthAccepted,
            SubscribeSent,
            SubscriptionConfirmed,
        ]);
        assert_eq!(state, SessionState::Subscribed);
        assert!(state.accepts_events());
    }

    #[test]
    fn test_subscription_failure_stays_subscribing() {
        let state = SessionState::Subscribing.transition(SessionEvent::SubscriptionFailed);
        assert_eq!(state, SessionState::Subscribing);
        assert!(state.accepts_events());
    }

    #[test]
    fn test_auth_rejection_is_absorbing() {
        let state = SessionState::AuthRequired.transition(SessionEvent::AuthRejected);
        assert_eq!(state, SessionState::Error(ErrorKind::AuthRejected));
        assert!(state.is_error());

        assert_eq!(state.transition(SessionEvent::AuthRequested), state);
        assert_eq!(state.transition(SessionEvent::AuthAccepted), state);
        assert!(!state.accepts_events());
    }

    #[test]
    fn test_close_resets_every_state() {
        for state in [
            SessionState::AuthRequired,
            SessionState::Authenticated,
            SessionState::Subscribing,
            SessionState::Subscribed,
            SessionState::Error(ErrorKind::AuthRejected),
        ] {
            assert_eq!(
                state.transition(SessionEvent::ChannelClosed),
                SessionState::Disconnected
            );
        }
    }

    #[test]
    fn test_out_of_order_frames_are_ignored() {
        assert_eq!(
            SessionState::Disconnected.transition(SessionEvent::SubscribeSent),
            SessionState::Disconnected
        );
        assert_eq!(
            SessionState::Subscribed.transition(SessionEvent::AuthAccepted),
            SessionState::Subscribed
        );
        assert_eq!(
            SessionState::Authenticated.transition(SessionEvent::SubscriptionConfirmed),
            SessionState::Authenticated
        );
    }
}
