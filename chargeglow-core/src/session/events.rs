//! Events that trigger session transitions

/// Events that can trigger session transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SessionEvent {
    // Transport events
    /// Channel connected
    ChannelOpened,
    /// Channel closed or lost
    ChannelClosed,

    // Authentication
    /// Server asked for credentials
    AuthRequested,
    /// Server accepted the access token
    AuthAccepted,
    /// Server rejected the access token
    AuthRejected,

    // Subscription
    /// Subscribe requests were sent
    SubscribeSent,
    /// Server confirmed a subscription
    SubscriptionConfirmed,
    /// Server reported a failed subscription
    SubscriptionFailed,
}

impl SessionEvent {
    /// Check if this event comes from the transport rather than a frame
    pub fn is_transport_event(&self) -> bool {
        matches!(self, SessionEvent::ChannelOpened | SessionEvent::ChannelClosed)
    }
}
