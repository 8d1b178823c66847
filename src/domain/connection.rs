//! Connection state management.
//!
//! This module provides [`ConnectionState`], the lifecycle of one streaming
//! connection, and [`ResumeState`], the values carried across reconnects
//! (resumption cursor and current retry delay). Both are owned by a single
//! client instance; nothing here is shared between clients.

use std::time::Duration;

use crate::config::ReconnectPolicy;
use crate::sse::Event;

/// Lifecycle of the streaming connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    /// No open stream.
    #[default]
    Disconnected,
    /// A connection attempt is in flight.
    Connecting,
    /// A stream is open and events can be read.
    Connected,
    /// The read retry budget was exhausted.
    Failed,
}

impl ConnectionState {
    pub fn is_connected(self) -> bool {
        matches!(self, ConnectionState::Connected)
    }

    /// Short label for logs and status output.
    pub fn label(self) -> &'static str {
        match self {
            ConnectionState::Disconnected => "disconnected",
            ConnectionState::Connecting => "connecting",
            ConnectionState::Connected => "connected",
            ConnectionState::Failed => "failed",
        }
    }
}

/// State carried from one connection to the next.
#[derive(Debug, Clone, PartialEq)]
pub struct ResumeState {
    last_event_id: Option<String>,
    retry_delay: Duration,
}

impl ResumeState {
    /// Start with an optional cursor and the policy's initial delay.
    pub fn new(last_event_id: Option<String>, policy: &ReconnectPolicy) -> Self {
        Self {
            last_event_id: last_event_id.filter(|id| !id.is_empty()),
            retry_delay: policy.initial_delay,
        }
    }

    /// Id to send as `Last-Event-ID`, if any.
    pub fn last_event_id(&self) -> Option<&str> {
        self.last_event_id.as_deref()
    }

    /// Base delay before reconnecting.
    pub fn retry_delay(&self) -> Duration {
        self.retry_delay
    }

    /// Record a delivered event.
    ///
    /// A `retry` value replaces the base delay. A non-empty `id` becomes the
    /// cursor; an explicitly empty `id` clears it. The cursor is updated
    /// last.
    pub fn observe(&mut self, event: &Event) {
        if let Some(millis) = event.retry() {
            self.retry_delay = Duration::from_millis(millis);
        }
        match event.id() {
            Some("") => self.last_event_id = None,
            Some(id) => self.last_event_id = Some(id.to_string()),
            None => {}
        }
    }
}
