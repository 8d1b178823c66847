//! Decoded stream event.

use serde::Serialize;

/// Event type used when the server does not name one.
pub const DEFAULT_EVENT_TYPE: &str = "message";

/// One event decoded from a blank-line-delimited block of an SSE stream.
///
/// Events are immutable once built; fields are read through accessors.
/// `data` and `comment` distinguish "absent" (`None`) from "present but
/// empty" (`Some("")`), as does `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    origin: String,
    #[serde(rename = "event")]
    event_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    retry: Option<u64>,
}

impl Event {
    pub(crate) fn new(
        origin: String,
        event_type: String,
        id: Option<String>,
        data: Option<String>,
        comment: Option<String>,
        retry: Option<u64>,
    ) -> Self {
        Self {
            origin,
            event_type,
            id,
            data,
            comment,
            retry,
        }
    }

    /// URI of the stream this event was read from.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Event type, `"message"` unless the server sent an `event` field.
    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// All `data` lines of the block joined with `\n`.
    pub fn data(&self) -> Option<&str> {
        self.data.as_deref()
    }

    /// All comment lines of the block (without the leading `:`) joined with `\n`.
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Reconnection delay requested by the server, in milliseconds.
    pub fn retry(&self) -> Option<u64> {
        self.retry
    }
}
