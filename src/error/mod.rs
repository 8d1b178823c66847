//! Error handling for the SSE client.
//!
//! Two layers, matching the two places things go wrong:
//!
//! - [`StreamError`]: a single read from an open stream failed (transport
//!   error, invalid UTF-8, or the stream ended mid-event).
//! - [`ClientError`]: what the caller sees once the client has spent its
//!   retry budget, or when the caller cancelled.
//!
//! | Situation | Surfaced as | Retried by the client |
//! |-----------|-------------|-----------------------|
//! | Bad status / network error on connect | `ClientError::Connect` | Yes, without back-off |
//! | Network error while reading | `ClientError::Read` | Yes, after back-off and reconnect |
//! | Stream ended mid-event | `ClientError::Read` | Yes, after back-off and reconnect |
//! | Malformed field line | never an error | - |
//! | Malformed `retry` value | never an error | - |
//! | Cancellation | `ClientError::Cancelled` | No |

mod client;
mod stream;

pub use client::ClientError;
pub use stream::StreamError;

/// Result alias for client operations.
pub type SseResult<T> = std::result::Result<T, ClientError>;
