//! Errors raised while reading events from an open stream.

use thiserror::Error;

use crate::traits::HttpError;

/// Stream-level read failures.
///
/// Every variant is a transient read failure from the client's point of
/// view: the broken connection is dropped and re-established.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StreamError {
    /// The stream ended before the current event block was terminated.
    #[error("unexpected end of stream")]
    UnexpectedEof,

    /// A line of the stream was not valid UTF-8.
    #[error("invalid UTF-8 in stream: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    /// The transport failed while the body was being read.
    #[error("transport error: {0}")]
    Transport(#[from] HttpError),

    /// There is no open stream to read from.
    #[error("not connected")]
    NotConnected,
}

impl StreamError {
    /// True when the stream ended in the middle of an event block.
    pub fn is_framing(&self) -> bool {
        matches!(self, StreamError::UnexpectedEof)
    }

    /// Short machine-readable code for logs.
    pub fn error_code(&self) -> &'static str {
        match self {
            StreamError::UnexpectedEof => "STREAM_EOF",
            StreamError::InvalidUtf8(_) => "STREAM_UTF8",
            StreamError::Transport(_) => "STREAM_TRANSPORT",
            StreamError::NotConnected => "STREAM_NOT_CONNECTED",
        }
    }
}
