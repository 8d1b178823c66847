//! Errors surfaced to callers of the streaming client.

use thiserror::Error;

use super::StreamError;
use crate::traits::HttpError;

/// Terminal failures of [`StreamingClient`](crate::client::StreamingClient).
///
/// These are only returned after the relevant retry budget has been
/// spent, or when the caller cancelled.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClientError {
    /// Every connection attempt failed.
    #[error("failed to connect after {attempts} attempt(s): {source}")]
    Connect {
        attempts: u32,
        #[source]
        source: HttpError,
    },

    /// Every read attempt failed, each followed by a reconnect.
    #[error("failed to read event after {attempts} attempt(s): {source}")]
    Read {
        attempts: u32,
        #[source]
        source: StreamError,
    },

    /// The operation was cancelled through the client's cancel token.
    #[error("operation cancelled")]
    Cancelled,
}

impl ClientError {
    /// Whether calling the same operation again could succeed.
    ///
    /// Exhausted budgets are retryable at the application level (the server
    /// may come back); client-side mistakes such as a bad URL are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Connect { source, .. } => !matches!(
                source,
                HttpError::InvalidUrl(_)
                    | HttpError::ServerError {
                        status: 400..=499,
                        ..
                    }
            ),
            ClientError::Read { .. } => true,
            ClientError::Cancelled => false,
        }
    }

    /// Short machine-readable code for logs.
    pub fn error_code(&self) -> &'static str {
        match self {
            ClientError::Connect { .. } => "CLIENT_CONNECT",
            ClientError::Read { .. } => "CLIENT_READ",
            ClientError::Cancelled => "CLIENT_CANCELLED",
        }
    }
}
