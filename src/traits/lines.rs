//! Line-oriented text source trait.

use async_trait::async_trait;

use crate::error::StreamError;

/// Asynchronous "read next line" source consumed by
/// [`StreamParser`](crate::sse::StreamParser).
///
/// Lines are returned without their terminator. `Ok(None)` means the
/// source has ended; after that every call returns `Ok(None)` again.
#[async_trait]
pub trait LineSource: Send {
    /// Read the next line, waiting for more input if necessary.
    async fn next_line(&mut self) -> Result<Option<String>, StreamError>;
}

#[async_trait]
impl<L: LineSource + ?Sized> LineSource for Box<L> {
    async fn next_line(&mut self) -> Result<Option<String>, StreamError> {
        (**self).next_line().await
    }
}
