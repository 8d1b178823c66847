//! Block framing: turns a line source into a sequence of events.

use futures::Stream;

use super::builder::EventBuilder;
use super::event::Event;
use crate::error::StreamError;
use crate::traits::LineSource;

/// Reads blank-line-delimited blocks from a [`LineSource`] and yields one
/// [`Event`] per block.
///
/// The parser owns its source exclusively; dropping the parser drops the
/// source (and, for an HTTP body, the connection behind it).
///
/// # Example
///
/// ```ignore
/// use resumable_sse::adapters::mock::MockLineSource;
/// use resumable_sse::sse::StreamParser;
///
/// let source = MockLineSource::new(["event: update", "data: hello", ""]);
/// let mut parser = StreamParser::new("http://localhost/stream", source);
/// let event = parser.read_event().await?;
/// assert_eq!(event.event_type(), "update");
/// ```
pub struct StreamParser<L> {
    origin: String,
    source: L,
}

impl<L: LineSource> StreamParser<L> {
    /// Create a parser reading from `source`; events are tagged with `origin`.
    pub fn new(origin: impl Into<String>, source: L) -> Self {
        Self {
            origin: origin.into(),
            source,
        }
    }

    /// URI events from this parser are tagged with.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Read lines until a block is complete and return its event.
    ///
    /// A blank line that closes a block with no lines in it is skipped.
    /// If the source ends before the block is closed, the partial event is
    /// discarded and [`StreamError::UnexpectedEof`] is returned. Calling
    /// again continues from the current position of the source.
    pub async fn read_event(&mut self) -> Result<Event, StreamError> {
        let mut builder = EventBuilder::new(self.origin.as_str());

        loop {
            match self.source.next_line().await? {
                None => {
                    if !builder.is_empty() {
                        tracing::debug!(origin = %self.origin, "Discarding partial event at end of stream");
                    }
                    return Err(StreamError::UnexpectedEof);
                }
                Some(line) if line.is_empty() => {
                    if !builder.is_empty() {
                        return Ok(builder.make_event());
                    }
                }
                Some(line) => builder.add_line(&line),
            }
        }
    }

    /// Give back the underlying source.
    pub fn into_source(self) -> L {
        self.source
    }

    /// Turn the parser into a lazy stream of events.
    ///
    /// The stream ends after yielding the first error.
    pub fn into_stream(self) -> impl Stream<Item = Result<Event, StreamError>> + Send
    where
        L: 'static,
    {
        futures::stream::unfold(Some(self), |state| async move {
            let Some(mut parser) = state else {
                return None;
            };
            match parser.read_event().await {
                Ok(event) => Some((Ok(event), Some(parser))),
                Err(e) => Some((Err(e), None)),
            }
        })
    }
}
