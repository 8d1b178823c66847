//! In-memory line source for testing.

use async_trait::async_trait;
use std::collections::VecDeque;

use crate::error::StreamError;
use crate::traits::LineSource;

/// Line source that replays a fixed list of lines.
///
/// After the lines run out it returns the configured error once (if any),
/// then reports end of stream.
#[derive(Debug, Clone, Default)]
pub struct MockLineSource {
    lines: VecDeque<String>,
    error: Option<StreamError>,
}

impl MockLineSource {
    /// Create a source that yields `lines` and then ends.
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            error: None,
        }
    }

    /// Fail with `error` instead of ending cleanly.
    pub fn with_error(mut self, error: StreamError) -> Self {
        self.error = Some(error);
        self
    }

    /// Number of lines not read yet.
    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

#[async_trait]
impl LineSource for MockLineSource {
    async fn next_line(&mut self) -> Result<Option<String>, StreamError> {
        if let Some(line) = self.lines.pop_front() {
            return Ok(Some(line));
        }
        match self.error.take() {
            Some(err) => Err(err),
            None => Ok(None),
        }
    }
}
