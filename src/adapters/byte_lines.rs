//! Byte-chunk stream to line source adapter.
//!
//! HTTP bodies arrive in arbitrarily sized chunks that can split a line, or
//! even a multi-byte UTF-8 sequence, anywhere. [`ByteLineReader`] buffers
//! raw bytes and only decodes complete lines.

use async_trait::async_trait;
use bytes::{Buf, BytesMut};
use futures_util::StreamExt;

use crate::error::StreamError;
use crate::traits::{ByteStream, LineSource};

const LF: u8 = b'\n';
const CR: u8 = b'\r';
const BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// [`LineSource`] over a response body.
///
/// Lines end at `\n`; one trailing `\r` is dropped so CRLF streams read the
/// same as LF streams. A UTF-8 byte-order mark at the start of the stream
/// is skipped.
pub struct ByteLineReader {
    body: ByteStream,
    buffer: BytesMut,
    /// Bytes at the front of `buffer` already known to hold no `\n`.
    scanned: usize,
    started: bool,
    finished: bool,
}

impl ByteLineReader {
    /// Wrap a response body.
    pub fn new(body: ByteStream) -> Self {
        Self {
            body,
            buffer: BytesMut::new(),
            scanned: 0,
            started: false,
            finished: false,
        }
    }

    /// Take one complete line out of the buffer, if there is one.
    fn take_line(&mut self) -> Result<Option<String>, StreamError> {
        let Some(offset) = self.buffer[self.scanned..].iter().position(|&b| b == LF) else {
            self.scanned = self.buffer.len();
            return Ok(None);
        };

        let newline_pos = self.scanned + offset;
        self.scanned = 0;
        let mut line = self.buffer.split_to(newline_pos + 1);
        line.truncate(newline_pos);
        if line.last() == Some(&CR) {
            line.truncate(newline_pos - 1);
        }
        decode(&line).map(Some)
    }

    fn skip_bom(&mut self) {
        if self.started {
            return;
        }
        if self.buffer.len() < BOM.len() && BOM.starts_with(&self.buffer) && !self.finished {
            // Not enough bytes yet to tell.
            return;
        }
        if self.buffer.starts_with(BOM) {
            self.buffer.advance(BOM.len());
        }
        self.started = true;
    }
}

fn decode(bytes: &[u8]) -> Result<String, StreamError> {
    Ok(std::str::from_utf8(bytes)?.to_string())
}

#[async_trait]
impl LineSource for ByteLineReader {
    async fn next_line(&mut self) -> Result<Option<String>, StreamError> {
        loop {
            self.skip_bom();
            if self.started {
                if let Some(line) = self.take_line()? {
                    return Ok(Some(line));
                }
            }

            if self.finished {
                if self.buffer.is_empty() {
                    return Ok(None);
                }
                // Unterminated tail.
                let mut tail = self.buffer.split();
                self.scanned = 0;
                if tail.last() == Some(&CR) {
                    tail.truncate(tail.len() - 1);
                }
                return decode(&tail).map(Some);
            }

            match self.body.next().await {
                Some(Ok(chunk)) => self.buffer.extend_from_slice(&chunk),
                Some(Err(e)) => return Err(StreamError::Transport(e)),
                None => self.finished = true,
            }
        }
    }
}
