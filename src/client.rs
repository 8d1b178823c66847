//! Resumable SSE client.
//!
//! [`StreamingClient`] owns one HTTP transport handle and at most one open
//! event stream. It connects with a bounded number of immediate retries,
//! hands the response body to a [`StreamParser`], and on read failures
//! tears the stream down, waits, reconnects with `Last-Event-ID` and tries
//! again.
//!
//! # Example
//!
//! ```ignore
//! use resumable_sse::adapters::ReqwestHttpClient;
//! use resumable_sse::client::StreamingClient;
//! use resumable_sse::config::ClientConfig;
//!
//! let config = ClientConfig::new("https://example.com/events");
//! let http = ReqwestHttpClient::from_config(&config)?;
//! let mut client = StreamingClient::new(http, config);
//!
//! loop {
//!     let event = client.read_event().await?;
//!     println!("{}: {:?}", event.event_type(), event.data());
//! }
//! ```

use futures::Stream;
use std::time::Duration;

use crate::adapters::ByteLineReader;
use crate::cancel::CancelToken;
use crate::config::ClientConfig;
use crate::domain::{ConnectionState, ResumeState};
use crate::error::{ClientError, SseResult, StreamError};
use crate::sse::{Event, StreamParser};
use crate::traits::{Headers, HttpClient, HttpError};

const EVENT_STREAM_MIME: &str = "text/event-stream";

/// Headers the client always sets itself; same-named config headers are dropped.
const PROTOCOL_HEADERS: [&str; 3] = ["Accept", "Cache-Control", "Last-Event-ID"];

/// SSE client with automatic reconnection and resumption.
///
/// Each instance is independent: the resumption cursor and retry delay
/// live in the instance and are only changed by [`read_event`](Self::read_event).
pub struct StreamingClient<C> {
    // Field order is drop order: the open stream goes before the transport.
    parser: Option<StreamParser<ByteLineReader>>,
    http: C,
    config: ClientConfig,
    state: ConnectionState,
    resume: ResumeState,
    cancel: CancelToken,
}

impl<C: HttpClient> StreamingClient<C> {
    /// Create a disconnected client. Nothing is sent until the first
    /// [`connect`](Self::connect) or [`read_event`](Self::read_event).
    pub fn new(http: C, config: ClientConfig) -> Self {
        let resume = ResumeState::new(config.last_event_id.clone(), &config.reconnect);
        Self {
            parser: None,
            http,
            config,
            state: ConnectionState::Disconnected,
            resume,
            cancel: CancelToken::new(),
        }
    }

    /// Use an externally owned cancel token.
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn is_connected(&self) -> bool {
        self.state.is_connected()
    }

    /// Id that will be sent as `Last-Event-ID` on the next connection.
    pub fn last_event_id(&self) -> Option<&str> {
        self.resume.last_event_id()
    }

    /// Current base delay between a read failure and the reconnect.
    pub fn retry_delay(&self) -> Duration {
        self.resume.retry_delay()
    }

    pub fn url(&self) -> &str {
        &self.config.url
    }

    /// Token that cancels this client's pending waits.
    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    /// Open the event stream.
    ///
    /// Does nothing if a stream is already open. Failed attempts (network
    /// errors and non-2xx statuses) are retried immediately, up to
    /// `max_attempts` in total. On exhaustion the client is left
    /// `Disconnected` and the last failure is returned.
    pub async fn connect(&mut self) -> SseResult<()> {
        if self.state.is_connected() && self.parser.is_some() {
            return Ok(());
        }

        self.state = ConnectionState::Connecting;
        let max_attempts = self.config.max_attempts.max(1);
        let mut attempt = 0;

        loop {
            attempt += 1;
            self.parser = None;

            let headers = self.request_headers();
            let opened =
                Self::open_stream(&self.http, &self.config.url, &headers, &self.cancel).await;

            match opened {
                Ok(parser) => {
                    tracing::info!(
                        url = %self.config.url,
                        attempt,
                        last_event_id = self.resume.last_event_id().unwrap_or(""),
                        "Event stream connected"
                    );
                    self.parser = Some(parser);
                    self.state = ConnectionState::Connected;
                    return Ok(());
                }
                Err(_) if self.cancel.is_cancelled() => {
                    self.state = ConnectionState::Disconnected;
                    return Err(ClientError::Cancelled);
                }
                Err(e) if attempt < max_attempts => {
                    tracing::warn!(
                        url = %self.config.url,
                        attempt,
                        max_attempts,
                        error = %e,
                        "Connection attempt failed, retrying"
                    );
                }
                Err(e) => {
                    tracing::error!(
                        url = %self.config.url,
                        attempts = attempt,
                        error = %e,
                        "Giving up connecting"
                    );
                    self.state = ConnectionState::Disconnected;
                    return Err(ClientError::Connect {
                        attempts: attempt,
                        source: e,
                    });
                }
            }
        }
    }

    /// Read the next event, reconnecting as needed.
    ///
    /// Connects first if no stream is open. A failed read drops the
    /// stream, waits for the current retry delay and reconnects; after
    /// `max_attempts` failed reads the client enters `Failed` and the last
    /// read error is returned. A connect failure during this loop is
    /// returned as is.
    pub async fn read_event(&mut self) -> SseResult<Event> {
        if self.parser.is_none() {
            self.connect().await?;
        }

        let max_attempts = self.config.max_attempts.max(1);
        let mut attempt = 0;

        loop {
            attempt += 1;

            let outcome = match self.parser.as_mut() {
                Some(parser) => tokio::select! {
                    biased;
                    _ = self.cancel.cancelled() => None,
                    result = parser.read_event() => Some(result),
                },
                // Unreachable while `connect()` stores the parser before
                // returning Ok; kept so a broken invariant surfaces as a
                // read failure instead of a panic.
                None => Some(Err(StreamError::NotConnected)),
            };

            let error = match outcome {
                None => {
                    self.close();
                    return Err(ClientError::Cancelled);
                }
                Some(Ok(event)) => {
                    self.resume.observe(&event);
                    return Ok(event);
                }
                Some(Err(e)) => e,
            };

            self.parser = None;
            self.state = ConnectionState::Disconnected;

            if attempt >= max_attempts {
                tracing::error!(
                    url = %self.config.url,
                    attempts = attempt,
                    error = %error,
                    "Giving up reading from event stream"
                );
                self.state = ConnectionState::Failed;
                return Err(ClientError::Read {
                    attempts: attempt,
                    source: error,
                });
            }

            let delay = self
                .config
                .reconnect
                .delay_for(self.resume.retry_delay(), attempt);
            tracing::warn!(
                url = %self.config.url,
                attempt,
                max_attempts,
                delay_ms = delay.as_millis() as u64,
                error = %error,
                "Event stream read failed, reconnecting"
            );

            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => return Err(ClientError::Cancelled),
                _ = tokio::time::sleep(delay) => {}
            }

            self.connect().await?;
        }
    }

    /// Drop the open stream, if any. Safe to call repeatedly.
    ///
    /// The transport is kept so the client can connect again; it is
    /// released when the client is dropped.
    pub fn close(&mut self) {
        if self.parser.take().is_some() {
            tracing::debug!(url = %self.config.url, "Event stream closed");
        }
        self.state = ConnectionState::Disconnected;
    }

    /// Turn the client into a stream of events.
    ///
    /// The stream ends after yielding the first terminal error.
    pub fn into_stream(self) -> impl Stream<Item = SseResult<Event>> + Send
    where
        C: 'static,
    {
        futures::stream::unfold(Some(self), |state| async move {
            let Some(mut client) = state else {
                return None;
            };
            match client.read_event().await {
                Ok(event) => Some((Ok(event), Some(client))),
                Err(e) => Some((Err(e), None)),
            }
        })
    }

    // Borrows fields rather than `&self`: the open parser is not `Sync`.
    async fn open_stream(
        http: &C,
        url: &str,
        headers: &Headers,
        cancel: &CancelToken,
    ) -> Result<StreamParser<ByteLineReader>, HttpError> {
        let response = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(HttpError::Cancelled),
            result = http.get_stream(url, headers) => result?,
        };

        if !response.is_success() {
            return Err(HttpError::ServerError {
                status: response.status,
                message: "unexpected response status".to_string(),
            });
        }

        let is_event_stream = response
            .content_type()
            .map(|ct| ct.trim().to_ascii_lowercase().starts_with(EVENT_STREAM_MIME))
            .unwrap_or(false);
        if !is_event_stream {
            tracing::warn!(
                url,
                content_type = response.content_type().unwrap_or(""),
                "Response is not labelled text/event-stream, reading it anyway"
            );
        }

        Ok(StreamParser::new(url, ByteLineReader::new(response.body)))
    }

    fn request_headers(&self) -> Headers {
        let mut headers = self.config.headers.clone();
        headers.retain(|name, _| {
            !PROTOCOL_HEADERS
                .iter()
                .any(|reserved| name.eq_ignore_ascii_case(reserved))
        });

        headers.insert("Accept".to_string(), EVENT_STREAM_MIME.to_string());
        headers.insert("Cache-Control".to_string(), "no-cache".to_string());
        if let Some(id) = self.resume.last_event_id() {
            headers.insert("Last-Event-ID".to_string(), id.to_string());
        }
        headers
    }
}

impl<C> Drop for StreamingClient<C> {
    fn drop(&mut self) {
        if self.parser.take().is_some() {
            tracing::debug!(url = %self.config.url, "Dropping client with open event stream");
        }
    }
}
