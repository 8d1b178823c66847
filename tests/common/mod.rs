//! Common test utilities for integration tests.
//!
//! This module provides reusable fixtures for driving a
//! `StreamingClient` against either a scripted mock transport or a real
//! HTTP server started with wiremock.
//!
//! # Example
//!
//! ```ignore
//! let server = MockServer::start().await;
//! Mock::given(method("GET"))
//!     .respond_with(sse_response("data: hi\n\n"))
//!     .mount(&server)
//!     .await;
//! let mut client = reqwest_client(&format!("{}/events", server.uri()));
//! ```

#![allow(dead_code)]

pub mod mocks;

pub use mocks::*;

use std::time::Duration;

use resumable_sse::adapters::ReqwestHttpClient;
use resumable_sse::{ClientConfig, Event, SseResult, StreamingClient};
use wiremock::ResponseTemplate;

/// Reconnect delay short enough to keep real-time tests fast.
pub const FAST_RETRY: Duration = Duration::from_millis(10);

/// A 200 response carrying `body` as `text/event-stream`.
pub fn sse_response(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.as_bytes().to_vec(), "text/event-stream")
}

/// Config for `url` with a short reconnect delay.
pub fn fast_config(url: &str) -> ClientConfig {
    ClientConfig::new(url).with_retry_delay(FAST_RETRY)
}

/// Client over the production transport with a short reconnect delay.
pub fn reqwest_client(url: &str) -> StreamingClient<ReqwestHttpClient> {
    let config = fast_config(url);
    let http = ReqwestHttpClient::from_config(&config).unwrap();
    StreamingClient::new(http, config)
}

/// Read `count` events, stopping at the first error.
pub async fn read_events<C>(client: &mut StreamingClient<C>, count: usize) -> SseResult<Vec<Event>>
where
    C: resumable_sse::traits::HttpClient,
{
    let mut events = Vec::with_capacity(count);
    for _ in 0..count {
        events.push(client.read_event().await?);
    }
    Ok(events)
}
