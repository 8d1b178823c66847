//! Mock implementations for test fixtures.
//!
//! This module re-exports the mock implementations from
//! `resumable_sse::adapters::mock` and provides a builder for scripting
//! a sequence of connections.

pub use resumable_sse::adapters::mock::{MockHttpClient, MockResponse, RecordedRequest};
pub use resumable_sse::traits::{Headers, HttpClient, HttpError};

use bytes::Bytes;

/// Builder for a mock transport that serves one response per connection.
pub struct MockStreamConfig {
    client: MockHttpClient,
}

impl MockStreamConfig {
    /// Creates a new, empty script.
    pub fn new() -> Self {
        Self {
            client: MockHttpClient::new(),
        }
    }

    /// Next connection streams `body`, then ends.
    pub fn then_body(self, body: &str) -> Self {
        self.client.push_response(MockResponse::text(body));
        self
    }

    /// Next connection streams `chunks` one by one, then ends.
    pub fn then_chunks(self, chunks: &[&'static str]) -> Self {
        self.client.push_response(MockResponse::Stream(
            chunks.iter().map(|c| Bytes::from_static(c.as_bytes())).collect(),
        ));
        self
    }

    /// Next connection streams `body`, then the body read fails.
    pub fn then_body_and_error(self, body: &str, error: HttpError) -> Self {
        self.client.push_response(MockResponse::StreamThenError(
            vec![Bytes::from(body.to_string())],
            error,
        ));
        self
    }

    /// Next connection attempt fails before any response.
    pub fn then_connect_error(self, error: HttpError) -> Self {
        self.client.push_response(MockResponse::Error(error));
        self
    }

    /// Next connection answers with `status` and an empty body.
    pub fn then_status(self, status: u16) -> Self {
        self.client.push_response(MockResponse::Status(status));
        self
    }

    /// Builds the configured MockHttpClient.
    pub fn build(self) -> MockHttpClient {
        self.client
    }
}

impl Default for MockStreamConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_stream_config_order() {
        let client = MockStreamConfig::new()
            .then_status(503)
            .then_body("data: a\n\n")
            .build();

        let first = client.get_stream("http://x/", &Headers::new()).await.unwrap();
        assert_eq!(first.status, 503);
        let second = client.get_stream("http://x/", &Headers::new()).await.unwrap();
        assert_eq!(second.status, 200);
        assert_eq!(client.request_count(), 2);
    }
}
