//! Mock HTTP client for testing.
//!
//! Provides a scriptable mock transport that returns predefined streaming
//! responses or errors and records every request it receives.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use crate::traits::{ByteStream, Headers, HttpClient, HttpError, StreamResponse};

/// A recorded HTTP request for verification in tests.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// HTTP method (always GET for this transport)
    pub method: String,
    /// Request URL
    pub url: String,
    /// Request headers
    pub headers: Headers,
}

impl RecordedRequest {
    /// Get a header value by name, matched case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Configuration for a mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// 200 `text/event-stream` response whose body yields the chunks, then ends
    Stream(Vec<Bytes>),
    /// 200 response whose body yields the chunks, then fails
    StreamThenError(Vec<Bytes>, HttpError),
    /// 200 response whose body yields the chunks, then never produces more data
    StreamThenPending(Vec<Bytes>),
    /// Response with the given status and an empty body
    Status(u16),
    /// The request itself fails
    Error(HttpError),
}

impl MockResponse {
    /// Convenience for a body given as text.
    pub fn text(body: &str) -> Self {
        MockResponse::Stream(vec![Bytes::from(body.to_string())])
    }

    fn into_response(self) -> Result<StreamResponse, HttpError> {
        let (status, body) = match self {
            MockResponse::Stream(chunks) => (200, body_from(chunks, None)),
            MockResponse::StreamThenError(chunks, err) => (200, body_from(chunks, Some(err))),
            MockResponse::StreamThenPending(chunks) => {
                use futures_util::StreamExt;
                let items: Vec<Result<Bytes, HttpError>> = chunks.into_iter().map(Ok).collect();
                let body: ByteStream =
                    Box::pin(futures::stream::iter(items).chain(futures::stream::pending()));
                (200, body)
            }
            MockResponse::Status(status) => (status, body_from(Vec::new(), None)),
            MockResponse::Error(err) => return Err(err),
        };

        let mut headers = Headers::new();
        if (200..300).contains(&status) {
            headers.insert("content-type".to_string(), "text/event-stream".to_string());
        }
        Ok(StreamResponse::new(status, headers, body))
    }
}

fn body_from(chunks: Vec<Bytes>, error: Option<HttpError>) -> ByteStream {
    let items: Vec<Result<Bytes, HttpError>> = chunks
        .into_iter()
        .map(Ok)
        .chain(error.map(Err))
        .collect();
    Box::pin(futures::stream::iter(items))
}

/// Mock HTTP client for testing.
///
/// Responses are chosen in this order: the next queued response (see
/// [`push_response`](Self::push_response)), then a response configured for
/// the URL (exact match, then prefix match), then the default response.
///
/// Clones share the same script and request log.
///
/// # Example
///
/// ```ignore
/// use resumable_sse::adapters::mock::{MockHttpClient, MockResponse};
///
/// let client = MockHttpClient::new();
/// client.push_response(MockResponse::text("id: 1\ndata: a\n\n"));
/// client.push_response(MockResponse::Status(503));
///
/// // ... drive a StreamingClient ...
///
/// let requests = client.get_requests();
/// assert_eq!(requests[1].header("Last-Event-ID"), Some("1"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockHttpClient {
    /// Responses consumed one per request, in order
    queue: Arc<Mutex<VecDeque<MockResponse>>>,
    /// Configured responses by URL pattern
    responses: Arc<Mutex<HashMap<String, MockResponse>>>,
    /// Default response when nothing else matches
    default_response: Arc<Mutex<Option<MockResponse>>>,
    /// Recorded requests for verification
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockHttpClient {
    /// Create a new mock HTTP client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for the next request.
    pub fn push_response(&self, response: MockResponse) {
        self.queue.lock().unwrap().push_back(response);
    }

    /// Set a response for a specific URL.
    pub fn set_response(&self, url: &str, response: MockResponse) {
        self.responses
            .lock()
            .unwrap()
            .insert(url.to_string(), response);
    }

    /// Set a default response for requests nothing else matches.
    pub fn set_default_response(&self, response: MockResponse) {
        *self.default_response.lock().unwrap() = Some(response);
    }

    /// Get all recorded requests.
    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of requests received so far.
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Clear all recorded requests.
    pub fn clear_requests(&self) {
        self.requests.lock().unwrap().clear();
    }

    fn record_request(&self, url: &str, headers: &Headers) {
        self.requests.lock().unwrap().push(RecordedRequest {
            method: "GET".to_string(),
            url: url.to_string(),
            headers: headers.clone(),
        });
    }

    fn next_response(&self, url: &str) -> Option<MockResponse> {
        if let Some(response) = self.queue.lock().unwrap().pop_front() {
            return Some(response);
        }

        let responses = self.responses.lock().unwrap();
        if let Some(response) = responses.get(url) {
            return Some(response.clone());
        }
        for (pattern, response) in responses.iter() {
            if url.starts_with(pattern) {
                return Some(response.clone());
            }
        }

        self.default_response.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn get_stream(&self, url: &str, headers: &Headers) -> Result<StreamResponse, HttpError> {
        self.record_request(url, headers);

        match self.next_response(url) {
            Some(response) => response.into_response(),
            None => Err(HttpError::Other(format!("No mock response for URL: {}", url))),
        }
    }
}
