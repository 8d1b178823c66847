//! HTTP transport trait abstraction.
//!
//! Provides a trait-based abstraction for the one HTTP operation an SSE
//! client needs: a GET whose response headers are available before the
//! body has been received. This enables dependency injection and mocking
//! in tests.

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::collections::HashMap;
use std::pin::Pin;

/// HTTP headers represented as a key-value map.
pub type Headers = HashMap<String, String>;

/// Response body delivered incrementally as byte chunks.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, HttpError>> + Send>>;

/// A response whose body has not been read yet.
pub struct StreamResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers (names lower-cased by the production adapter)
    pub headers: Headers,
    /// Response body
    pub body: ByteStream,
}

impl StreamResponse {
    /// Create a new streaming response.
    pub fn new(status: u16, headers: Headers, body: ByteStream) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Check if the response indicates success (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Get the `Content-Type` header, matched case-insensitively.
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case("content-type"))
            .map(|(_, value)| value.as_str())
    }
}

impl std::fmt::Debug for StreamResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamResponse")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

/// HTTP client errors.
#[derive(Debug, Clone, PartialEq)]
pub enum HttpError {
    /// Connection failed
    ConnectionFailed(String),
    /// Request timeout
    Timeout(String),
    /// Server returned an error status
    ServerError { status: u16, message: String },
    /// Request was cancelled
    Cancelled,
    /// IO error while reading the body
    Io(String),
    /// Invalid URL
    InvalidUrl(String),
    /// Other error
    Other(String),
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HttpError::ConnectionFailed(msg) => write!(f, "Connection failed: {}", msg),
            HttpError::Timeout(msg) => write!(f, "Request timeout: {}", msg),
            HttpError::ServerError { status, message } => {
                write!(f, "Server error ({}): {}", status, message)
            }
            HttpError::Cancelled => write!(f, "Request cancelled"),
            HttpError::Io(msg) => write!(f, "IO error: {}", msg),
            HttpError::InvalidUrl(msg) => write!(f, "Invalid URL: {}", msg),
            HttpError::Other(msg) => write!(f, "HTTP error: {}", msg),
        }
    }
}

impl std::error::Error for HttpError {}

/// Trait for the HTTP transport used by the streaming client.
///
/// Implementations include the production reqwest-based client and a
/// scripted mock for testing. A transport handle is owned by exactly one
/// [`StreamingClient`](crate::client::StreamingClient).
///
/// # Example
///
/// ```ignore
/// use resumable_sse::traits::{Headers, HttpClient, HttpError};
///
/// async fn status_of<C: HttpClient>(client: &C) -> Result<u16, HttpError> {
///     let response = client.get_stream("https://example.com/events", &Headers::new()).await?;
///     Ok(response.status)
/// }
/// ```
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Issue a GET request and return once the response headers arrive.
    ///
    /// A non-success status is returned as a normal response; deciding
    /// whether it is an error is left to the caller.
    ///
    /// # Arguments
    /// * `url` - The URL to request
    /// * `headers` - Request headers
    async fn get_stream(&self, url: &str, headers: &Headers) -> Result<StreamResponse, HttpError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::StreamExt;

    fn empty_body() -> ByteStream {
        Box::pin(futures::stream::empty::<Result<Bytes, HttpError>>())
    }

    #[test]
    fn test_response_is_success() {
        assert!(StreamResponse::new(200, Headers::new(), empty_body()).is_success());
        assert!(StreamResponse::new(204, Headers::new(), empty_body()).is_success());
        assert!(StreamResponse::new(299, Headers::new(), empty_body()).is_success());
        assert!(!StreamResponse::new(301, Headers::new(), empty_body()).is_success());
        assert!(!StreamResponse::new(404, Headers::new(), empty_body()).is_success());
        assert!(!StreamResponse::new(503, Headers::new(), empty_body()).is_success());
    }

    #[test]
    fn test_content_type_case_insensitive() {
        let mut headers = Headers::new();
        headers.insert("Content-Type".to_string(), "text/event-stream".to_string());
        let response = StreamResponse::new(200, headers, empty_body());
        assert_eq!(response.content_type(), Some("text/event-stream"));

        let response = StreamResponse::new(200, Headers::new(), empty_body());
        assert_eq!(response.content_type(), None);
    }

    #[tokio::test]
    async fn test_body_is_readable() {
        let chunks: Vec<Result<Bytes, HttpError>> =
            vec![Ok(Bytes::from("data: a\n")), Ok(Bytes::from("\n"))];
        let body: ByteStream = Box::pin(futures::stream::iter(chunks));
        let mut response = StreamResponse::new(200, Headers::new(), body);

        let mut chunks = Vec::new();
        while let Some(chunk) = response.body.next().await {
            chunks.push(chunk.unwrap());
        }
        assert_eq!(chunks, vec![Bytes::from("data: a\n"), Bytes::from("\n")]);
    }

    #[test]
    fn test_http_error_display() {
        assert_eq!(
            HttpError::ConnectionFailed("refused".to_string()).to_string(),
            "Connection failed: refused"
        );
        assert_eq!(
            HttpError::ServerError {
                status: 503,
                message: "Service Unavailable".to_string()
            }
            .to_string(),
            "Server error (503): Service Unavailable"
        );
        assert_eq!(HttpError::Cancelled.to_string(), "Request cancelled");
        assert_eq!(
            HttpError::Io("reset".to_string()).to_string(),
            "IO error: reset"
        );
    }

    #[test]
    fn test_debug_omits_body() {
        let response = StreamResponse::new(200, Headers::new(), empty_body());
        let debug = format!("{:?}", response);
        assert!(debug.contains("status: 200"));
        assert!(!debug.contains("body"));
    }
}
