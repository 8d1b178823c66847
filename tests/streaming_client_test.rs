//! End-to-end behaviour of `StreamingClient` over a scripted transport.
//!
//! Time is paused in these tests, so reconnect waits advance virtually.

mod common;

use common::*;
use std::time::Duration;

use resumable_sse::{ClientConfig, ClientError, ConnectionState, StreamError, StreamingClient};
use tokio::time::Instant;

const URL: &str = "http://stream.test/events";

fn client(mock: &MockHttpClient) -> StreamingClient<MockHttpClient> {
    StreamingClient::new(mock.clone(), ClientConfig::new(URL))
}

#[tokio::test(start_paused = true)]
async fn test_named_multiline_event() {
    let mock = MockStreamConfig::new()
        .then_body("event: update\ndata: hello\ndata: world\n\n")
        .build();
    let mut client = client(&mock);

    let event = client.read_event().await.unwrap();
    assert_eq!(event.event_type(), "update");
    assert_eq!(event.data(), Some("hello\nworld"));
    assert_eq!(event.id(), None);
}

#[tokio::test(start_paused = true)]
async fn test_event_split_across_chunks() {
    let mock = MockStreamConfig::new()
        .then_chunks(&["\u{feff}ev", "ent: tick\r\nda", "ta: 1\r", "\n\r\n"])
        .build();
    let mut client = client(&mock);

    let event = client.read_event().await.unwrap();
    assert_eq!(event.event_type(), "tick");
    assert_eq!(event.data(), Some("1"));
}

#[tokio::test(start_paused = true)]
async fn test_resumes_with_last_event_id_after_drop() {
    let mock = MockStreamConfig::new()
        .then_body("id: 42\ndata: x\n\n")
        .then_body("id: 43\ndata: y\n\n")
        .build();
    let mut client = client(&mock);

    let events = read_events(&mut client, 2).await.unwrap();
    assert_eq!(events[0].id(), Some("42"));
    assert_eq!(events[1].id(), Some("43"));

    let requests = mock.get_requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].header("Last-Event-ID"), Some("42"));
    assert_eq!(client.last_event_id(), Some("43"));
}

#[tokio::test(start_paused = true)]
async fn test_server_retry_controls_reconnect_wait() {
    let mock = MockStreamConfig::new()
        .then_body("retry: 5000\ndata: y\n\n")
        .then_body("data: z\n\n")
        .build();
    let mut client = client(&mock);

    client.read_event().await.unwrap();
    let started = Instant::now();
    let event = client.read_event().await.unwrap();

    assert_eq!(event.data(), Some("z"));
    let waited = started.elapsed();
    assert!(waited >= Duration::from_millis(5000), "waited {waited:?}");
    assert!(waited < Duration::from_millis(6000), "waited {waited:?}");
}

#[tokio::test(start_paused = true)]
async fn test_truncated_event_is_never_delivered() {
    let mock = MockStreamConfig::new().then_body("data: incomplete\n").build();
    let config = ClientConfig::new(URL).with_max_attempts(1);
    let mut client = StreamingClient::new(mock, config);

    let err = client.read_event().await.unwrap_err();
    match err {
        ClientError::Read { attempts, source } => {
            assert_eq!(attempts, 1);
            assert!(source.is_framing());
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn test_unrecognized_field_ignored() {
    let mock = MockStreamConfig::new()
        .then_body("foo: bar\nevent: e\ndata: d\n\n")
        .build();
    let mut client = client(&mock);

    let event = client.read_event().await.unwrap();
    assert_eq!(event.event_type(), "e");
    assert_eq!(event.data(), Some("d"));
}

#[tokio::test(start_paused = true)]
async fn test_three_failed_connects_leave_client_disconnected() {
    let mock = MockStreamConfig::new()
        .then_connect_error(HttpError::ConnectionFailed("one".to_string()))
        .then_connect_error(HttpError::Timeout("two".to_string()))
        .then_connect_error(HttpError::ConnectionFailed("three".to_string()))
        .then_body("data: never\n\n")
        .build();
    let mut client = client(&mock);

    let err = client.connect().await.unwrap_err();
    assert_eq!(
        err,
        ClientError::Connect {
            attempts: 3,
            source: HttpError::ConnectionFailed("three".to_string()),
        }
    );
    assert_eq!(client.state(), ConnectionState::Disconnected);
    assert_eq!(mock.request_count(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_recovers_from_mid_stream_failure() {
    let mock = MockStreamConfig::new()
        .then_body_and_error("id: 1\ndata: a\n\ndata: lost", HttpError::Io("reset".to_string()))
        .then_status(502)
        .then_body("id: 2\ndata: b\n\n")
        .build();
    let mut client = client(&mock);

    let events = read_events(&mut client, 2).await.unwrap();
    assert_eq!(events[0].data(), Some("a"));
    assert_eq!(events[1].data(), Some("b"));

    let requests = mock.get_requests();
    assert_eq!(requests.len(), 3);
    assert_eq!(requests[1].header("Last-Event-ID"), Some("1"));
    assert_eq!(requests[2].header("Last-Event-ID"), Some("1"));
}

#[tokio::test(start_paused = true)]
async fn test_invalid_utf8_is_a_read_failure() {
    let mock = MockHttpClient::new();
    mock.push_response(MockResponse::Stream(vec![bytes::Bytes::from_static(
        b"data: \xff\xfe\n\n",
    )]));
    let config = ClientConfig::new(URL).with_max_attempts(1);
    let mut client = StreamingClient::new(mock, config);

    let err = client.read_event().await.unwrap_err();
    assert!(matches!(
        err,
        ClientError::Read {
            source: StreamError::InvalidUtf8(_),
            ..
        }
    ));
}

#[tokio::test(start_paused = true)]
async fn test_keep_alive_blank_lines_and_comments() {
    let mock = MockStreamConfig::new()
        .then_body("\n\n: keep-alive\n\ndata: real\n\n")
        .build();
    let mut client = client(&mock);

    let ping = client.read_event().await.unwrap();
    assert_eq!(ping.comment(), Some(" keep-alive"));
    assert_eq!(ping.data(), None);

    let event = client.read_event().await.unwrap();
    assert_eq!(event.data(), Some("real"));
}
