//! Environment overrides for `ClientConfig`.
//!
//! These tests mutate process environment variables, so they run serially.

use std::time::Duration;

use resumable_sse::ClientConfig;
use serial_test::serial;

const VARS: [&str; 5] = [
    "SSE_MAX_ATTEMPTS",
    "SSE_RETRY_MS",
    "SSE_BACKOFF_FACTOR",
    "SSE_CONNECT_TIMEOUT_SECS",
    "SSE_LAST_EVENT_ID",
];

fn clear_env() {
    for var in VARS {
        std::env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_from_env_without_variables_uses_defaults() {
    clear_env();

    let config = ClientConfig::from_env("http://x/");
    assert_eq!(config.url, "http://x/");
    assert_eq!(config.max_attempts, 3);
    assert_eq!(config.reconnect.initial_delay, Duration::from_millis(3000));
    assert_eq!(config.reconnect.backoff_factor, 1.0);
    assert_eq!(config.connect_timeout, Duration::from_secs(10));
    assert!(config.last_event_id.is_none());
}

#[test]
#[serial]
fn test_from_env_applies_overrides() {
    clear_env();
    std::env::set_var("SSE_MAX_ATTEMPTS", "5");
    std::env::set_var("SSE_RETRY_MS", "250");
    std::env::set_var("SSE_BACKOFF_FACTOR", "2.5");
    std::env::set_var("SSE_CONNECT_TIMEOUT_SECS", "4");
    std::env::set_var("SSE_LAST_EVENT_ID", "abc");

    let config = ClientConfig::from_env("http://x/");
    clear_env();

    assert_eq!(config.max_attempts, 5);
    assert_eq!(config.reconnect.initial_delay, Duration::from_millis(250));
    assert_eq!(config.reconnect.backoff_factor, 2.5);
    assert_eq!(config.connect_timeout, Duration::from_secs(4));
    assert_eq!(config.last_event_id.as_deref(), Some("abc"));
}

#[test]
#[serial]
fn test_from_env_ignores_invalid_values() {
    clear_env();
    std::env::set_var("SSE_MAX_ATTEMPTS", "lots");
    std::env::set_var("SSE_RETRY_MS", "-1");
    std::env::set_var("SSE_BACKOFF_FACTOR", "0.5");
    std::env::set_var("SSE_LAST_EVENT_ID", "");

    let config = ClientConfig::from_env("http://x/");
    clear_env();

    assert_eq!(config.max_attempts, 3);
    assert_eq!(config.reconnect.initial_delay, Duration::from_millis(3000));
    assert_eq!(config.reconnect.backoff_factor, 1.0);
    assert!(config.last_event_id.is_none());
}

#[test]
#[serial]
fn test_zero_attempts_clamped() {
    clear_env();
    std::env::set_var("SSE_MAX_ATTEMPTS", "0");

    let config = ClientConfig::from_env("http://x/");
    clear_env();

    assert_eq!(config.max_attempts, 1);
}
