//! Client configuration.
//!
//! Use the builder methods to customize behavior, or load overrides from
//! the environment with [`ClientConfig::from_env`].

use std::time::Duration;

use crate::traits::Headers;

/// Default number of attempts for both connecting and reading.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default wait before reconnecting after a read failure.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(3000);

/// How long to wait between a read failure and the next connection.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconnectPolicy {
    /// Delay used until the server sends a `retry` field
    pub initial_delay: Duration,
    /// Multiplier applied per consecutive failed read attempt (1.0 = flat)
    pub backoff_factor: f64,
    /// Upper bound for any computed delay
    pub max_delay: Duration,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self {
            initial_delay: DEFAULT_RETRY_DELAY,
            backoff_factor: 1.0,
            max_delay: Duration::from_secs(60),
        }
    }
}

impl ReconnectPolicy {
    /// Delay before reconnect attempt `attempt` (1-based) given the current base delay.
    pub fn delay_for(&self, base: Duration, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1);
        let factor = if self.backoff_factor.is_finite() && self.backoff_factor >= 1.0 {
            self.backoff_factor
        } else {
            1.0
        };
        if exponent == 0 || factor == 1.0 {
            return base;
        }
        let scaled = base.as_secs_f64() * factor.powi(exponent.min(i32::MAX as u32) as i32);
        let max = self.max_delay.as_secs_f64().max(base.as_secs_f64());
        if scaled.is_finite() {
            Duration::from_secs_f64(scaled.min(max))
        } else {
            Duration::from_secs_f64(max)
        }
    }
}

/// Configuration for a [`StreamingClient`](crate::client::StreamingClient).
///
/// # Example
///
/// ```ignore
/// use resumable_sse::config::ClientConfig;
///
/// let config = ClientConfig::new("https://example.com/events")
///     .with_max_attempts(5)
///     .with_header("Authorization", "Bearer abc");
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Stream URL
    pub url: String,
    /// Attempt budget for connecting and for reading (default: 3)
    pub max_attempts: u32,
    /// Reconnect delay policy
    pub reconnect: ReconnectPolicy,
    /// Extra headers sent with every request
    pub headers: Headers,
    /// Resumption cursor to start from, sent as `Last-Event-ID` on the first request
    pub last_event_id: Option<String>,
    /// TCP/TLS connect timeout for the production transport (default: 10s)
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            reconnect: ReconnectPolicy::default(),
            headers: Headers::new(),
            last_event_id: None,
            connect_timeout: Duration::from_secs(10),
        }
    }
}

impl ClientConfig {
    /// Create a config for `url` with default values.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Set the attempt budget. Values below 1 are treated as 1.
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    /// Set the initial reconnect delay.
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.reconnect.initial_delay = delay;
        self
    }

    /// Set the whole reconnect policy.
    pub fn with_reconnect_policy(mut self, policy: ReconnectPolicy) -> Self {
        self.reconnect = policy;
        self
    }

    /// Add a header sent with every request.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Resume from a previously seen event id.
    pub fn with_last_event_id(mut self, id: impl Into<String>) -> Self {
        let id = id.into();
        self.last_event_id = if id.is_empty() { None } else { Some(id) };
        self
    }

    /// Set the connect timeout of the production transport.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Create a config for `url`, applying overrides from environment variables.
    ///
    /// - `SSE_MAX_ATTEMPTS` - attempt budget
    /// - `SSE_RETRY_MS` - initial reconnect delay in milliseconds
    /// - `SSE_BACKOFF_FACTOR` - per-attempt delay multiplier
    /// - `SSE_CONNECT_TIMEOUT_SECS` - connect timeout in seconds
    /// - `SSE_LAST_EVENT_ID` - resumption cursor to start from
    ///
    /// Values that fail to parse are logged and ignored.
    pub fn from_env(url: impl Into<String>) -> Self {
        let mut config = Self::new(url);

        if let Some(attempts) = env_parse::<u32>("SSE_MAX_ATTEMPTS") {
            config = config.with_max_attempts(attempts);
        }
        if let Some(millis) = env_parse::<u64>("SSE_RETRY_MS") {
            config = config.with_retry_delay(Duration::from_millis(millis));
        }
        if let Some(factor) = env_parse::<f64>("SSE_BACKOFF_FACTOR") {
            if factor.is_finite() && factor >= 1.0 {
                config.reconnect.backoff_factor = factor;
            } else {
                tracing::warn!(factor, "Ignoring SSE_BACKOFF_FACTOR below 1.0");
            }
        }
        if let Some(secs) = env_parse::<u64>("SSE_CONNECT_TIMEOUT_SECS") {
            config = config.with_connect_timeout(Duration::from_secs(secs));
        }
        if let Ok(id) = std::env::var("SSE_LAST_EVENT_ID") {
            config = config.with_last_event_id(id);
        }

        config
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(variable = name, value = %raw, "Ignoring unparsable environment value");
            None
        }
    }
}
