//! Resumable SSE - a Server-Sent Events client that reconnects on failure
//! and resumes from the last delivered event id.
//!
//! This library exposes modules for use in integration tests and by the
//! `sse-tail` binary.

pub mod adapters;
pub mod cancel;
pub mod cli;
pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod sse;
pub mod traits;

pub use cancel::CancelToken;
pub use client::StreamingClient;
pub use config::{ClientConfig, ReconnectPolicy};
pub use domain::ConnectionState;
pub use error::{ClientError, SseResult, StreamError};
pub use sse::{Event, EventBuilder, StreamParser};
