//! Mock implementations for testing.
//!
//! This module provides mock implementations of the trait abstractions,
//! enabling unit testing without network access.
//!
//! # Available Mocks
//!
//! - [`MockHttpClient`] - Scripted streaming responses, request recording
//! - [`MockLineSource`] - Replays a fixed list of lines

pub mod http;
pub mod lines;

pub use http::{MockHttpClient, MockResponse, RecordedRequest};
pub use lines::MockLineSource;
