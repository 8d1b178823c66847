//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - streaming HTTP GET
//! - [`LineSource`] - asynchronous "read next line"

pub mod http;
pub mod lines;

pub use http::{ByteStream, Headers, HttpClient, HttpError, StreamResponse};
pub use lines::LineSource;
