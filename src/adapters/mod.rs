//! Concrete implementations of trait abstractions.
//!
//! This module provides production-ready adapters implementing the traits
//! defined in `crate::traits`.
//!
//! # Adapters
//!
//! - [`ReqwestHttpClient`] - HTTP transport using reqwest
//! - [`ByteLineReader`] - Line source over a streamed response body
//!
//! # Mock Implementations
//!
//! The [`mock`] submodule provides test doubles:
//! - [`mock::MockHttpClient`] - Scripted streaming responses
//! - [`mock::MockLineSource`] - Fixed list of lines

pub mod byte_lines;
pub mod mock;
pub mod reqwest_http;

pub use byte_lines::ByteLineReader;
pub use mock::{MockHttpClient, MockLineSource};
pub use reqwest_http::ReqwestHttpClient;
