//! Domain objects for the streaming client.
//!
//! - [`ConnectionState`] - connection lifecycle
//! - [`ResumeState`] - resumption cursor and retry delay carried across reconnects

pub mod connection;

pub use connection::{ConnectionState, ResumeState};
