//! SSE (Server-Sent Events) decoding.
//!
//! SSE format consists of blocks of field lines separated by a blank line:
//! - `event: <type>` - event type line
//! - `data: <payload>` - data payload line (may repeat)
//! - `id: <id>` - resumption cursor
//! - `retry: <millis>` - reconnection delay override
//! - Lines starting with `:` - comments
//!
//! # Module structure
//! - `event` - the decoded [`Event`] value
//! - `builder` - [`EventBuilder`], applies one line at a time to an event under construction
//! - `parser` - [`StreamParser`], frames a line source into blocks

mod builder;
mod event;
mod parser;

pub use builder::EventBuilder;
pub use event::{Event, DEFAULT_EVENT_TYPE};
pub use parser::StreamParser;
