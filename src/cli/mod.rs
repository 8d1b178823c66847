//! CLI module for `sse-tail`.
//!
//! This module provides command-line interface functionality including:
//! - Argument parsing
//! - Version and usage display
//! - Event rendering
//!
//! # Usage
//!
//! ```ignore
//! use resumable_sse::cli::{parse_args, CliCommand};
//!
//! match parse_args(std::env::args())? {
//!     CliCommand::Version => println!("{}", resumable_sse::cli::version_string()),
//!     CliCommand::Help => println!("{}", resumable_sse::cli::USAGE),
//!     CliCommand::Tail(options) => { /* connect and print */ }
//! }
//! ```

pub mod args;
pub mod output;
pub mod version;

pub use args::{parse_args, ArgsError, CliCommand, TailOptions};
pub use output::{format_json, format_text};
pub use version::{version_string, VERSION};

/// Usage text printed by `--help` and on argument errors.
pub const USAGE: &str = "\
Usage: sse-tail <url> [options]

Connect to a Server-Sent Events stream and print each event.

Options:
  --json                  Print one JSON object per event
  --last-event-id <id>    Resume after this event id
  --max-attempts <n>      Connect/read attempts before giving up (default 3)
  --retry-ms <ms>         Initial reconnect delay (default 3000)
  -H, --header <h>        Extra request header, 'Name: value' (repeatable)
  -V, --version           Print version
  -h, --help              Print this help

Environment:
  RUST_LOG, SSE_MAX_ATTEMPTS, SSE_RETRY_MS, SSE_BACKOFF_FACTOR,
  SSE_CONNECT_TIMEOUT_SECS, SSE_LAST_EVENT_ID";
