//! Line-by-line accumulation of one event block.
//!
//! Field grammar, one line at a time:
//! - `:<text>` - comment, `<text>` is kept verbatim
//! - `<name>` or `<name>:[ ]<value>` where `<name>` is `event`, `id`,
//!   `data` or `retry`; at most one space after the colon is dropped
//! - anything else is ignored

use once_cell::sync::Lazy;
use regex::Regex;

use super::event::{Event, DEFAULT_EVENT_TYPE};

/// Marks a comment when it is the first character of a line.
const COMMENT_MARK: char = ':';

static FIELD_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(event|id|data|retry)(?::(.*))?$").expect("Invalid field line regex")
});

/// Accumulator for the event under construction.
///
/// Lines must be applied in stream order. [`make_event`](Self::make_event)
/// only reads the accumulator, so it can be called any number of times.
#[derive(Debug, Clone, Default)]
pub struct EventBuilder {
    origin: String,
    event_type: Option<String>,
    id: Option<String>,
    data: Vec<String>,
    comments: Vec<String>,
    retry: Option<u64>,
    lines_seen: usize,
}

impl EventBuilder {
    /// Create an empty builder for events read from `origin`.
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            ..Self::default()
        }
    }

    /// Build a builder by applying `lines` in order.
    pub fn from_lines<'a, I>(origin: impl Into<String>, lines: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        lines
            .into_iter()
            .fold(Self::new(origin), |builder, line| builder.with_line(line))
    }

    /// Apply one line and return the updated accumulator.
    pub fn with_line(mut self, line: &str) -> Self {
        self.add_line(line);
        self
    }

    /// Apply one line (without its terminator) to the event under construction.
    ///
    /// Unrecognized lines and unparsable `retry` values are logged at debug
    /// level and otherwise ignored.
    pub fn add_line(&mut self, line: &str) {
        self.lines_seen += 1;

        if let Some(comment) = line.strip_prefix(COMMENT_MARK) {
            self.comments.push(comment.to_string());
            return;
        }

        let Some(captures) = FIELD_LINE.captures(line) else {
            tracing::debug!(line, "Ignoring unrecognized SSE line");
            return;
        };

        let name = captures.get(1).map_or("", |m| m.as_str());
        let raw_value = captures.get(2).map_or("", |m| m.as_str());
        let value = raw_value.strip_prefix(' ').unwrap_or(raw_value);

        match name {
            "event" => {
                self.event_type = if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                };
            }
            "id" => self.id = Some(value.to_string()),
            "data" => self.data.push(value.to_string()),
            "retry" => match parse_retry(value) {
                Some(millis) => self.retry = Some(millis),
                None => tracing::debug!(value, "Ignoring invalid retry value"),
            },
            _ => unreachable!("field regex only matches known names"),
        }
    }

    /// Whether no line has been applied yet.
    pub fn is_empty(&self) -> bool {
        self.lines_seen == 0
    }

    /// Snapshot the accumulated state as an [`Event`].
    pub fn make_event(&self) -> Event {
        Event::new(
            self.origin.clone(),
            self.event_type
                .clone()
                .unwrap_or_else(|| DEFAULT_EVENT_TYPE.to_string()),
            self.id.clone(),
            join_lines(&self.data),
            join_lines(&self.comments),
            self.retry,
        )
    }
}

fn join_lines(lines: &[String]) -> Option<String> {
    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

fn parse_retry(value: &str) -> Option<u64> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}
