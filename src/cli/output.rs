//! Event rendering for `sse-tail`.

use crate::sse::Event;

/// Render an event as text: `event:`, `id:` and `data:` lines followed by
/// a blank line, the same shape the server sent.
pub fn format_text(event: &Event) -> String {
    let mut out = format!("event: {}\n", event.event_type());
    if let Some(id) = event.id() {
        out.push_str(&format!("id: {}\n", id));
    }
    if let Some(data) = event.data() {
        for line in data.split('\n') {
            out.push_str(&format!("data: {}\n", line));
        }
    }
    out
}

/// Render an event as a single JSON line.
pub fn format_json(event: &Event) -> Result<String, serde_json::Error> {
    serde_json::to_string(event)
}
