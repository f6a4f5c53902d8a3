//! Text renderings of a [`Delta`].
//!
//! Two independent formats: a single log line carrying every changed metric,
//! and a fixed-shape status block carrying only the [`STATUS_KEYS`].

use std::fmt::Write;

use crate::delta::Delta;

/// Counters exposed on the status endpoint, in output (sorted) order.
pub const STATUS_KEYS: [&str; 6] = [
    "libbeat.logstash.call_count.PublishEvents",
    "libbeat.logstash.publish.read_bytes",
    "libbeat.logstash.publish.write_bytes",
    "libbeat.logstash.published_and_acked_events",
    "libbeat.publisher.messages_in_worker_queues",
    "libbeat.publisher.published_events",
];

/// Value shown for a status key the delta doesn't mention.
const STATUS_DEFAULT: &str = "0";

/// Render every entry as ` key=value`, keys sorted ascending.
///
/// Returns an empty string for an empty delta; no trailing newline.
pub fn format_log_line(delta: &Delta) -> String {
    let mut out = String::new();
    for key in delta.sorted_keys() {
        if let Some(value) = delta.get(key) {
            let _ = write!(out, " {key}={value}");
        }
    }
    out
}

/// Render the six status keys as `name: value\n` lines.
///
/// Keys outside [`STATUS_KEYS`] are ignored; missing keys show `0`.
pub fn format_status_block(delta: &Delta) -> String {
    render_status(|key| delta.get(key).map(ToString::to_string))
}

/// The status block for a period in which nothing changed.
pub fn zero_status_block() -> String {
    render_status(|_| None)
}

fn render_status(lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut keys = STATUS_KEYS;
    keys.sort_unstable();

    let mut out = String::new();
    for key in keys {
        let value = lookup(key).unwrap_or_else(|| STATUS_DEFAULT.to_string());
        let _ = writeln!(out, "{key}: {value}");
    }
    out
}
