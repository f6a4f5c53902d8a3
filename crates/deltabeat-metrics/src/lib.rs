//! deltabeat-metrics — periodic reporting of metric changes.
//!
//! Samples a [`SnapshotSource`](deltabeat_core::SnapshotSource) on a fixed
//! period, diffs each sample against the previous one, and renders the
//! change twice: a sorted `key=value` line for the log stream and a fixed
//! six-key block for the status endpoint.
//!
//! # Architecture
//!
//! ```text
//! MetricsReporter
//!   ├── run() → tick every period until shutdown
//!   │     capture() → diff() → format_log_line()     → tracing
//!   │                        → format_status_block() → StatusBoard
//!   └── report_totals() → diff(Snapshot::empty(), capture())
//!
//! StatusBoard
//!   └── current() ← read by the status endpoint
//! ```

pub mod delta;
pub mod format;
pub mod reporter;
pub mod status;

pub use delta::{Delta, diff};
pub use format::{STATUS_KEYS, format_log_line, format_status_block, zero_status_block};
pub use reporter::{MetricsReporter, TickOutcome};
pub use status::StatusBoard;
