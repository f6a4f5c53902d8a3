//! deltabeat-api — status endpoint for deltabeat.
//!
//! Serves the most recent status block published by the metrics reporter.
//! There is a single catch-all route: every path and every method gets the
//! same plain-text body.
//!
//! ```text
//! $ curl localhost:9090/anything
//! libbeat.logstash.call_count.PublishEvents: 0
//! libbeat.logstash.publish.read_bytes: 0
//! ...
//! ```

pub mod handlers;

use axum::Router;
use deltabeat_metrics::StatusBoard;

/// Build the status router.
pub fn build_router(board: StatusBoard) -> Router {
    Router::new()
        .fallback(handlers::status)
        .with_state(board)
}
