//! Status endpoint handler.

use axum::extract::{OriginalUri, State};
use axum::http::{Method, StatusCode};
use axum::response::IntoResponse;
use tracing::trace;

use deltabeat_metrics::StatusBoard;

/// Any method, any path: the current status block as plain text.
pub async fn status(
    State(board): State<StatusBoard>,
    method: Method,
    OriginalUri(uri): OriginalUri,
) -> impl IntoResponse {
    trace!(%method, %uri, "status request");
    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        board.current(),
    )
}
