//! Log dump endpoint.

use axum::Router;
use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::get;

use crate::app_state::AppState;

/// `GET /logs` — Every status line recorded so far, one per line.
#[utoipa::path(
    get,
    path = "/logs",
    tag = "Logs",
    summary = "Dump the status log",
    description = "Returns every status line the probe recorded since startup, in order, newline-terminated.",
    responses(
        (status = 200, description = "Status log", body = String, content_type = "text/plain"),
    )
)]
pub async fn logs_handler(State(state): State<AppState>) -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/plain")], state.log.render())
}

/// Routes served in `logs` mode.
pub fn routes() -> Router<AppState> {
    Router::new().route("/logs", get(logs_handler))
}
