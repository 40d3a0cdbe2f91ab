//! Status page showing the smoke-test row captured at startup.

use axum::Router;
use axum::extract::State;
use axum::response::{Html, IntoResponse};
use axum::routing::get;

use crate::app_state::AppState;
use crate::domain::SmokeOutcome;

/// `GET /` — HTML page with the last smoke-test result.
#[utoipa::path(
    get,
    path = "/",
    tag = "Status",
    summary = "Smoke-test status page",
    description = "Renders the id, name and creation time of the test row read back during startup.",
    responses(
        (status = 200, description = "Status page", body = String, content_type = "text/html"),
    )
)]
pub async fn status_page_handler(State(state): State<AppState>) -> impl IntoResponse {
    Html(render_status_page(state.smoke.as_deref()))
}

/// Status page route.
pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(status_page_handler))
}

/// Renders the status page for an optional outcome.
#[must_use]
pub fn render_status_page(outcome: Option<&SmokeOutcome>) -> String {
    let body = match outcome {
        Some(outcome) => format!(
            "<p class=\"ok\">Connected to SQL Server and completed the smoke test.</p>\n\
             <table>\n\
             <tr><th>ID</th><td>{}</td></tr>\n\
             <tr><th>Name</th><td>{}</td></tr>\n\
             <tr><th>Created At</th><td>{}</td></tr>\n\
             <tr><th>Write</th><td>{}</td></tr>\n\
             </table>",
            outcome.row.id,
            escape_html(&outcome.row.name),
            outcome.row.created_at.format("%Y-%m-%d %H:%M:%S"),
            outcome.action.as_str(),
        ),
        None => "<p class=\"warn\">No smoke-test result was captured.</p>".to_string(),
    };

    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head><meta charset=\"utf-8\"><title>MSSQL Probe</title></head>\n\
         <body>\n\
         <h1>MSSQL Connection Test</h1>\n\
         {body}\n\
         </body>\n\
         </html>\n"
    )
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
