//! HTTP layer: route handlers, OpenAPI document, and router composition.
//!
//! Which routes are mounted depends on [`ProbeMode`]: `logs` serves
//! `/logs`, `status` serves `/` and `/health`. The OpenAPI document is
//! served in both.

pub mod doc;
pub mod handlers;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;
use crate::config::ProbeMode;

/// Builds the router for `mode` without state.
pub fn build_router(mode: ProbeMode) -> Router<AppState> {
    Router::new()
        .merge(handlers::routes(mode))
        .merge(doc::routes())
}

/// Builds the complete application: routes, tracing layer, and state.
pub fn build_app(mode: ProbeMode, state: AppState) -> Router {
    build_router(mode)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
