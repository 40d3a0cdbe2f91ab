//! System endpoints: health check.

use axum::Router;
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::get;
use serde::Serialize;
use utoipa::ToSchema;

use crate::app_state::AppState;

/// Exact body served by `GET /health`.
///
/// Static: it is not re-checked against the database per request, so it
/// keeps reporting `connected` after connectivity is lost.
pub const HEALTH_BODY: &str = r#"{"status":"healthy","database":"connected","message":"Successfully connected to MSSQL and completed smoke test"}"#;

/// Health check response shape, as documented in OpenAPI.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Always `"healthy"`.
    pub status: String,
    /// Always `"connected"`.
    pub database: String,
    /// Fixed human-readable message.
    pub message: String,
}

/// `GET /health` — Static service health status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns a fixed healthy status. The database is checked only once, at startup.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        HEALTH_BODY,
    )
}

/// System routes mounted at the root level.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_handler))
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn documented_shape_matches_literal_body() {
        let documented = HealthResponse {
            status: "healthy".to_string(),
            database: "connected".to_string(),
            message: "Successfully connected to MSSQL and completed smoke test".to_string(),
        };
        let Ok(json) = serde_json::to_string(&documented) else {
            panic!("health response must serialize");
        };
        assert_eq!(json, HEALTH_BODY);
    }
}
