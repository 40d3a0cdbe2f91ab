//! OpenAPI document for the probe's HTTP surface.

use axum::Router;
use utoipa::OpenApi;

use super::handlers;
use crate::app_state::AppState;
use crate::domain::{SmokeOutcome, TestRow, UpsertAction};

/// Path the OpenAPI JSON document is served at.
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

/// Aggregated OpenAPI description of every route either mode can serve.
#[derive(Debug, OpenApi)]
#[openapi(
    paths(
        handlers::logs::logs_handler,
        handlers::status::status_page_handler,
        handlers::system::health_handler,
    ),
    components(schemas(handlers::system::HealthResponse, SmokeOutcome, TestRow, UpsertAction)),
    tags(
        (name = "Logs", description = "Status log dump (`logs` mode)"),
        (name = "Status", description = "Smoke-test status page (`status` mode)"),
        (name = "System", description = "Health check (`status` mode)"),
    )
)]
pub struct ApiDoc;

/// Serves the OpenAPI document and, with `swagger-ui`, the Swagger UI.
#[cfg(feature = "swagger-ui")]
pub fn routes() -> Router<AppState> {
    use utoipa_swagger_ui::SwaggerUi;

    Router::new().merge(SwaggerUi::new("/swagger-ui").url(OPENAPI_PATH, ApiDoc::openapi()))
}

/// Serves the OpenAPI document.
#[cfg(not(feature = "swagger-ui"))]
pub fn routes() -> Router<AppState> {
    use axum::Json;
    use axum::routing::get;

    Router::new().route(OPENAPI_PATH, get(|| async { Json(ApiDoc::openapi()) }))
}
