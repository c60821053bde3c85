use axum::Json;
use utoipa::OpenApi;

use crate::errors::{ErrorPayload, ReasonPayload};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Rho",
        version = "0.1.0",
        description = "Typed request parameter parsing with structured JSON error responses.",
    ),
    paths(
        crate::api::handlers::health,
        crate::api::handlers::get_uuid,
        crate::api::handlers::get_int,
        crate::api::handlers::get_uint,
        crate::api::handlers::get_float,
        crate::api::handlers::get_time,
    ),
    components(
        schemas(
            ErrorPayload,
            ReasonPayload,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "params", description = "Parameter parsing endpoints"),
    )
)]
pub struct ApiDoc;

/// Handler for /api-docs/openapi.json
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
