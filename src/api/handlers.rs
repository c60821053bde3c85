use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::{IntoResponse, Json},
};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::dispatch::ApiError;
use crate::errors::{Code, ErrorPayload, ErrorResponse, StructuredError};
use crate::params::{
    param_float, param_int, param_time, param_uint, param_uint_or_value, param_uuid, ParamSource,
    RequestParams, RFC3339,
};

/// No route matched the request path
pub const ERR_CODE_ROUTE_NOT_FOUND: Code = 10404;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub instance_id: String,
}

/// Base and bit size overrides read from the query string
fn int_options(params: &RequestParams) -> (u32, u32) {
    let base = param_uint_or_value(params, "base", 10, 32, 10) as u32;
    let bits = param_uint_or_value(params, "bits", 10, 32, 64) as u32;
    (base, bits)
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = serde_json::Value)
    )
)]
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "service": "rho",
        "version": env!("CARGO_PKG_VERSION"),
        "instance_id": state.instance_id,
    }))
}

/// Parse a UUID path parameter
#[utoipa::path(
    get,
    path = "/uuid/{id}",
    tag = "params",
    params(
        ("id" = String, Path, description = "UUID to parse")
    ),
    responses(
        (status = 200, description = "Parsed value", body = serde_json::Value),
        (status = 422, description = "Value is not a UUID", body = ErrorPayload)
    )
)]
pub async fn get_uuid(params: RequestParams) -> Result<Json<Value>, ApiError> {
    let value = param_uuid(&params, "id")?;
    Ok(Json(json!({ "value": value })))
}

/// Parse a signed integer path parameter
#[utoipa::path(
    get,
    path = "/int/{value}",
    tag = "params",
    params(
        ("value" = String, Path, description = "Integer to parse"),
        ("base" = Option<u32>, Query, description = "Numeric base, 0 infers from prefix (default: 10)"),
        ("bits" = Option<u32>, Query, description = "Bit size (default: 64)")
    ),
    responses(
        (status = 200, description = "Parsed value", body = serde_json::Value),
        (status = 422, description = "Value is not an integer", body = ErrorPayload)
    )
)]
pub async fn get_int(params: RequestParams) -> Result<Json<Value>, ApiError> {
    let (base, bits) = int_options(&params);
    let value = param_int(&params, "value", base, bits)?;
    Ok(Json(json!({ "value": value })))
}

/// Parse an unsigned integer path parameter
#[utoipa::path(
    get,
    path = "/uint/{value}",
    tag = "params",
    params(
        ("value" = String, Path, description = "Unsigned integer to parse"),
        ("base" = Option<u32>, Query, description = "Numeric base, 0 infers from prefix (default: 10)"),
        ("bits" = Option<u32>, Query, description = "Bit size (default: 64)")
    ),
    responses(
        (status = 200, description = "Parsed value", body = serde_json::Value),
        (status = 422, description = "Value is not an unsigned integer", body = ErrorPayload)
    )
)]
pub async fn get_uint(params: RequestParams) -> Result<Json<Value>, ApiError> {
    let (base, bits) = int_options(&params);
    let value = param_uint(&params, "value", base, bits)?;
    Ok(Json(json!({ "value": value })))
}

/// Parse a float path parameter
#[utoipa::path(
    get,
    path = "/float/{value}",
    tag = "params",
    params(
        ("value" = String, Path, description = "Float to parse"),
        ("bits" = Option<u32>, Query, description = "Bit size, 32 or 64 (default: 64)")
    ),
    responses(
        (status = 200, description = "Parsed value", body = serde_json::Value),
        (status = 422, description = "Value is not a float", body = ErrorPayload)
    )
)]
pub async fn get_float(params: RequestParams) -> Result<Json<Value>, ApiError> {
    let bits = param_uint_or_value(&params, "bits", 10, 32, 64) as u32;
    let value = param_float(&params, "value", bits)?;
    Ok(Json(json!({ "value": value })))
}

/// Parse a timestamp path parameter
#[utoipa::path(
    get,
    path = "/time/{value}",
    tag = "params",
    params(
        ("value" = String, Path, description = "Timestamp to parse"),
        ("format" = Option<String>, Query, description = "chrono format string (default: RFC 3339)")
    ),
    responses(
        (status = 200, description = "Parsed value", body = serde_json::Value),
        (status = 422, description = "Value does not match the format", body = ErrorPayload)
    )
)]
pub async fn get_time(params: RequestParams) -> Result<Json<Value>, ApiError> {
    let format = params.param("format").unwrap_or(RFC3339);
    let value = param_time(&params, "value", format)?;
    Ok(Json(json!({ "value": value.to_rfc3339() })))
}

/// Fallback for unmatched routes
pub async fn not_found(uri: Uri) -> ErrorResponse {
    ErrorResponse::new(
        StatusCode::NOT_FOUND,
        StructuredError::with_details(
            ERR_CODE_ROUTE_NOT_FOUND,
            "Route not found",
            [format!("No route for '{}'", uri.path())],
        ),
    )
}
