pub mod middleware;
pub mod registry;

use axum::{
    http::header,
    response::{IntoResponse, Response},
};
use prometheus::{Encoder, TextEncoder, TEXT_FORMAT};

use crate::dispatch::ApiError;

/// Handler for the /metrics endpoint, in Prometheus exposition format
pub async fn metrics_handler() -> Result<Response, ApiError> {
    let mut buffer = Vec::new();
    TextEncoder::new().encode(&prometheus::gather(), &mut buffer)?;

    Ok(([(header::CONTENT_TYPE, TEXT_FORMAT)], buffer).into_response())
}

pub use registry::{HTTP_ERRORS_TOTAL, HTTP_REQUESTS_TOTAL, HTTP_REQUEST_DURATION_SECONDS};
