//! Translation of arbitrary errors into HTTP responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::error::Error;
use std::fmt;
use tracing::{debug, error};

use crate::errors::codes::{ERR_UNKNOWN, UNKNOWN_ERROR_MESSAGE};
use crate::errors::{ErrorPayload, ErrorResponse, StructuredError};
use crate::metrics::HTTP_ERRORS_TOTAL;

/// Capability of an error to describe its own HTTP response.
///
/// Anything that can produce a status and a structured body is sent as-is by
/// [`handle_err`]; everything else is reported as an unknown error.
pub trait AsResponse {
    fn as_response(&self) -> Option<(StatusCode, &StructuredError)>;
}

impl AsResponse for ErrorResponse {
    fn as_response(&self) -> Option<(StatusCode, &StructuredError)> {
        Some((self.status_code, &self.err))
    }
}

impl AsResponse for dyn Error + 'static {
    /// Finds the first [`ErrorResponse`] in the error's source chain
    fn as_response(&self) -> Option<(StatusCode, &StructuredError)> {
        let mut current: Option<&(dyn Error + 'static)> = Some(self);

        while let Some(err) = current {
            if let Some(response) = err.downcast_ref::<ErrorResponse>() {
                return response.as_response();
            }
            current = err.source();
        }

        None
    }
}

impl AsResponse for dyn Error + Send + Sync + 'static {
    fn as_response(&self) -> Option<(StatusCode, &StructuredError)> {
        (self as &(dyn Error + 'static)).as_response()
    }
}

/// Decide the status and payload for `err`
pub fn dispatch<E>(err: &E) -> (StatusCode, ErrorPayload)
where
    E: AsResponse + fmt::Display + ?Sized,
{
    match err.as_response() {
        Some((status, body)) => (status, body.to_payload()),
        None => {
            let unknown =
                StructuredError::new(ERR_UNKNOWN, UNKNOWN_ERROR_MESSAGE).wrap(err.to_string());
            (StatusCode::INTERNAL_SERVER_ERROR, unknown.to_payload())
        }
    }
}

/// Render `err` as a JSON error response
pub fn handle_err<E>(err: &E) -> Response
where
    E: AsResponse + fmt::Display + ?Sized,
{
    let (status, payload) = dispatch(err);

    if status.is_server_error() {
        error!(
            status = %status.as_u16(),
            code = payload.code,
            error = %err,
            "Request failed"
        );
    } else {
        debug!(
            status = %status.as_u16(),
            code = payload.code,
            message = %payload.message,
            "Request rejected"
        );
    }

    HTTP_ERRORS_TOTAL
        .with_label_values(&[status.as_str(), &payload.code.to_string()])
        .inc();

    (status, Json(payload)).into_response()
}

/// Error type for axum handlers.
///
/// Any error converts into it with `?`; responses are produced by
/// [`handle_err`].
#[derive(Debug)]
pub struct ApiError(anyhow::Error);

impl ApiError {
    pub fn into_inner(self) -> anyhow::Error {
        self.0
    }
}

impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err: &(dyn Error + Send + Sync + 'static) = &*self.0;
        handle_err(err)
    }
}
