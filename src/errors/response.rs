use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::error::Error;
use std::fmt;

use super::codes::{ERR_CODE_PARAM_INVALID, ERR_CODE_PARAM_REQUIRED};
use super::structured::{BoxError, StructuredError};

/// A [`StructuredError`] paired with the HTTP status it should be sent with
#[derive(Debug)]
pub struct ErrorResponse {
    /// HTTP status used verbatim by the dispatcher
    pub status_code: StatusCode,
    /// Body of the response
    pub err: StructuredError,
}

impl ErrorResponse {
    pub fn new(status_code: StatusCode, err: StructuredError) -> Self {
        Self { status_code, err }
    }

    /// 400 response for a missing request parameter
    pub fn param_required(key: &str) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            StructuredError::new(
                ERR_CODE_PARAM_REQUIRED,
                format!("Parameter '{}' is required", key),
            ),
        )
    }

    /// 422 response for a request parameter that failed to parse
    pub fn param_invalid<I>(key: &str, type_name: &str, err: impl Into<BoxError>, details: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let message = format!("Parameter '{}' is not valid {}", key, type_name);
        Self::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            StructuredError::with_details(ERR_CODE_PARAM_INVALID, message, details).wrap(err),
        )
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.err, f)
    }
}

impl Error for ErrorResponse {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.err)
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        crate::dispatch::handle_err(&self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_delegates_to_body() {
        let err = ErrorResponse::new(StatusCode::BAD_GATEWAY, StructuredError::new(1, "Oh no!"));
        assert_eq!(err.to_string(), StructuredError::new(1, "Oh no!").to_string());
    }

    #[test]
    fn test_param_required() {
        let err = ErrorResponse::param_required("id");
        assert_eq!(err.status_code, StatusCode::BAD_REQUEST);
        assert_eq!(err.err.code(), ERR_CODE_PARAM_REQUIRED);
        assert_eq!(err.err.message(), "Parameter 'id' is required");
        assert!(err.err.reason().is_none());
    }

    #[test]
    fn test_param_invalid() {
        let err = ErrorResponse::param_invalid(
            "at",
            "date time",
            "bad input",
            ["Expected date time format '%Y'"],
        );
        assert_eq!(err.status_code, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.err.code(), ERR_CODE_PARAM_INVALID);
        assert_eq!(err.err.message(), "Parameter 'at' is not valid date time");
        assert_eq!(err.err.details(), ["Expected date time format '%Y'"]);
        assert_eq!(err.err.reason().unwrap().to_string(), "bad input");
    }

    #[test]
    fn test_into_response_uses_status() {
        let response =
            ErrorResponse::new(StatusCode::BAD_GATEWAY, StructuredError::new(1, "Oh no!"))
                .into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
