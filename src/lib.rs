//! Structured HTTP errors, error-to-response dispatch and typed request
//! parameter extraction for axum services.

pub mod api;
pub mod config;
pub mod dispatch;
pub mod errors;
pub mod metrics;
pub mod params;

pub use dispatch::{dispatch, handle_err, ApiError, AsResponse};
pub use errors::{ErrorPayload, ErrorResponse, StructuredError};
