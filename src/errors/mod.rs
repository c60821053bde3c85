//! Structured, chainable errors and their HTTP response form

pub mod codes;
pub mod response;
pub mod structured;

pub use codes::{Code, ERR_CODE_PARAM_INVALID, ERR_CODE_PARAM_REQUIRED, ERR_UNKNOWN};
pub use response::ErrorResponse;
pub use structured::{BoxError, ErrorPayload, ReasonPayload, StructuredError};
