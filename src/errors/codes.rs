/// Application error code carried by [`StructuredError`](super::StructuredError).
///
/// These are not HTTP status codes. Applications are free to mint their own.
pub type Code = i32;

/// Reserved code for errors the dispatcher does not recognize
pub const ERR_UNKNOWN: Code = 0;

/// The request parameter is missing
pub const ERR_CODE_PARAM_REQUIRED: Code = 20101;

/// The request parameter is present but its value cannot be parsed
pub const ERR_CODE_PARAM_INVALID: Code = 20102;

/// Message used for errors the dispatcher does not recognize
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown Error";
