use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::num::{parse_float, parse_int, parse_uint};
use super::time::parse_time;
use super::ParamSource;
use crate::errors::ErrorResponse;

const NO_DETAILS: [&str; 0] = [];

fn required<'a, S>(src: &'a S, key: &str) -> Result<&'a str, ErrorResponse>
where
    S: ParamSource + ?Sized,
{
    match src.param(key) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ErrorResponse::param_required(key)),
    }
}

/// Read parameter `key` as a UUID
pub fn param_uuid<S>(src: &S, key: &str) -> Result<Uuid, ErrorResponse>
where
    S: ParamSource + ?Sized,
{
    let raw = required(src, key)?;
    Uuid::parse_str(raw).map_err(|err| ErrorResponse::param_invalid(key, "UUID", err, NO_DETAILS))
}

/// Read parameter `key` as a UUID, falling back to `value`
pub fn param_uuid_or_value<S>(src: &S, key: &str, value: Uuid) -> Uuid
where
    S: ParamSource + ?Sized,
{
    param_uuid(src, key).unwrap_or(value)
}

/// Read parameter `key` as a UUID, falling back to the nil UUID
pub fn param_uuid_or_nil<S>(src: &S, key: &str) -> Uuid
where
    S: ParamSource + ?Sized,
{
    param_uuid_or_value(src, key, Uuid::nil())
}

/// Read parameter `key` as a signed integer of the given base and bit size
pub fn param_int<S>(src: &S, key: &str, base: u32, bit_size: u32) -> Result<i64, ErrorResponse>
where
    S: ParamSource + ?Sized,
{
    let raw = required(src, key)?;
    parse_int(raw, base, bit_size)
        .map_err(|err| ErrorResponse::param_invalid(key, "integer number", err, NO_DETAILS))
}

/// Read parameter `key` as a signed integer, falling back to `value`
pub fn param_int_or_value<S>(src: &S, key: &str, base: u32, bit_size: u32, value: i64) -> i64
where
    S: ParamSource + ?Sized,
{
    param_int(src, key, base, bit_size).unwrap_or(value)
}

/// Read parameter `key` as an unsigned integer of the given base and bit size
pub fn param_uint<S>(src: &S, key: &str, base: u32, bit_size: u32) -> Result<u64, ErrorResponse>
where
    S: ParamSource + ?Sized,
{
    let raw = required(src, key)?;
    parse_uint(raw, base, bit_size).map_err(|err| {
        ErrorResponse::param_invalid(key, "unsigned integer number", err, NO_DETAILS)
    })
}

/// Read parameter `key` as an unsigned integer, falling back to `value`
pub fn param_uint_or_value<S>(src: &S, key: &str, base: u32, bit_size: u32, value: u64) -> u64
where
    S: ParamSource + ?Sized,
{
    param_uint(src, key, base, bit_size).unwrap_or(value)
}

/// Read parameter `key` as a float of the given bit size
pub fn param_float<S>(src: &S, key: &str, bit_size: u32) -> Result<f64, ErrorResponse>
where
    S: ParamSource + ?Sized,
{
    let raw = required(src, key)?;
    parse_float(raw, bit_size)
        .map_err(|err| ErrorResponse::param_invalid(key, "float number", err, NO_DETAILS))
}

/// Read parameter `key` as a float, falling back to `value`
pub fn param_float_or_value<S>(src: &S, key: &str, bit_size: u32, value: f64) -> f64
where
    S: ParamSource + ?Sized,
{
    param_float(src, key, bit_size).unwrap_or(value)
}

/// Read parameter `key` as a timestamp in the chrono `format`
pub fn param_time<S>(src: &S, key: &str, format: &str) -> Result<DateTime<Utc>, ErrorResponse>
where
    S: ParamSource + ?Sized,
{
    let raw = required(src, key)?;
    parse_time(raw, format).map_err(|err| {
        let info = format!("Expected date time format '{}'", format);
        ErrorResponse::param_invalid(key, "date time", err, [info])
    })
}

/// Read parameter `key` as a timestamp, falling back to `value`
pub fn param_time_or_value<S>(
    src: &S,
    key: &str,
    format: &str,
    value: DateTime<Utc>,
) -> DateTime<Utc>
where
    S: ParamSource + ?Sized,
{
    param_time(src, key, format).unwrap_or(value)
}
