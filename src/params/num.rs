//! Numeric parsing with configurable base and bit size

use thiserror::Error;

/// Failure to parse a numeric parameter value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NumError {
    #[error("{func}: parsing {input:?}: invalid syntax")]
    Syntax { func: &'static str, input: String },

    #[error("{func}: parsing {input:?}: value out of range")]
    Range { func: &'static str, input: String },

    #[error("{func}: parsing {input:?}: invalid base {base}")]
    InvalidBase {
        func: &'static str,
        input: String,
        base: u32,
    },

    #[error("{func}: parsing {input:?}: invalid bit size {bit_size}")]
    InvalidBitSize {
        func: &'static str,
        input: String,
        bit_size: u32,
    },
}

const PARSE_INT: &str = "parse_int";
const PARSE_UINT: &str = "parse_uint";
const PARSE_FLOAT: &str = "parse_float";

/// Parse a signed integer.
///
/// `base` 0 infers the base from the prefix (`0x`, `0o`, `0b`, or a leading
/// `0` for octal, decimal otherwise) and permits `_` between digits; otherwise
/// it must be in 2..=36. `bit_size` 0 means 64, otherwise the value must fit in that many
/// bits.
pub fn parse_int(input: &str, base: u32, bit_size: u32) -> Result<i64, NumError> {
    let bits = bit_size_or_default(PARSE_INT, input, bit_size)?;

    let (negative, unsigned) = match input.as_bytes().first() {
        Some(b'-') => (true, &input[1..]),
        Some(b'+') => (false, &input[1..]),
        _ => (false, input),
    };

    let magnitude = parse_magnitude(PARSE_INT, input, unsigned, base)?;

    let cutoff = 1u64 << (bits - 1);
    if (!negative && magnitude >= cutoff) || (negative && magnitude > cutoff) {
        return Err(NumError::Range {
            func: PARSE_INT,
            input: input.to_string(),
        });
    }

    let value = magnitude as i64;
    Ok(if negative { value.wrapping_neg() } else { value })
}

/// Parse an unsigned integer. Signs are rejected; see [`parse_int`] for the
/// meaning of `base` and `bit_size`.
pub fn parse_uint(input: &str, base: u32, bit_size: u32) -> Result<u64, NumError> {
    let bits = bit_size_or_default(PARSE_UINT, input, bit_size)?;
    let value = parse_magnitude(PARSE_UINT, input, input, base)?;

    let max = if bits == 64 { u64::MAX } else { (1u64 << bits) - 1 };
    if value > max {
        return Err(NumError::Range {
            func: PARSE_UINT,
            input: input.to_string(),
        });
    }

    Ok(value)
}

/// Parse a floating point number. A `bit_size` of 32 rounds through `f32`,
/// anything else parses as `f64`.
pub fn parse_float(input: &str, bit_size: u32) -> Result<f64, NumError> {
    let syntax = || NumError::Syntax {
        func: PARSE_FLOAT,
        input: input.to_string(),
    };

    let value = if bit_size == 32 {
        input.parse::<f32>().map_err(|_| syntax())? as f64
    } else {
        input.parse::<f64>().map_err(|_| syntax())?
    };

    // Overflow parses to infinity instead of failing
    if value.is_infinite() && !names_infinity(input) {
        return Err(NumError::Range {
            func: PARSE_FLOAT,
            input: input.to_string(),
        });
    }

    Ok(value)
}

fn names_infinity(input: &str) -> bool {
    let unsigned = input.trim_start_matches(['+', '-']);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

fn bit_size_or_default(func: &'static str, input: &str, bit_size: u32) -> Result<u32, NumError> {
    match bit_size {
        0 => Ok(64),
        1..=64 => Ok(bit_size),
        _ => Err(NumError::InvalidBitSize {
            func,
            input: input.to_string(),
            bit_size,
        }),
    }
}

/// Split off a base prefix when `base` is 0. The flag is set when a prefix
/// was removed.
fn resolve_base(digits: &str, base: u32) -> (&str, u32, bool) {
    if base != 0 {
        return (digits, base, false);
    }

    let bytes = digits.as_bytes();
    if bytes.len() > 2 && bytes[0] == b'0' {
        match bytes[1].to_ascii_lowercase() {
            b'x' => return (&digits[2..], 16, true),
            b'o' => return (&digits[2..], 8, true),
            b'b' => return (&digits[2..], 2, true),
            _ => {}
        }
    }

    if bytes.len() > 1 && bytes[0] == b'0' {
        return (&digits[1..], 8, true);
    }

    (digits, 10, false)
}

fn parse_magnitude(
    func: &'static str,
    input: &str,
    digits: &str,
    base: u32,
) -> Result<u64, NumError> {
    let syntax = || NumError::Syntax {
        func,
        input: input.to_string(),
    };

    if base != 0 && !(2..=36).contains(&base) {
        return Err(NumError::InvalidBase {
            func,
            input: input.to_string(),
            base,
        });
    }

    let underscores = base == 0;
    let (digits, base, prefixed) = resolve_base(digits, base);
    if digits.is_empty() {
        return Err(syntax());
    }

    // Separators only between digits, or right after a base prefix
    if digits.contains('_')
        && (!underscores
            || (!prefixed && digits.starts_with('_'))
            || digits.ends_with('_')
            || digits.contains("__"))
    {
        return Err(syntax());
    }

    let mut value: u64 = 0;
    let mut overflow = false;
    for ch in digits.chars().filter(|&ch| ch != '_') {
        let digit = ch.to_digit(base).ok_or_else(syntax)?;
        match value
            .checked_mul(base as u64)
            .and_then(|v| v.checked_add(digit as u64))
        {
            Some(next) => value = next,
            // Keep scanning so syntax errors win over range errors
            None => overflow = true,
        }
    }

    if overflow {
        return Err(NumError::Range {
            func,
            input: input.to_string(),
        });
    }

    Ok(value)
}
