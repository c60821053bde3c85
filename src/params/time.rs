use chrono::{
    format::ParseErrorKind, DateTime, NaiveDate, NaiveDateTime, NaiveTime, ParseError, TimeZone,
    Utc,
};

/// RFC 3339 timestamps, e.g. `2024-01-31T10:00:00Z`
pub const RFC3339: &str = "%+";

/// Calendar dates, e.g. `2024-01-31`
pub const DATE: &str = "%Y-%m-%d";

/// Parse `input` with a chrono `format` string.
///
/// Formats without an offset are read as UTC; date-only formats resolve to
/// midnight.
pub fn parse_time(input: &str, format: &str) -> Result<DateTime<Utc>, ParseError> {
    let err = match DateTime::parse_from_str(input, format) {
        Ok(value) => return Ok(value.with_timezone(&Utc)),
        Err(err) if err.kind() != ParseErrorKind::NotEnough => return Err(err),
        Err(err) => err,
    };

    match NaiveDateTime::parse_from_str(input, format) {
        Ok(value) => return Ok(Utc.from_utc_datetime(&value)),
        Err(next) if next.kind() != ParseErrorKind::NotEnough => return Err(next),
        Err(_) => {}
    }

    match NaiveDate::parse_from_str(input, format) {
        Ok(date) => Ok(Utc.from_utc_datetime(&date.and_time(NaiveTime::default()))),
        Err(_) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_parse_rfc3339() {
        let value = parse_time("2024-01-31T10:00:00+02:00", RFC3339).unwrap();
        assert_eq!(value.to_rfc3339(), "2024-01-31T08:00:00+00:00");

        let value = parse_time("2024-01-31T10:00:00.250Z", RFC3339).unwrap();
        assert_eq!(value.timestamp_subsec_millis(), 250);
    }

    #[test]
    fn test_parse_without_offset_is_utc() {
        let value = parse_time("2024-01-31 10:30", "%Y-%m-%d %H:%M").unwrap();
        assert_eq!(value.to_rfc3339(), "2024-01-31T10:30:00+00:00");
    }

    #[test]
    fn test_parse_date_only_is_midnight() {
        let value = parse_time("2024-02-29", DATE).unwrap();
        assert_eq!(value.day(), 29);
        assert_eq!(value.to_rfc3339(), "2024-02-29T00:00:00+00:00");
    }

    #[test]
    fn test_parse_invalid() {
        assert!(parse_time("yesterday", DATE).is_err());
        assert!(parse_time("2023-02-29", DATE).is_err());
        assert!(parse_time("2024-01-31", RFC3339).is_err());
    }
}
