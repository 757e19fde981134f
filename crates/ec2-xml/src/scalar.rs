//! Lexical encoding and decoding of the XSD scalar types used by the EC2 schema.
//!
//! Parsers accept the full XSD lexical space (surrounding whitespace is
//! collapsed, booleans accept `1`/`0`); formatters emit the canonical form the
//! EC2 service itself produces, so encode-then-decode is lossless.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};

/// Decode an `xs:boolean` value.
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

/// Decode an `xs:int` value.
pub fn parse_i32(raw: &str) -> Option<i32> {
    raw.trim().parse().ok()
}

/// Decode an `xs:long` value.
pub fn parse_i64(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

/// Decode an `xs:double` value.
pub fn parse_f64(raw: &str) -> Option<f64> {
    raw.trim().parse().ok()
}

/// Decode an `xs:dateTime` value, normalizing any zone offset to UTC.
///
/// A missing offset is interpreted as UTC, which is how the EC2 service has
/// always emitted timestamps.
pub fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Encode an `xs:boolean` value.
pub fn format_bool(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

/// Encode an `xs:int` value.
pub fn format_i32(value: i32) -> String {
    value.to_string()
}

/// Encode an `xs:long` value.
pub fn format_i64(value: i64) -> String {
    value.to_string()
}

/// Encode an `xs:double` value. NaN and infinities have no wire form here;
/// the EC2 schema never transmits them.
pub fn format_f64(value: f64) -> Option<String> {
    value.is_finite().then(|| value.to_string())
}

/// Encode an `xs:dateTime` value in the service's canonical form:
/// millisecond precision with a `Z` suffix (`2012-08-15T08:30:00.000Z`).
pub fn format_datetime(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn bool_lexical_space() {
        assert_eq!(parse_bool("true"), Some(true));
        assert_eq!(parse_bool("1"), Some(true));
        assert_eq!(parse_bool("false"), Some(false));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool(" true "), Some(true));
        assert_eq!(parse_bool("TRUE"), None);
        assert_eq!(parse_bool(""), None);
    }

    #[test]
    fn int_parsing() {
        assert_eq!(parse_i32("42"), Some(42));
        assert_eq!(parse_i32("-1"), Some(-1));
        assert_eq!(parse_i32(" 16 "), Some(16));
        assert_eq!(parse_i32("4.5"), None);
        assert_eq!(parse_i32("2147483648"), None);
        assert_eq!(parse_i64("9223372036854775807"), Some(i64::MAX));
    }

    #[test]
    fn double_parsing() {
        assert_eq!(parse_f64("1.5"), Some(1.5));
        assert_eq!(parse_f64("-0.25"), Some(-0.25));
        assert_eq!(parse_f64("abc"), None);
    }

    #[test]
    fn double_formatting_rejects_non_finite() {
        assert_eq!(format_f64(1.5).as_deref(), Some("1.5"));
        assert_eq!(format_f64(f64::NAN), None);
        assert_eq!(format_f64(f64::INFINITY), None);
    }

    #[test]
    fn datetime_roundtrip() {
        let instant = Utc.with_ymd_and_hms(2012, 8, 15, 8, 30, 0).unwrap();
        let encoded = format_datetime(&instant);
        assert_eq!(encoded, "2012-08-15T08:30:00.000Z");
        assert_eq!(parse_datetime(&encoded), Some(instant));
    }

    #[test]
    fn datetime_accepts_offsets_and_naive() {
        let utc = Utc.with_ymd_and_hms(2012, 8, 15, 6, 30, 0).unwrap();
        assert_eq!(parse_datetime("2012-08-15T08:30:00+02:00"), Some(utc));
        assert_eq!(parse_datetime("2012-08-15T06:30:00"), Some(utc));
        let millis = parse_datetime("2012-08-15T06:30:00.500").expect("fractional seconds");
        assert_eq!(format_datetime(&millis), "2012-08-15T06:30:00.500Z");
        assert_eq!(parse_datetime("not a date"), None);
    }
}
