//! Date/time text handling shared by the reader and the writer.
//!
//! Both directions go through this module so every date value written out
//! re-reads to exactly the same kind and instant.

use crate::Value;
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat};

const DATE_FORMAT: &str = "%Y-%m-%d";
const LOCAL_DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Parses a date lexeme, trying the richest form first: offset date-time,
/// then local date-time, then date-only.
pub(crate) fn parse(lexeme: &str) -> Option<Value> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(lexeme) {
        return Some(Value::OffsetDateTime(dt));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(lexeme, LOCAL_DATE_TIME_FORMAT) {
        return Some(Value::DateTime(dt));
    }
    NaiveDate::parse_from_str(lexeme, DATE_FORMAT)
        .ok()
        .map(Value::Date)
}

/// Formats a date value; `None` for every other kind.
pub(crate) fn format(value: &Value) -> Option<String> {
    match value {
        Value::Date(d) => Some(d.format(DATE_FORMAT).to_string()),
        Value::DateTime(dt) => Some(dt.format(LOCAL_DATE_TIME_FORMAT).to_string()),
        Value::OffsetDateTime(dt) => Some(dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_precedence() {
        assert!(matches!(parse("2015-03-20"), Some(Value::Date(_))));
        assert!(matches!(parse("2015-03-20T19:04:35"), Some(Value::DateTime(_))));
        assert!(matches!(
            parse("2015-03-20T19:04:35+01:00"),
            Some(Value::OffsetDateTime(_))
        ));
        assert!(matches!(
            parse("1979-05-27T07:32:00Z"),
            Some(Value::OffsetDateTime(_))
        ));
        assert!(parse("2015-13-40").is_none());
        assert!(parse("19:04:35").is_none());
    }

    #[test]
    fn test_format_round_trips() {
        for text in [
            "2015-03-20",
            "2015-03-20T19:04:35",
            "2015-03-20T19:04:35.250",
            "2015-03-20T19:04:35+01:00",
            "1979-05-27T07:32:00Z",
            "1979-05-27T00:32:00.999999-07:00",
        ] {
            let value = parse(text).unwrap();
            assert_eq!(format(&value).as_deref(), Some(text));
        }
    }

    #[test]
    fn test_format_non_date() {
        assert_eq!(format(&Value::from(1)), None);
    }
}
