use chrono::{DateTime, NaiveDate};
use serde::Deserialize;

/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp (the calendar date is kept).
pub fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    let trimmed = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }

    DateTime::parse_from_rfc3339(trimmed)
        .map(|timestamp| timestamp.date_naive())
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD or RFC 3339 ({err})"))
}

pub fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_dates_and_timestamps() {
        let expected = NaiveDate::from_ymd_opt(2025, 10, 1).expect("valid date");
        assert_eq!(parse_date("2025-10-01"), Ok(expected));
        assert_eq!(parse_date(" 2025-10-01T09:30:00Z "), Ok(expected));
        assert_eq!(parse_date("2025-10-01T23:30:00+02:00"), Ok(expected));
    }

    #[test]
    fn rejects_garbage() {
        let err = parse_date("next tuesday").expect_err("not a date");
        assert!(err.contains("next tuesday"));
    }
}
