//! Common types

use chrono::{NaiveDate, ParseError, Utc};

use crate::constants::DATE_FORMAT;

/// Primary key type shared by every table.
pub type EntityId = i64;

/// Current calendar date (UTC). Contract expiry is evaluated against this.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

pub fn parse_date(s: &str) -> Result<NaiveDate, ParseError> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_form_dates() {
        let date = parse_date("2024-01-10").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
        assert_eq!(format_date(date), "2024-01-10");
    }

    #[test]
    fn rejects_other_formats() {
        assert!(parse_date("10/01/2024").is_err());
        assert!(parse_date("2024-13-01").is_err());
        assert!(parse_date("").is_err());
    }
}
