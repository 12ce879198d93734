//! Date token parsing.

use chrono::NaiveDate;

use crate::{Result, TimelineError};

/// Parse a date token in either compact (`YYYYMMDD`) or ISO (`YYYY-MM-DD`) form.
///
/// Any other shape, or a calendar-invalid date, is a [`TimelineError::MalformedDate`].
pub fn parse_date_token(token: &str) -> Result<NaiveDate> {
    let trimmed = token.trim();
    let bytes = trimmed.as_bytes();

    let format = match bytes.len() {
        8 if bytes.iter().all(u8::is_ascii_digit) => "%Y%m%d",
        10 if bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        }) =>
        {
            "%Y-%m-%d"
        }
        _ => return Err(TimelineError::malformed_date(token)),
    };

    NaiveDate::parse_from_str(trimmed, format).map_err(|_| TimelineError::malformed_date(token))
}

/// Render a date as `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_compact() {
        assert_eq!(parse_date_token("20240501").unwrap(), ymd(2024, 5, 1));
    }

    #[test]
    fn test_parse_iso() {
        assert_eq!(parse_date_token("2024-05-01").unwrap(), ymd(2024, 5, 1));
        assert_eq!(parse_date_token(" 2024-12-31 ").unwrap(), ymd(2024, 12, 31));
    }

    #[test]
    fn test_rejects_other_shapes() {
        for token in ["2024-5-01", "2024/05/01", "240501", "202405011", "", "May 1 2024", "+2024-05-1"] {
            assert!(
                matches!(parse_date_token(token), Err(TimelineError::MalformedDate { .. })),
                "expected {token:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_rejects_impossible_dates() {
        assert!(parse_date_token("20240231").is_err());
        assert!(parse_date_token("2023-02-29").is_err());
        assert!(parse_date_token("2024-02-29").is_ok());
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(ymd(2024, 5, 1)), "2024-05-01");
        assert_eq!(
            format_date(parse_date_token("20240501").unwrap()),
            format_date(parse_date_token("2024-05-01").unwrap())
        );
    }
}
