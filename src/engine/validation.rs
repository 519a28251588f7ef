//! Input validation for the guided query flow
//!
//! Pure functions; the engine supplies the current date and horizon so the
//! rules stay testable without a clock.

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::utils::errors::{TransitBuddyError, Result};

static DATE_PATTERN: OnceLock<Regex> = OnceLock::new();

fn date_pattern() -> &'static Regex {
    DATE_PATTERN.get_or_init(|| Regex::new(r"^\d{2}\.\d{2}\.\d{4}$").expect("valid date pattern"))
}

/// Last accepted travel date for a horizon year
pub fn horizon_end(year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, 12, 31).unwrap_or(NaiveDate::MAX)
}

/// Validate a `DD.MM.YYYY` travel date.
///
/// Accepts only well-formed calendar dates from `today` through `horizon_end`
/// inclusive.
pub fn validate_date(text: &str, today: NaiveDate, horizon_end: NaiveDate) -> Result<NaiveDate> {
    if !date_pattern().is_match(text) {
        return Err(TransitBuddyError::InvalidInput(format!(
            "date {:?} is not in DD.MM.YYYY format",
            text
        )));
    }

    let date = NaiveDate::parse_from_str(text, "%d.%m.%Y").map_err(|_| {
        TransitBuddyError::InvalidInput(format!("{:?} is not a calendar date", text))
    })?;

    if date < today || date > horizon_end {
        return Err(TransitBuddyError::InvalidInput(format!(
            "date {} is outside the supported window",
            date
        )));
    }

    Ok(date)
}

/// Parse a 1-based ordinal into a list of `len` route threads
pub fn parse_route_ordinal(text: &str, len: usize) -> Option<usize> {
    let ordinal: usize = text.trim().parse().ok()?;
    if (1..=len).contains(&ordinal) {
        Some(ordinal)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, 1).unwrap()
    }

    fn horizon() -> NaiveDate {
        horizon_end(2026)
    }

    #[test]
    fn accepts_date_within_horizon() {
        let date = validate_date("15.06.2026", today(), horizon()).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2026, 6, 15).unwrap());
    }

    #[test]
    fn accepts_today_and_horizon_boundary() {
        assert!(validate_date("01.06.2026", today(), horizon()).is_ok());
        assert!(validate_date("31.12.2026", today(), horizon()).is_ok());
    }

    #[test]
    fn rejects_impossible_calendar_date() {
        assert!(validate_date("31.02.2026", today(), horizon()).is_err());
    }

    #[test]
    fn rejects_wrong_separator() {
        assert!(validate_date("15/06/2026", today(), horizon()).is_err());
    }

    #[test]
    fn rejects_short_fields() {
        assert!(validate_date("1.6.2026", today(), horizon()).is_err());
    }

    #[test]
    fn rejects_past_and_beyond_horizon() {
        assert!(validate_date("31.05.2026", today(), horizon()).is_err());
        assert!(validate_date("01.01.2027", today(), horizon()).is_err());
    }

    #[test]
    fn ordinal_bounds() {
        assert_eq!(parse_route_ordinal("1", 2), Some(1));
        assert_eq!(parse_route_ordinal("2", 2), Some(2));
        assert_eq!(parse_route_ordinal("3", 2), None);
        assert_eq!(parse_route_ordinal("0", 2), None);
        assert_eq!(parse_route_ordinal("abc", 2), None);
        assert_eq!(parse_route_ordinal("-1", 2), None);
    }
}
