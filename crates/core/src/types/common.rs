//! Dates and the validation hook shared by drafts and books

use chrono::NaiveDate;

/// Date format used for target dates in input, storage and export
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Returns the current local calendar date
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Parses a YYYY-MM-DD date, returning None for anything else
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

/// Field-level checks; each message names the offending field
pub trait Validator {
    fn validate(&self) -> Result<(), Vec<String>>;

    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_valid() {
        let date = parse_date("2024-03-15").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
    }

    #[test]
    fn test_parse_date_trims_whitespace() {
        assert!(parse_date("  2024-03-15 ").is_some());
    }

    #[test]
    fn test_parse_date_invalid() {
        assert!(parse_date("15/03/2024").is_none());
        assert!(parse_date("2024-02-30").is_none());
        assert!(parse_date("").is_none());
    }

    #[test]
    fn test_date_format_matches_parse() {
        let date = NaiveDate::from_ymd_opt(2031, 1, 9).unwrap();
        assert_eq!(parse_date(&date.format(DATE_FORMAT).to_string()), Some(date));
    }
}
