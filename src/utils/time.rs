//! Time utilities

use chrono::{DateTime, Datelike, NaiveDate, Utc};

use crate::constants::SCHOOL_YEAR_START_MONTH;

/// Get current UTC time
pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

/// School year a date belongs to, identified by its starting calendar year.
///
/// The year rolls over in September: 2024-09-01 and 2025-08-31 are both in
/// school year 2024.
pub fn school_year_for(date: NaiveDate) -> i32 {
    if date.month() >= SCHOOL_YEAR_START_MONTH {
        date.year()
    } else {
        date.year() - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_school_year_rolls_over_in_september() {
        assert_eq!(school_year_for(date(2024, 9, 1)), 2024);
        assert_eq!(school_year_for(date(2024, 8, 31)), 2023);
        assert_eq!(school_year_for(date(2024, 12, 31)), 2024);
        assert_eq!(school_year_for(date(2025, 1, 1)), 2024);
        assert_eq!(school_year_for(date(2025, 6, 15)), 2024);
    }
}
