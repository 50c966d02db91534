//! Calendar helpers
//!
//! Month boundaries for plan progress, date parsing for API query strings,
//! and "today" in the configured business timezone.

use chrono::{Datelike, NaiveDate};
use chrono_tz::Tz;

use super::{AppError, AppResult};

/// Parse a date string (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {}", date)))
}

/// First day of the month containing `date`
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Last day of the month containing `date`
pub fn month_end(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    // First day of next month minus one day
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|d| d.pred_opt())
        .unwrap_or(date)
}

/// Number of calendar days in the month containing `date`
pub fn days_in_month(date: NaiveDate) -> i64 {
    (month_end(date) - month_start(date)).num_days() + 1
}

/// Current date in the business timezone
pub fn today_in(tz: Tz) -> NaiveDate {
    chrono::Utc::now().with_timezone(&tz).date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn month_end_handles_december() {
        assert_eq!(month_end(d(2025, 12, 15)), d(2025, 12, 31));
    }

    #[test]
    fn month_end_handles_leap_february() {
        assert_eq!(month_end(d(2024, 2, 1)), d(2024, 2, 29));
        assert_eq!(month_end(d(2025, 2, 10)), d(2025, 2, 28));
    }

    #[test]
    fn days_in_month_counts_inclusive() {
        assert_eq!(days_in_month(d(2025, 4, 20)), 30);
        assert_eq!(days_in_month(d(2024, 2, 5)), 29);
    }

    #[test]
    fn parse_date_rejects_garbage() {
        assert!(parse_date("2025-13-40").is_err());
        assert_eq!(parse_date("2025-06-01").unwrap(), d(2025, 6, 1));
    }
}
