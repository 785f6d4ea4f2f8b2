//! Period anchors and label dates.
//!
//! Each anchor maps a date to the first day of the period containing it, so
//! anchors can be used directly as grouping keys.

use chrono::{Datelike, NaiveDate};

use crate::error::CalendarError;

/// Returns the first day of the month containing `date`.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Returns the first day of the December-anchored quarter containing `date`.
///
/// Quarters start on 1 December, 1 March, 1 June and 1 September. January
/// and February therefore belong to the quarter that started in December of
/// the previous year.
pub fn season_start(date: NaiveDate) -> NaiveDate {
    let (year, month) = match date.month() {
        12 => (date.year(), 12),
        1 | 2 => (date.year() - 1, 12),
        m => (date.year(), m - m % 3),
    };
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(date)
}

/// Returns 1 January of the year containing `date`.
pub fn year_start(date: NaiveDate) -> NaiveDate {
    date.with_ordinal(1).unwrap_or(date)
}

/// Returns the first day of `year`-`month`.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidMonth`] if `month` is outside 1..=12.
pub fn month_first(year: i32, month: u8) -> Result<NaiveDate, CalendarError> {
    day_of_month(year, month, 1)
}

/// Returns the 15th of `year`-`month`, the label date of a monthly slice.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidMonth`] if `month` is outside 1..=12.
pub fn mid_month(year: i32, month: u8) -> Result<NaiveDate, CalendarError> {
    day_of_month(year, month, 15)
}

fn day_of_month(year: i32, month: u8, day: u8) -> Result<NaiveDate, CalendarError> {
    if !(1..=12).contains(&month) {
        return Err(CalendarError::InvalidMonth { month });
    }
    NaiveDate::from_ymd_opt(year, u32::from(month), u32::from(day)).ok_or(
        CalendarError::InvalidDate { year, month, day },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn month_start_truncates_day() {
        assert_eq!(month_start(ymd(2016, 2, 29)), ymd(2016, 2, 1));
    }

    #[test]
    fn season_start_for_every_month() {
        let expected = [
            (1, ymd(2015, 12, 1)),
            (2, ymd(2015, 12, 1)),
            (3, ymd(2016, 3, 1)),
            (4, ymd(2016, 3, 1)),
            (5, ymd(2016, 3, 1)),
            (6, ymd(2016, 6, 1)),
            (7, ymd(2016, 6, 1)),
            (8, ymd(2016, 6, 1)),
            (9, ymd(2016, 9, 1)),
            (10, ymd(2016, 9, 1)),
            (11, ymd(2016, 9, 1)),
            (12, ymd(2016, 12, 1)),
        ];
        for (month, start) in expected {
            assert_eq!(season_start(ymd(2016, month, 10)), start, "month {month}");
        }
    }

    #[test]
    fn year_start_is_january_first() {
        assert_eq!(year_start(ymd(2017, 8, 31)), ymd(2017, 1, 1));
    }

    #[test]
    fn mid_month_is_fifteenth() {
        assert_eq!(mid_month(2016, 2).unwrap(), ymd(2016, 2, 15));
    }

    #[test]
    fn month_first_rejects_bad_month() {
        assert_eq!(
            month_first(2016, 13).unwrap_err(),
            CalendarError::InvalidMonth { month: 13 }
        );
    }
}
