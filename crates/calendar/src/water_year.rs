//! Water year computation.

use crate::error::CalendarError;

/// First month of the hydrological water year used when none is configured.
pub const DEFAULT_WATER_YEAR_START: u8 = 10;

/// Computes the water year of a calendar `year` and `month`.
///
/// Months from `start_month` onward are counted in the following year's water
/// year, so with an October start, October 2015 belongs to water year 2016.
/// A `start_month` of 1 makes the water year equal to the calendar year.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidMonth`] if `month` or `start_month` is
/// outside 1..=12.
///
/// # Examples
///
/// ```
/// use gridzone_calendar::water_year;
///
/// assert_eq!(water_year(2015, 10, 10).unwrap(), 2016);
/// assert_eq!(water_year(2016, 9, 10).unwrap(), 2016);
/// assert_eq!(water_year(2016, 6, 1).unwrap(), 2016);
/// ```
pub fn water_year(year: i32, month: u8, start_month: u8) -> Result<i32, CalendarError> {
    for m in [month, start_month] {
        if !(1..=12).contains(&m) {
            return Err(CalendarError::InvalidMonth { month: m });
        }
    }
    if start_month > 1 && month >= start_month {
        Ok(year + 1)
    } else {
        Ok(year)
    }
}
