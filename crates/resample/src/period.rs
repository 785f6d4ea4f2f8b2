//! Period binning.

use chrono::NaiveDate;
use gridzone_calendar::{month_start, season_start, year_start};

/// Length of the periods daily data is binned into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    /// Calendar months.
    Month,
    /// Quarters starting in December, March, June and September.
    Season,
    /// Calendar years.
    Year,
}

impl Frequency {
    /// First day of the period containing `date`.
    pub fn anchor(self, date: NaiveDate) -> NaiveDate {
        match self {
            Frequency::Month => month_start(date),
            Frequency::Season => season_start(date),
            Frequency::Year => year_start(date),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn anchors() {
        let d = ymd(2017, 2, 14);
        assert_eq!(Frequency::Month.anchor(d), ymd(2017, 2, 1));
        assert_eq!(Frequency::Season.anchor(d), ymd(2016, 12, 1));
        assert_eq!(Frequency::Year.anchor(d), ymd(2017, 1, 1));
    }
}
