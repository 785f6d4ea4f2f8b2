//! Meteorological seasons.

use std::fmt;

use crate::error::CalendarError;

/// A three-month meteorological season.
///
/// Seasons follow quarters anchored on December, so winter (DJF) spans the
/// turn of the calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Season {
    /// December, January, February.
    Djf,
    /// March, April, May.
    Mam,
    /// June, July, August.
    Jja,
    /// September, October, November.
    Son,
}

impl Season {
    /// All seasons in water-year order starting with winter.
    pub const ALL: [Season; 4] = [Season::Djf, Season::Mam, Season::Jja, Season::Son];

    /// Returns the season containing `month`.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidMonth`] if `month` is outside 1..=12.
    pub fn from_month(month: u8) -> Result<Self, CalendarError> {
        match month {
            12 | 1 | 2 => Ok(Season::Djf),
            3..=5 => Ok(Season::Mam),
            6..=8 => Ok(Season::Jja),
            9..=11 => Ok(Season::Son),
            _ => Err(CalendarError::InvalidMonth { month }),
        }
    }

    /// Returns the season whose first month is `month`.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidSeasonStart`] unless `month` is one of
    /// 12, 3, 6 or 9.
    pub fn from_start_month(month: u8) -> Result<Self, CalendarError> {
        Self::ALL
            .into_iter()
            .find(|s| s.start_month() == month)
            .ok_or(CalendarError::InvalidSeasonStart { month })
    }

    /// First month of the season.
    pub fn start_month(self) -> u8 {
        match self {
            Season::Djf => 12,
            Season::Mam => 3,
            Season::Jja => 6,
            Season::Son => 9,
        }
    }

    /// Three-letter label, e.g. `"DJF"`.
    pub fn label(self) -> &'static str {
        match self {
            Season::Djf => "DJF",
            Season::Mam => "MAM",
            Season::Jja => "JJA",
            Season::Son => "SON",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
