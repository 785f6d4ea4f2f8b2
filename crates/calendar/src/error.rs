//! Error types for the gridzone-calendar crate.

/// Error type for all fallible operations in the gridzone-calendar crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalendarError {
    /// Returned when a month number is outside the valid range 1..=12.
    #[error("invalid month: {month} (must be 1..=12)")]
    InvalidMonth {
        /// The invalid month number that was provided.
        month: u8,
    },

    /// Returned when a month does not start a December-anchored season.
    #[error("invalid season start month: {month} (must be one of 12, 3, 6, 9)")]
    InvalidSeasonStart {
        /// The month that was provided.
        month: u8,
    },

    /// Returned when a year/month/day triple is not a real date.
    #[error("invalid date: {year:04}-{month:02}-{day:02}")]
    InvalidDate {
        /// Calendar year.
        year: i32,
        /// Month number.
        month: u8,
        /// Day of month.
        day: u8,
    },
}
