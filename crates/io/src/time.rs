//! CF time axis decoding.
//!
//! Time coordinates are stored as numeric offsets with a `units` attribute of
//! the form `"<unit> since <reference>"` and an optional `calendar`
//! attribute. Only the date part of each decoded timestamp is kept.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};

use crate::error::IoError;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Calendars whose timestamps can be mapped onto real dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CfCalendar {
    /// `standard`, `gregorian` and `proleptic_gregorian`.
    Gregorian,
    /// `noleap` and `365_day`.
    NoLeap,
}

impl CfCalendar {
    /// Parse a CF calendar name. A missing attribute means `standard`.
    pub(crate) fn parse(name: Option<&str>) -> Result<Self, IoError> {
        let Some(name) = name else {
            return Ok(Self::Gregorian);
        };
        match name.trim().to_ascii_lowercase().as_str() {
            "standard" | "gregorian" | "proleptic_gregorian" => Ok(Self::Gregorian),
            "noleap" | "365_day" => Ok(Self::NoLeap),
            other => Err(IoError::InvalidTime {
                reason: format!("unsupported calendar '{other}'"),
            }),
        }
    }
}

/// Parsed `"<unit> since <reference>"` string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct TimeUnits {
    seconds_per_unit: f64,
    reference: NaiveDateTime,
}

impl TimeUnits {
    pub(crate) fn parse(units: &str) -> Result<Self, IoError> {
        let invalid = || IoError::InvalidTime {
            reason: format!("unexpected time units format: '{units}'"),
        };

        let mut parts = units.trim().splitn(3, char::is_whitespace);
        let unit = parts.next().ok_or_else(invalid)?;
        if parts.next() != Some("since") {
            return Err(invalid());
        }
        let reference = parts.next().ok_or_else(invalid)?.trim();

        let seconds_per_unit = match unit.to_ascii_lowercase().as_str() {
            "days" | "day" | "d" => SECONDS_PER_DAY,
            "hours" | "hour" | "hr" | "h" => 3_600.0,
            "minutes" | "minute" | "min" => 60.0,
            "seconds" | "second" | "sec" | "s" => 1.0,
            other => {
                return Err(IoError::InvalidTime {
                    reason: format!("unsupported time unit '{other}'"),
                });
            }
        };

        Ok(Self {
            seconds_per_unit,
            reference: parse_reference(reference)?,
        })
    }
}

/// Parse `YYYY-MM-DD` optionally followed by `[T ]HH:MM[:SS]` and a zone
/// suffix, which is ignored.
fn parse_reference(text: &str) -> Result<NaiveDateTime, IoError> {
    let (date_str, rest) = match text.find(['T', ' ']) {
        Some(i) => (&text[..i], text[i + 1..].trim()),
        None => (text, ""),
    };

    let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
        IoError::InvalidTime {
            reason: format!("failed to parse reference date '{date_str}': {e}"),
        }
    })?;

    let clock: String = rest
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == ':' || *c == '.')
        .collect();
    let time = if clock.is_empty() {
        NaiveTime::MIN
    } else {
        NaiveTime::parse_from_str(&clock, "%H:%M:%S%.f")
            .or_else(|_| NaiveTime::parse_from_str(&clock, "%H:%M"))
            .map_err(|e| IoError::InvalidTime {
                reason: format!("failed to parse reference time '{clock}': {e}"),
            })?
    };

    Ok(date.and_time(time))
}

/// Decode numeric time offsets into calendar dates.
pub(crate) fn decode_times(
    offsets: &[f64],
    units: &TimeUnits,
    calendar: CfCalendar,
) -> Result<Vec<NaiveDate>, IoError> {
    offsets
        .iter()
        .map(|&offset| {
            if !offset.is_finite() {
                return Err(IoError::InvalidTime {
                    reason: format!("non-finite time offset {offset}"),
                });
            }
            let seconds = offset * units.seconds_per_unit;
            match calendar {
                CfCalendar::Gregorian => gregorian(units.reference, seconds),
                CfCalendar::NoLeap => noleap(units.reference, seconds),
            }
        })
        .collect()
}

fn gregorian(reference: NaiveDateTime, seconds: f64) -> Result<NaiveDate, IoError> {
    let overflow = || IoError::InvalidTime {
        reason: format!("date overflow adding {seconds} s to {reference}"),
    };
    let millis = to_i64((seconds * 1_000.0).round()).ok_or_else(overflow)?;
    let delta = TimeDelta::try_milliseconds(millis).ok_or_else(overflow)?;
    reference
        .checked_add_signed(delta)
        .map(|dt| dt.date())
        .ok_or_else(overflow)
}

/// Convert an integral float to `i64`, `None` when it does not fit.
fn to_i64(v: f64) -> Option<i64> {
    // 2^63 is exactly representable; anything at or above it does not fit.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    (v.is_finite() && v >= -LIMIT && v < LIMIT).then_some(v as i64)
}

const NOLEAP_CUMULATIVE: [u32; 13] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334, 365];

fn noleap(reference: NaiveDateTime, seconds: f64) -> Result<NaiveDate, IoError> {
    let date = reference.date();
    if date.month() == 2 && date.day() == 29 {
        return Err(IoError::InvalidTime {
            reason: format!("reference date {date} does not exist in the noleap calendar"),
        });
    }

    let since_midnight = f64::from(reference.time().num_seconds_from_midnight());
    let overflow = || IoError::InvalidTime {
        reason: format!("noleap date overflow adding {seconds} s to {reference}"),
    };
    let elapsed_days =
        to_i64(((since_midnight + seconds) / SECONDS_PER_DAY).floor()).ok_or_else(overflow)?;

    let day_of_year = NOLEAP_CUMULATIVE[date.month0() as usize] + date.day0();
    let ordinal = i64::from(date.year())
        .checked_mul(365)
        .and_then(|d| d.checked_add(i64::from(day_of_year)))
        .and_then(|d| d.checked_add(elapsed_days))
        .ok_or_else(overflow)?;

    let year = ordinal.div_euclid(365);
    let doy = ordinal.rem_euclid(365) as u32;
    let month0 = NOLEAP_CUMULATIVE
        .iter()
        .rposition(|&start| start <= doy)
        .unwrap_or(0);
    let day = doy - NOLEAP_CUMULATIVE[month0] + 1;

    i32::try_from(year)
        .ok()
        .and_then(|y| NaiveDate::from_ymd_opt(y, month0 as u32 + 1, day))
        .ok_or_else(|| IoError::InvalidTime {
            reason: format!("noleap date overflow at ordinal day {ordinal}"),
        })
}
