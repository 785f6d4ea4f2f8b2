//! Time labels attached to each slice's rows.
//!
//! Which columns a summary type carries:
//!
//! | Summary type | month | year | date | water_year | season |
//! |--------------|-------|------|------|------------|--------|
//! | monthly_* | period month | ✓ | 15th of month | ✓ | |
//! | seasonal_* | quarter start | ✓ | 1st of quarter | ✓ | ✓ |
//! | mean_monthly_* | month of year | | | | |
//! | annual_* | 6 | ✓ | 1 June | ✓ | |
//! | mean_annual_* | | | | | |

use chrono::NaiveDate;
use gridzone_calendar::{Season, mid_month, month_first, water_year};
use gridzone_resample::{SliceTime, SummaryType};

use crate::error::ZonalError;

/// Month used to label annual slices.
const ANNUAL_LABEL_MONTH: u8 = 6;

/// A label column of the result table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelColumn {
    /// Month of the period start, or month of year for climatologies.
    Month,
    /// Calendar year of the period start.
    Year,
    /// Representative date, formatted `YYYY-MM-DD`.
    Date,
    /// Water year the period falls in.
    WaterYear,
    /// Season label (`DJF`, `MAM`, `JJA`, `SON`).
    Season,
}

impl LabelColumn {
    /// Column header.
    pub fn name(self) -> &'static str {
        match self {
            LabelColumn::Month => "month",
            LabelColumn::Year => "year",
            LabelColumn::Date => "date",
            LabelColumn::WaterYear => "water_year",
            LabelColumn::Season => "season",
        }
    }

    /// Text of this column for `labels`, `None` when the label is absent.
    pub fn format(self, labels: &TimeLabels) -> Option<String> {
        match self {
            LabelColumn::Month => labels.month.map(|m| m.to_string()),
            LabelColumn::Year => labels.year.map(|y| y.to_string()),
            LabelColumn::Date => labels.date.map(|d| d.format("%Y-%m-%d").to_string()),
            LabelColumn::WaterYear => labels.water_year.map(|y| y.to_string()),
            LabelColumn::Season => labels.season.map(|s| s.label().to_string()),
        }
    }
}

/// Label columns carried by rows of `summary_type`, in output order.
pub fn label_columns(summary_type: SummaryType) -> &'static [LabelColumn] {
    use LabelColumn as C;
    match summary_type {
        SummaryType::MonthlySum | SummaryType::MonthlyMean => {
            &[C::Month, C::Year, C::Date, C::WaterYear]
        }
        SummaryType::SeasonalSum | SummaryType::SeasonalMean => {
            &[C::Month, C::Year, C::Date, C::WaterYear, C::Season]
        }
        SummaryType::MeanMonthlySum | SummaryType::MeanMonthlyMean => &[C::Month],
        SummaryType::AnnualSum | SummaryType::AnnualMean => {
            &[C::Month, C::Year, C::Date, C::WaterYear]
        }
        SummaryType::MeanAnnualSum | SummaryType::MeanAnnualMean => &[],
    }
}

/// Time labels shared by every row of one slice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeLabels {
    /// Month, 1-12.
    pub month: Option<u8>,
    /// Calendar year.
    pub year: Option<i32>,
    /// Representative date of the slice.
    pub date: Option<NaiveDate>,
    /// Water year of the slice.
    pub water_year: Option<i32>,
    /// Meteorological season of a seasonal slice.
    pub season: Option<Season>,
}

/// Builds the labels of a slice at `time` produced by `summary_type`.
///
/// # Errors
///
/// Returns [`ZonalError::LabelMismatch`] if `time` is not the kind of slice
/// time `summary_type` produces, or [`ZonalError::Calendar`] for an invalid
/// month or water-year start.
pub fn annotate(
    summary_type: SummaryType,
    time: SliceTime,
    water_year_start: u8,
) -> Result<TimeLabels, ZonalError> {
    let mismatch = || ZonalError::LabelMismatch {
        summary_type: summary_type.to_string(),
        time: time.to_string(),
    };

    match summary_type {
        SummaryType::MonthlySum | SummaryType::MonthlyMean => {
            let SliceTime::Period { year, month } = time else {
                return Err(mismatch());
            };
            Ok(TimeLabels {
                month: Some(month),
                year: Some(year),
                date: Some(mid_month(year, month)?),
                water_year: Some(water_year(year, month, water_year_start)?),
                season: None,
            })
        }
        SummaryType::SeasonalSum | SummaryType::SeasonalMean => {
            let SliceTime::Period { year, month } = time else {
                return Err(mismatch());
            };
            Ok(TimeLabels {
                month: Some(month),
                year: Some(year),
                date: Some(month_first(year, month)?),
                water_year: Some(water_year(year, month, water_year_start)?),
                season: Some(Season::from_start_month(month)?),
            })
        }
        SummaryType::MeanMonthlySum | SummaryType::MeanMonthlyMean => {
            let SliceTime::MonthOfYear(month) = time else {
                return Err(mismatch());
            };
            Ok(TimeLabels {
                month: Some(month),
                ..TimeLabels::default()
            })
        }
        SummaryType::AnnualSum | SummaryType::AnnualMean => {
            let SliceTime::Period { year, .. } = time else {
                return Err(mismatch());
            };
            Ok(TimeLabels {
                month: Some(ANNUAL_LABEL_MONTH),
                year: Some(year),
                date: Some(month_first(year, ANNUAL_LABEL_MONTH)?),
                water_year: Some(water_year(year, ANNUAL_LABEL_MONTH, water_year_start)?),
                season: None,
            })
        }
        SummaryType::MeanAnnualSum | SummaryType::MeanAnnualMean => match time {
            SliceTime::All => Ok(TimeLabels::default()),
            _ => Err(mismatch()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn monthly_labels() {
        let labels = annotate(
            SummaryType::MonthlySum,
            SliceTime::Period {
                year: 2016,
                month: 11,
            },
            10,
        )
        .unwrap();
        assert_eq!(labels.month, Some(11));
        assert_eq!(labels.year, Some(2016));
        assert_eq!(labels.date, Some(ymd(2016, 11, 15)));
        assert_eq!(labels.water_year, Some(2017));
        assert_eq!(labels.season, None);
    }

    #[test]
    fn seasonal_labels() {
        let labels = annotate(
            SummaryType::SeasonalMean,
            SliceTime::Period {
                year: 2015,
                month: 12,
            },
            10,
        )
        .unwrap();
        assert_eq!(labels.date, Some(ymd(2015, 12, 1)));
        assert_eq!(labels.season, Some(Season::Djf));
        assert_eq!(labels.water_year, Some(2016));
    }

    #[test]
    fn seasonal_rejects_non_quarter_month() {
        let err = annotate(
            SummaryType::SeasonalSum,
            SliceTime::Period {
                year: 2016,
                month: 1,
            },
            10,
        )
        .unwrap_err();
        assert!(matches!(err, ZonalError::Calendar { .. }));
    }

    #[test]
    fn mean_monthly_labels_month_only() {
        let labels =
            annotate(SummaryType::MeanMonthlyMean, SliceTime::MonthOfYear(4), 10).unwrap();
        assert_eq!(
            labels,
            TimeLabels {
                month: Some(4),
                ..TimeLabels::default()
            }
        );
    }

    #[test]
    fn annual_labels_use_june() {
        let labels = annotate(
            SummaryType::AnnualSum,
            SliceTime::Period {
                year: 2017,
                month: 1,
            },
            10,
        )
        .unwrap();
        assert_eq!(labels.month, Some(6));
        assert_eq!(labels.date, Some(ymd(2017, 6, 1)));
        assert_eq!(labels.water_year, Some(2017));
    }

    #[test]
    fn mean_annual_has_no_labels() {
        let labels = annotate(SummaryType::MeanAnnualSum, SliceTime::All, 10).unwrap();
        assert_eq!(labels, TimeLabels::default());
    }

    #[test]
    fn mismatched_time_rejected() {
        let err = annotate(SummaryType::MonthlySum, SliceTime::All, 10).unwrap_err();
        assert_eq!(
            err,
            ZonalError::LabelMismatch {
                summary_type: "monthly_sum".into(),
                time: "all".into(),
            }
        );
        assert!(annotate(SummaryType::MeanAnnualMean, SliceTime::MonthOfYear(1), 10).is_err());
    }

    #[test]
    fn columns_match_labels() {
        for st in SummaryType::ALL {
            let time = match st.climatology() {
                None => SliceTime::Period {
                    year: 2016,
                    month: 12,
                },
                Some(gridzone_resample::Climatology::MonthOfYear) => SliceTime::MonthOfYear(12),
                Some(gridzone_resample::Climatology::AllPeriods) => SliceTime::All,
            };
            let labels = annotate(st, time, 10).unwrap();
            for col in label_columns(st) {
                assert!(col.format(&labels).is_some(), "{st}: {}", col.name());
            }
        }
    }

    #[test]
    fn format_columns() {
        let labels = TimeLabels {
            month: Some(3),
            year: Some(2016),
            date: Some(ymd(2016, 3, 1)),
            water_year: Some(2016),
            season: Some(Season::Mam),
        };
        assert_eq!(LabelColumn::Date.format(&labels).unwrap(), "2016-03-01");
        assert_eq!(LabelColumn::Season.format(&labels).unwrap(), "MAM");
        assert_eq!(LabelColumn::Month.format(&TimeLabels::default()), None);
    }
}
