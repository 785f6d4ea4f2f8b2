//! Summary-type tags and their decomposition into resampling steps.

use std::fmt;
use std::str::FromStr;

use crate::error::ResampleError;
use crate::period::Frequency;
use crate::reducer::Reducer;

/// How a daily grid stack is summarised along the time axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SummaryType {
    /// One grid per calendar month, summed.
    MonthlySum,
    /// One grid per calendar month, averaged.
    MonthlyMean,
    /// One grid per December-anchored quarter, summed.
    SeasonalSum,
    /// One grid per December-anchored quarter, averaged.
    SeasonalMean,
    /// Twelve grids: the mean over years of each month's sum.
    MeanMonthlySum,
    /// Twelve grids: the mean over years of each month's mean.
    MeanMonthlyMean,
    /// One grid per calendar year, summed.
    AnnualSum,
    /// One grid per calendar year, averaged.
    AnnualMean,
    /// A single grid: the mean of the annual sums.
    MeanAnnualSum,
    /// A single grid: the mean of the annual means.
    MeanAnnualMean,
}

/// Second-stage reduction applied across the per-period grids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Climatology {
    /// Average the periods sharing a calendar month.
    MonthOfYear,
    /// Average all periods into one grid.
    AllPeriods,
}

impl SummaryType {
    /// Every summary type, in the order they are listed to users.
    pub const ALL: [SummaryType; 10] = [
        SummaryType::MonthlySum,
        SummaryType::MonthlyMean,
        SummaryType::SeasonalSum,
        SummaryType::SeasonalMean,
        SummaryType::MeanMonthlySum,
        SummaryType::MeanMonthlyMean,
        SummaryType::AnnualSum,
        SummaryType::AnnualMean,
        SummaryType::MeanAnnualSum,
        SummaryType::MeanAnnualMean,
    ];

    /// Canonical tag, e.g. `"monthly_sum"`.
    pub fn tag(self) -> &'static str {
        match self {
            SummaryType::MonthlySum => "monthly_sum",
            SummaryType::MonthlyMean => "monthly_mean",
            SummaryType::SeasonalSum => "seasonal_sum",
            SummaryType::SeasonalMean => "seasonal_mean",
            SummaryType::MeanMonthlySum => "mean_monthly_sum",
            SummaryType::MeanMonthlyMean => "mean_monthly_mean",
            SummaryType::AnnualSum => "annual_sum",
            SummaryType::AnnualMean => "annual_mean",
            SummaryType::MeanAnnualSum => "mean_annual_sum",
            SummaryType::MeanAnnualMean => "mean_annual_mean",
        }
    }

    /// One-line description for help output.
    pub fn description(self) -> &'static str {
        match self {
            SummaryType::MonthlySum => "one grid per month, daily values summed",
            SummaryType::MonthlyMean => "one grid per month, daily values averaged",
            SummaryType::SeasonalSum => "one grid per DJF/MAM/JJA/SON quarter, summed",
            SummaryType::SeasonalMean => "one grid per DJF/MAM/JJA/SON quarter, averaged",
            SummaryType::MeanMonthlySum => "12 grids, mean over years of each monthly sum",
            SummaryType::MeanMonthlyMean => "12 grids, mean over years of each monthly mean",
            SummaryType::AnnualSum => "one grid per year, daily values summed",
            SummaryType::AnnualMean => "one grid per year, daily values averaged",
            SummaryType::MeanAnnualSum => "single grid, mean of the annual sums",
            SummaryType::MeanAnnualMean => "single grid, mean of the annual means",
        }
    }

    /// Reduction applied to the days within each period.
    pub fn reducer(self) -> Reducer {
        match self {
            SummaryType::MonthlySum
            | SummaryType::SeasonalSum
            | SummaryType::MeanMonthlySum
            | SummaryType::AnnualSum
            | SummaryType::MeanAnnualSum => Reducer::Sum,
            SummaryType::MonthlyMean
            | SummaryType::SeasonalMean
            | SummaryType::MeanMonthlyMean
            | SummaryType::AnnualMean
            | SummaryType::MeanAnnualMean => Reducer::Mean,
        }
    }

    /// Periods the days are binned into.
    pub fn frequency(self) -> Frequency {
        match self {
            SummaryType::MonthlySum
            | SummaryType::MonthlyMean
            | SummaryType::MeanMonthlySum
            | SummaryType::MeanMonthlyMean => Frequency::Month,
            SummaryType::SeasonalSum | SummaryType::SeasonalMean => Frequency::Season,
            SummaryType::AnnualSum
            | SummaryType::AnnualMean
            | SummaryType::MeanAnnualSum
            | SummaryType::MeanAnnualMean => Frequency::Year,
        }
    }

    /// Optional second-stage mean across periods.
    pub fn climatology(self) -> Option<Climatology> {
        match self {
            SummaryType::MeanMonthlySum | SummaryType::MeanMonthlyMean => {
                Some(Climatology::MonthOfYear)
            }
            SummaryType::MeanAnnualSum | SummaryType::MeanAnnualMean => {
                Some(Climatology::AllPeriods)
            }
            _ => None,
        }
    }
}

impl FromStr for SummaryType {
    type Err = ResampleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "monthly_sum" => Ok(SummaryType::MonthlySum),
            "monthly_mean" => Ok(SummaryType::MonthlyMean),
            "seasonal_sum" | "quarterly_sum" => Ok(SummaryType::SeasonalSum),
            "seasonal_mean" | "quarterly_mean" => Ok(SummaryType::SeasonalMean),
            "mean_monthly_sum" => Ok(SummaryType::MeanMonthlySum),
            "mean_monthly_mean" => Ok(SummaryType::MeanMonthlyMean),
            "annual_sum" => Ok(SummaryType::AnnualSum),
            "annual_mean" => Ok(SummaryType::AnnualMean),
            "mean_annual_sum" => Ok(SummaryType::MeanAnnualSum),
            "mean_annual_mean" => Ok(SummaryType::MeanAnnualMean),
            _ => Err(ResampleError::UnknownSummaryType { tag: s.to_string() }),
        }
    }
}

impl fmt::Display for SummaryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
