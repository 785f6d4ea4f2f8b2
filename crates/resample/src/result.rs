//! Output types for resampling operations.

use std::fmt;

use ndarray::Array2;

use crate::summary::SummaryType;

/// Time coordinate of one resampled grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SliceTime {
    /// A dated period, identified by the year and month it starts in.
    ///
    /// Monthly periods start in their own month, seasonal periods in 12, 3, 6
    /// or 9 and annual periods in January.
    Period {
        /// Year the period starts in.
        year: i32,
        /// Month the period starts in (1..=12).
        month: u8,
    },
    /// A climatological month pooled over all years.
    MonthOfYear(u8),
    /// A single reduction over the whole record; there is no time dimension.
    All,
}

impl fmt::Display for SliceTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SliceTime::Period { year, month } => write!(f, "{year:04}-{month:02}"),
            SliceTime::MonthOfYear(month) => write!(f, "month {month:02}"),
            SliceTime::All => f.write_str("all"),
        }
    }
}

/// One resampled grid with its time coordinate.
#[derive(Debug, Clone)]
pub struct GridSlice {
    time: SliceTime,
    values: Array2<f64>,
}

impl GridSlice {
    /// Creates a slice from a time coordinate and a `[ny, nx]` grid.
    pub fn new(time: SliceTime, values: Array2<f64>) -> Self {
        Self { time, values }
    }

    /// Returns the time coordinate.
    pub fn time(&self) -> SliceTime {
        self.time
    }

    /// Returns the `[ny, nx]` grid.
    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }
}

/// Ordered resampled grids produced by one summary type.
#[derive(Debug, Clone)]
pub struct ResampledGrid {
    summary_type: SummaryType,
    slices: Vec<GridSlice>,
}

impl ResampledGrid {
    /// Creates a resampled grid from slices that are already in output order.
    pub fn new(summary_type: SummaryType, slices: Vec<GridSlice>) -> Self {
        Self {
            summary_type,
            slices,
        }
    }

    /// Returns the summary type that produced the slices.
    pub fn summary_type(&self) -> SummaryType {
        self.summary_type
    }

    /// Returns the slices in chronological (or month-of-year) order.
    pub fn slices(&self) -> &[GridSlice] {
        &self.slices
    }

    /// Number of slices.
    pub fn len(&self) -> usize {
        self.slices.len()
    }

    /// Whether there are no slices.
    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }
}
