//! Temporal resampling of gridded time series.
//!
//! A [`SummaryType`] tag selects how a stack of daily grids is reduced:
//! which periods the days are binned into, whether each period is summed or
//! averaged, and whether the per-period grids are then averaged again into a
//! climatology.
//!
//! # Pipeline
//!
//! ```text
//!  ┌──────────────┐     ┌────────────────┐     ┌──────────────────┐
//!  │ daily slices  │────▶│ period binning │────▶│  climatology      │
//!  │ (date, grid)  │     │ (sum / mean)   │     │  (optional mean)  │
//!  └──────────────┘     └────────────────┘     └──────────────────┘
//! ```
//!
//! # Quick start
//!
//! ```
//! use chrono::NaiveDate;
//! use gridzone_resample::{SliceTime, SummaryType, summarize};
//! use ndarray::Array3;
//!
//! let start = NaiveDate::from_ymd_opt(2016, 1, 1).unwrap();
//! let dates: Vec<_> = (0..60).map(|d| start + chrono::Days::new(d)).collect();
//! let values = Array3::<f64>::ones((60, 2, 2));
//!
//! let summary: SummaryType = "monthly_sum".parse().unwrap();
//! let grid = summarize(&dates, values.view(), summary).unwrap();
//! assert_eq!(grid.len(), 2);
//! assert_eq!(grid.slices()[0].time(), SliceTime::Period { year: 2016, month: 1 });
//! assert_eq!(grid.slices()[0].values()[[0, 0]], 31.0);
//! ```

mod error;
mod period;
mod reducer;
mod resampler;
mod result;
mod summary;

pub use error::ResampleError;
pub use period::Frequency;
pub use reducer::Reducer;
pub use resampler::{Resampler, summarize};
pub use result::{GridSlice, ResampledGrid, SliceTime};
pub use summary::{Climatology, SummaryType};
