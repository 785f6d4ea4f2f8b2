//! Streaming temporal resampler.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use ndarray::{Array2, ArrayView2, ArrayView3, Axis};
use tracing::debug;

use crate::error::ResampleError;
use crate::reducer::{Accumulator, Reducer};
use crate::result::{GridSlice, ResampledGrid, SliceTime};
use crate::summary::{Climatology, SummaryType};

/// Accumulates daily grids into the periods of a [`SummaryType`].
///
/// Slices may be pushed in any order; periods are emitted chronologically by
/// [`Resampler::finish`]. Only one accumulator per period is held in memory,
/// so the input stack never needs to be loaded as a whole.
#[derive(Debug, Clone)]
pub struct Resampler {
    summary_type: SummaryType,
    shape: [usize; 2],
    periods: BTreeMap<NaiveDate, Accumulator>,
    n_steps: usize,
}

impl Resampler {
    /// Creates a resampler for `[ny, nx]` grids.
    pub fn new(summary_type: SummaryType, shape: [usize; 2]) -> Self {
        Self {
            summary_type,
            shape,
            periods: BTreeMap::new(),
            n_steps: 0,
        }
    }

    /// Number of time steps pushed so far.
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Adds the grid observed on `date`.
    ///
    /// # Errors
    ///
    /// Returns [`ResampleError::ShapeMismatch`] if `slice` is not `[ny, nx]`.
    pub fn push(
        &mut self,
        date: NaiveDate,
        slice: ArrayView2<'_, f64>,
    ) -> Result<(), ResampleError> {
        let (ny, nx) = slice.dim();
        if [ny, nx] != self.shape {
            return Err(ResampleError::ShapeMismatch {
                expected: self.shape,
                got: [ny, nx],
            });
        }
        let anchor = self.summary_type.frequency().anchor(date);
        let shape = self.shape;
        self.periods
            .entry(anchor)
            .or_insert_with(|| Accumulator::new(shape))
            .add(slice);
        self.n_steps += 1;
        Ok(())
    }

    /// Reduces the accumulated periods into the output slices.
    ///
    /// # Errors
    ///
    /// Returns [`ResampleError::EmptyData`] if nothing was pushed.
    pub fn finish(self) -> Result<ResampledGrid, ResampleError> {
        if self.periods.is_empty() {
            return Err(ResampleError::EmptyData);
        }
        let reducer = self.summary_type.reducer();
        debug!(
            summary_type = %self.summary_type,
            n_steps = self.n_steps,
            n_periods = self.periods.len(),
            "reducing periods"
        );

        let periods: Vec<(NaiveDate, Array2<f64>)> = self
            .periods
            .into_iter()
            .map(|(anchor, acc)| (anchor, acc.finish(reducer)))
            .collect();

        let slices = match self.summary_type.climatology() {
            None => periods
                .into_iter()
                .map(|(anchor, values)| GridSlice::new(period_time(anchor), values))
                .collect(),
            Some(Climatology::MonthOfYear) => {
                let mut by_month: BTreeMap<u8, Accumulator> = BTreeMap::new();
                for (anchor, values) in &periods {
                    by_month
                        .entry(anchor.month() as u8)
                        .or_insert_with(|| Accumulator::new(self.shape))
                        .add(values.view());
                }
                by_month
                    .into_iter()
                    .map(|(month, acc)| {
                        GridSlice::new(SliceTime::MonthOfYear(month), acc.finish(Reducer::Mean))
                    })
                    .collect()
            }
            Some(Climatology::AllPeriods) => {
                let mut acc = Accumulator::new(self.shape);
                for (_, values) in &periods {
                    acc.add(values.view());
                }
                vec![GridSlice::new(SliceTime::All, acc.finish(Reducer::Mean))]
            }
        };

        Ok(ResampledGrid::new(self.summary_type, slices))
    }
}

fn period_time(anchor: NaiveDate) -> SliceTime {
    SliceTime::Period {
        year: anchor.year(),
        month: anchor.month() as u8,
    }
}

/// Resamples an in-memory `[time, ny, nx]` stack.
///
/// # Errors
///
/// Returns [`ResampleError::LengthMismatch`] if `dates` and the time axis of
/// `values` differ in length, or [`ResampleError::EmptyData`] if both are
/// empty.
pub fn summarize(
    dates: &[NaiveDate],
    values: ArrayView3<'_, f64>,
    summary_type: SummaryType,
) -> Result<ResampledGrid, ResampleError> {
    let (nt, ny, nx) = values.dim();
    if dates.len() != nt {
        return Err(ResampleError::LengthMismatch {
            field: "dates",
            expected: nt,
            got: dates.len(),
        });
    }
    let mut resampler = Resampler::new(summary_type, [ny, nx]);
    for (&date, slice) in dates.iter().zip(values.axis_iter(Axis(0))) {
        resampler.push(date, slice)?;
    }
    resampler.finish()
}
