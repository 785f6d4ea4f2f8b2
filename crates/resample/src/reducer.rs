//! Per-cell reductions along the time axis.

use ndarray::{Array2, ArrayView2, Zip};

/// Reduction applied to the time steps of one period.
///
/// Neither reduction skips NaN: one missing day makes the cell missing for
/// the whole period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reducer {
    /// Sum of the time steps.
    Sum,
    /// Arithmetic mean of the time steps.
    Mean,
}

/// Running per-cell accumulator for one period.
#[derive(Debug, Clone)]
pub(crate) struct Accumulator {
    total: Array2<f64>,
    n: usize,
}

impl Accumulator {
    pub(crate) fn new(shape: [usize; 2]) -> Self {
        Self {
            total: Array2::zeros(shape),
            n: 0,
        }
    }

    pub(crate) fn add(&mut self, slice: ArrayView2<'_, f64>) {
        Zip::from(&mut self.total)
            .and(&slice)
            .for_each(|acc, &v| *acc += v);
        self.n += 1;
    }

    pub(crate) fn len(&self) -> usize {
        self.n
    }

    /// Consumes the accumulator and applies `reducer`.
    pub(crate) fn finish(self, reducer: Reducer) -> Array2<f64> {
        match reducer {
            Reducer::Sum => self.total,
            Reducer::Mean => {
                let n = self.n as f64;
                self.total.mapv_into(|v| v / n)
            }
        }
    }
}
