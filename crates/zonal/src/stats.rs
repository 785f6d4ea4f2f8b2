//! Per-zone summary statistics.

use std::collections::BTreeMap;

use ndarray::{ArrayView2, Zip};

use crate::error::ZonalError;
use crate::zones::ZoneRaster;

/// Names of the statistic columns, in output order.
pub const STAT_COLUMNS: [&str; 7] = ["mean", "max", "min", "sum", "std", "var", "count"];

/// Statistics of the finite cell values within one zone.
///
/// Variance and standard deviation use the population (N) denominator. A
/// zone whose cells are all missing has `count == 0`, `sum == 0` and NaN for
/// the remaining statistics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneStats {
    /// Zone code.
    pub zone: i64,
    /// Mean of the finite values.
    pub mean: f64,
    /// Largest finite value.
    pub max: f64,
    /// Smallest finite value.
    pub min: f64,
    /// Sum of the finite values.
    pub sum: f64,
    /// Population standard deviation.
    pub std: f64,
    /// Population variance.
    pub var: f64,
    /// Number of finite cells in the zone.
    pub count: usize,
}

#[derive(Debug, Clone, Copy)]
struct Running {
    count: usize,
    sum: f64,
    min: f64,
    max: f64,
    mean: f64,
    m2: f64,
}

impl Running {
    fn new() -> Self {
        Self {
            count: 0,
            sum: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            mean: 0.0,
            m2: 0.0,
        }
    }

    fn push(&mut self, v: f64) {
        self.count += 1;
        self.sum += v;
        self.min = self.min.min(v);
        self.max = self.max.max(v);
        // Welford
        let delta = v - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (v - self.mean);
    }

    fn finish(self, zone: i64) -> ZoneStats {
        if self.count == 0 {
            return ZoneStats {
                zone,
                mean: f64::NAN,
                max: f64::NAN,
                min: f64::NAN,
                sum: 0.0,
                std: f64::NAN,
                var: f64::NAN,
                count: 0,
            };
        }
        let n = self.count as f64;
        let var = self.m2 / n;
        ZoneStats {
            zone,
            mean: self.sum / n,
            max: self.max,
            min: self.min,
            sum: self.sum,
            std: var.sqrt(),
            var,
            count: self.count,
        }
    }
}

/// Computes statistics for every zone of `zones` over `values`.
///
/// Returns one entry per distinct zone code present in the raster, in
/// ascending code order. Non-finite values are skipped.
///
/// # Errors
///
/// Returns [`ZonalError::ShapeMismatch`] if the grids differ in shape.
pub fn zonal_stats(
    values: ArrayView2<'_, f64>,
    zones: &ZoneRaster,
) -> Result<Vec<ZoneStats>, ZonalError> {
    let (ny, nx) = values.dim();
    if zones.shape() != [ny, nx] {
        return Err(ZonalError::ShapeMismatch {
            zones: zones.shape(),
            grid: [ny, nx],
        });
    }

    let nodata = zones.nodata();
    let mut running: BTreeMap<i64, Running> = BTreeMap::new();
    Zip::from(zones.codes()).and(&values).for_each(|&code, &v| {
        if Some(code) == nodata {
            return;
        }
        let acc = running.entry(code).or_insert_with(Running::new);
        if v.is_finite() {
            acc.push(v);
        }
    });

    Ok(running
        .into_iter()
        .map(|(zone, acc)| acc.finish(zone))
        .collect())
}
