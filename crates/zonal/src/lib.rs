//! Per-zone statistics of resampled grids.
//!
//! Takes the slices produced by `gridzone-resample` and a [`ZoneRaster`] on
//! the same grid, computes statistics for each zone in each slice, labels
//! the rows according to the summary type and concatenates everything into a
//! [`ZonalTable`].
//!
//! # Quick start
//!
//! ```
//! use gridzone_resample::{GridSlice, ResampledGrid, SliceTime, SummaryType};
//! use gridzone_zonal::{ZonalConfig, ZoneRaster, calculate_zonal_statistics};
//! use ndarray::array;
//!
//! let zones = ZoneRaster::new(array![[1, 1], [2, -9999]], Some(-9999));
//! let slice = GridSlice::new(
//!     SliceTime::Period { year: 2016, month: 1 },
//!     array![[1.0, 3.0], [5.0, 7.0]],
//! );
//! let grid = ResampledGrid::new(SummaryType::MonthlySum, vec![slice]);
//!
//! let table = calculate_zonal_statistics(&grid, &zones, &ZonalConfig::new()).unwrap();
//! assert_eq!(table.len(), 2);
//! assert_eq!(table.records()[0].zone, "001");
//! assert_eq!(table.records()[0].stats.mean, 2.0);
//! assert_eq!(table.records()[0].labels.water_year, Some(2016));
//! ```

mod config;
mod error;
mod label;
mod stats;
mod table;
mod zone_code;
mod zones;

pub use config::ZonalConfig;
pub use error::ZonalError;
pub use label::{LabelColumn, TimeLabels, annotate, label_columns};
pub use stats::{STAT_COLUMNS, ZoneStats, zonal_stats};
pub use table::{ZonalRecord, ZonalTable, calculate_zonal_statistics};
pub use zone_code::format_zone_code;
pub use zones::ZoneRaster;
