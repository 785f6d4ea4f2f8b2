//! # gridzone-io
//!
//! Reads time-indexed grids from NetCDF, reads or rasterizes zone layers
//! onto those grids, and writes zonal result tables to CSV. Bridges external
//! file formats into the `ndarray` types used by `gridzone-resample` and
//! `gridzone-zonal`.

mod ascii_grid;
mod error;
mod geojson;
mod netcdf_read;
mod rasterize;
mod reader;
mod shp;
mod time;
mod writer;
mod zones;

pub use error::IoError;
pub use rasterize::{DEFAULT_FILL, rasterize};
pub use reader::{GridGeometry, GridReader, ReaderConfig};
pub use writer::{WriterConfig, write_csv};
pub use zones::{ZoneFormat, ZoneSource, read_zones};
