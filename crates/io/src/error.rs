//! Error types for gridzone-io.

use std::path::PathBuf;

/// Error type for all fallible operations in the gridzone-io crate.
///
/// This enum covers missing files, NetCDF and CSV library failures, time
/// axis decoding problems, malformed zone layers and grid mismatches.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// An input path does not exist.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Missing path.
        path: PathBuf,
    },

    /// The NetCDF library reported a failure.
    #[error("netcdf error: {reason}")]
    Netcdf {
        /// Library message.
        reason: String,
    },

    /// Wraps an error originating from the CSV writer.
    #[error("csv error: {reason}")]
    Csv {
        /// Description of the underlying CSV failure.
        reason: String,
    },

    /// Wraps a filesystem error.
    #[error("i/o error on {}: {reason}", path.display())]
    Io {
        /// Path being read or written.
        path: PathBuf,
        /// Description of the underlying failure.
        reason: String,
    },

    /// A configuration or input failed validation.
    #[error("invalid input ({count} problem(s)): {details}")]
    Validation {
        /// How many checks failed.
        count: usize,
        /// Failed checks, joined with `; `.
        details: String,
    },

    /// A NetCDF variable (data, axis or zone codes) is absent.
    #[error("variable '{name}' not found in {}", path.display())]
    MissingVariable {
        /// Variable or first alias looked up.
        name: String,
        /// File that was searched.
        path: PathBuf,
    },

    /// An axis, zone layer or index disagrees with the grid.
    #[error("dimension '{name}' mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// What was compared.
        name: String,
        /// Size required by the grid.
        expected: usize,
        /// Size found.
        got: usize,
    },

    /// Returned when a time value or time axis cannot be decoded.
    #[error("invalid time: {reason}")]
    InvalidTime {
        /// Description of the time decoding issue.
        reason: String,
    },

    /// Returned when an Arc ASCII zone grid is malformed.
    #[error("{}:{line}: {reason}", path.display())]
    ZoneParse {
        /// Path of the zone grid.
        path: PathBuf,
        /// 1-based line number of the problem.
        line: usize,
        /// Description of the problem.
        reason: String,
    },

    /// Returned when a GeoJSON zone layer is malformed.
    #[error("geojson error in {}: {reason}", path.display())]
    GeoJson {
        /// Path of the GeoJSON file.
        path: PathBuf,
        /// Description of the problem.
        reason: String,
    },

    /// Returned when a shapefile zone layer cannot be read.
    #[error("shapefile error in {}: {reason}", path.display())]
    Shapefile {
        /// Path of the `.shp` file.
        path: PathBuf,
        /// Description of the problem.
        reason: String,
    },

    /// Returned when a zone layer's extension is not recognised.
    #[error(
        "unsupported zone file format: {} (expected .asc, .nc, .geojson, .json or .shp)",
        path.display()
    )]
    UnsupportedZoneFormat {
        /// Path of the zone layer.
        path: PathBuf,
    },
}

impl From<netcdf::Error> for IoError {
    fn from(e: netcdf::Error) -> Self {
        IoError::Netcdf {
            reason: e.to_string(),
        }
    }
}

impl From<csv::Error> for IoError {
    fn from(e: csv::Error) -> Self {
        IoError::Csv {
            reason: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_file_not_found() {
        let err = IoError::FileNotFound {
            path: PathBuf::from("/data/aet_missing.nc"),
        };
        assert_eq!(err.to_string(), "file not found: /data/aet_missing.nc");
    }

    #[test]
    fn display_missing_variable() {
        let err = IoError::MissingVariable {
            name: "actual_et".to_string(),
            path: PathBuf::from("/data/aet.nc"),
        };
        assert_eq!(
            err.to_string(),
            "variable 'actual_et' not found in /data/aet.nc"
        );
    }

    #[test]
    fn display_dimension_mismatch() {
        let err = IoError::DimensionMismatch {
            name: "x".to_string(),
            expected: 620,
            got: 688,
        };
        assert_eq!(err.to_string(), "dimension 'x' mismatch: expected 620, got 688");
    }

    #[test]
    fn display_zone_parse() {
        let err = IoError::ZoneParse {
            path: PathBuf::from("zones.asc"),
            line: 3,
            reason: "missing cellsize".to_string(),
        };
        assert_eq!(err.to_string(), "zones.asc:3: missing cellsize");
    }

    #[test]
    fn display_unsupported_zone_format() {
        let err = IoError::UnsupportedZoneFormat {
            path: PathBuf::from("zones.tif"),
        };
        assert!(err.to_string().starts_with("unsupported zone file format: zones.tif"));
        assert!(err.to_string().contains(".shp"));
    }

    #[test]
    fn display_shapefile() {
        let err = IoError::Shapefile {
            path: PathBuf::from("basins.shp"),
            reason: "record 2: no 'BASIN_INDX' field".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "shapefile error in basins.shp: record 2: no 'BASIN_INDX' field"
        );
    }

    #[test]
    fn from_netcdf_error() {
        let nc_err = netcdf::Error::Str("NetCDF: HDF error".to_string());
        let err: IoError = nc_err.into();
        assert!(matches!(err, IoError::Netcdf { .. }));
        assert_eq!(err.to_string(), "netcdf error: NetCDF: HDF error");
    }

    #[test]
    fn usable_across_threads() {
        fn check<E: std::error::Error + Send + Sync + 'static>() {}
        check::<IoError>();
    }
}
