//! High-level NetCDF grid reader configuration and orchestration.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use ndarray::{Array2, Array3, Axis};
use tracing::{debug, info};

use crate::error::IoError;
use crate::netcdf_read::{self, CfEncoding};
use crate::time::{self, CfCalendar, TimeUnits};

// ---------------------------------------------------------------------------
// ReaderConfig
// ---------------------------------------------------------------------------

/// Configuration for reading a time-indexed grid from a NetCDF file.
///
/// Use the builder methods (`with_*`) to customise the variable, the time
/// axis and the coordinate aliases. The [`Default`] implementation reads a
/// variable named `actual_et` on a `time` axis.
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// NetCDF data variable, laid out `[time, y, x]`.
    variable: String,
    /// NetCDF variable name for the time axis.
    time_var: String,
    /// Aliases to try when looking up x coordinates.
    x_aliases: Vec<String>,
    /// Aliases to try when looking up y coordinates.
    y_aliases: Vec<String>,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            variable: "actual_et".into(),
            time_var: "time".into(),
            x_aliases: vec!["x".into(), "lon".into(), "longitude".into()],
            y_aliases: vec!["y".into(), "lat".into(), "latitude".into()],
        }
    }
}

impl ReaderConfig {
    /// Set the data variable name.
    pub fn with_variable(mut self, name: impl Into<String>) -> Self {
        self.variable = name.into();
        self
    }

    /// Set the time axis variable name.
    pub fn with_time_var(mut self, name: impl Into<String>) -> Self {
        self.time_var = name.into();
        self
    }

    /// Replace the x coordinate aliases.
    pub fn with_x_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.x_aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the y coordinate aliases.
    pub fn with_y_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.y_aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    /// Data variable name.
    pub fn variable(&self) -> &str {
        &self.variable
    }

    /// Time axis variable name.
    pub fn time_var(&self) -> &str {
        &self.time_var
    }

    /// Names tried, in order, for the x coordinate variable.
    pub fn x_aliases(&self) -> &[String] {
        &self.x_aliases
    }

    /// Names tried, in order, for the y coordinate variable.
    pub fn y_aliases(&self) -> &[String] {
        &self.y_aliases
    }

    /// Validate that the configuration is internally consistent.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] listing every empty name.
    pub fn validate(&self) -> Result<(), IoError> {
        let mut problems = Vec::new();
        if self.variable.trim().is_empty() {
            problems.push("variable name is empty".to_string());
        }
        if self.time_var.trim().is_empty() {
            problems.push("time variable name is empty".to_string());
        }
        if self.x_aliases.is_empty() {
            problems.push("no x coordinate aliases".to_string());
        }
        if self.y_aliases.is_empty() {
            problems.push("no y coordinate aliases".to_string());
        }
        if problems.is_empty() {
            Ok(())
        } else {
            Err(IoError::Validation {
                count: problems.len(),
                details: problems.join("; "),
            })
        }
    }
}

// ---------------------------------------------------------------------------
// GridGeometry
// ---------------------------------------------------------------------------

/// Cell-centre coordinates of a `[y, x]` grid.
#[derive(Debug, Clone, PartialEq)]
pub struct GridGeometry {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl GridGeometry {
    /// Build a geometry from 1-D x and y cell-centre axes.
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Self {
        Self { x, y }
    }

    /// x coordinate of each column.
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// y coordinate of each row.
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// `[ny, nx]`.
    pub fn shape(&self) -> [usize; 2] {
        [self.y.len(), self.x.len()]
    }

    /// Whether row 0 is the southernmost row.
    pub fn y_ascending(&self) -> bool {
        match (self.y.first(), self.y.last()) {
            (Some(first), Some(last)) => first < last,
            _ => false,
        }
    }
}

// ---------------------------------------------------------------------------
// GridReader
// ---------------------------------------------------------------------------

/// An open NetCDF grid with a decoded time axis.
///
/// Slices are read lazily so a long daily record can be streamed through a
/// resampler one timestep at a time.
pub struct GridReader {
    file: netcdf::File,
    path: PathBuf,
    variable: String,
    dates: Vec<NaiveDate>,
    geometry: GridGeometry,
    encoding: CfEncoding,
}

impl std::fmt::Debug for GridReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GridReader")
            .field("path", &self.path)
            .field("variable", &self.variable)
            .field("n_times", &self.dates.len())
            .field("shape", &self.geometry.shape())
            .finish()
    }
}

impl GridReader {
    /// Open `path` and decode the time and coordinate axes of the configured
    /// variable.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`] when the file or a variable is missing, the data
    /// variable is not 3-D, an axis length disagrees with the data variable,
    /// or the time axis cannot be decoded.
    pub fn open(path: &Path, config: &ReaderConfig) -> Result<Self, IoError> {
        config.validate()?;

        let file = netcdf_read::open_file(path)?;

        let (dims, encoding) = {
            let var = netcdf_read::variable(&file, &config.variable, path)?;
            let dims: Vec<(String, usize)> = var
                .dimensions()
                .iter()
                .map(|d| (d.name(), d.len()))
                .collect();
            (dims, CfEncoding::of(&var))
        };
        if dims.len() != 3 {
            return Err(IoError::DimensionMismatch {
                name: format!("{} dimensions", config.variable),
                expected: 3,
                got: dims.len(),
            });
        }
        let (nt, ny, nx) = (dims[0].1, dims[1].1, dims[2].1);

        // -- Time -----------------------------------------------------------

        let dates = {
            let time_var = netcdf_read::variable(&file, &config.time_var, path)?;
            let units = netcdf_read::attribute_str(&time_var, "units").ok_or_else(|| {
                IoError::InvalidTime {
                    reason: format!("time variable '{}' has no 'units' attribute", config.time_var),
                }
            })?;
            let units = TimeUnits::parse(&units)?;
            let calendar =
                CfCalendar::parse(netcdf_read::attribute_str(&time_var, "calendar").as_deref())?;
            let offsets = time_var.get_values::<f64, _>(..)?;
            time::decode_times(&offsets, &units, calendar)?
        };
        check_len(&config.time_var, nt, dates.len())?;

        // -- Coordinates ----------------------------------------------------

        // The data variable's own dimension names take precedence over the
        // configured aliases.
        let x = read_axis(&file, &dims[2].0, config.x_aliases(), path)?;
        let y = read_axis(&file, &dims[1].0, config.y_aliases(), path)?;
        check_len("x", nx, x.len())?;
        check_len("y", ny, y.len())?;

        info!(
            path = %path.display(),
            variable = %config.variable,
            n_times = nt,
            ny,
            nx,
            "opened grid"
        );
        if let (Some(first), Some(last)) = (dates.first(), dates.last()) {
            debug!(%first, %last, "time axis decoded");
        }

        Ok(Self {
            file,
            path: path.to_path_buf(),
            variable: config.variable.clone(),
            dates,
            geometry: GridGeometry::new(x, y),
            encoding,
        })
    }

    /// Decoded date of each timestep.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Cell-centre coordinates.
    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    /// `[ny, nx]`.
    pub fn shape(&self) -> [usize; 2] {
        self.geometry.shape()
    }

    /// Number of timesteps.
    pub fn n_times(&self) -> usize {
        self.dates.len()
    }

    /// Read timestep `t` as a `[y, x]` array with missing values as NaN.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::DimensionMismatch`] when `t` is out of range and
    /// [`IoError::Netcdf`] on read failures.
    pub fn read_slice(&self, t: usize) -> Result<Array2<f64>, IoError> {
        if t >= self.dates.len() {
            return Err(IoError::DimensionMismatch {
                name: "time index".to_string(),
                expected: self.dates.len(),
                got: t,
            });
        }
        let var = netcdf_read::variable(&self.file, &self.variable, &self.path)?;
        let raw = var.get_values::<f64, _>((t, .., ..))?;
        let values: Vec<f64> = raw.into_iter().map(|v| self.encoding.decode(v)).collect();
        Array2::from_shape_vec(self.shape(), values).map_err(|e| IoError::Netcdf {
            reason: format!("slice {t} of '{}': {e}", self.variable),
        })
    }

    /// Read every timestep as a `[time, y, x]` array.
    ///
    /// # Errors
    ///
    /// Same as [`GridReader::read_slice`].
    pub fn read_all(&self) -> Result<Array3<f64>, IoError> {
        let [ny, nx] = self.shape();
        let mut out = Array3::from_elem((self.dates.len(), ny, nx), f64::NAN);
        for (t, mut slot) in out.axis_iter_mut(Axis(0)).enumerate() {
            slot.assign(&self.read_slice(t)?);
        }
        Ok(out)
    }
}

fn read_axis(
    file: &netcdf::File,
    dim_name: &str,
    aliases: &[String],
    path: &Path,
) -> Result<Vec<f64>, IoError> {
    let mut names: Vec<&str> = vec![dim_name];
    names.extend(aliases.iter().map(String::as_str).filter(|a| *a != dim_name));
    match netcdf_read::read_1d_f64(file, &names, path) {
        Ok(axis) => Ok(axis),
        // Report the configured alias rather than the dimension name.
        Err(IoError::MissingVariable { path, .. }) => Err(IoError::MissingVariable {
            name: aliases.first().cloned().unwrap_or_else(|| dim_name.to_string()),
            path,
        }),
        Err(e) => Err(e),
    }
}

fn check_len(name: &str, expected: usize, got: usize) -> Result<(), IoError> {
    if expected == got {
        Ok(())
    } else {
        Err(IoError::DimensionMismatch {
            name: name.to_string(),
            expected,
            got,
        })
    }
}
