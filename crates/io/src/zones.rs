//! Zone layer loading.

use std::path::{Path, PathBuf};

use gridzone_zonal::ZoneRaster;
use ndarray::Array2;
use tracing::{debug, info, warn};

use crate::ascii_grid;
use crate::error::IoError;
use crate::geojson::{self, ZoneShape};
use crate::netcdf_read::{self, CfEncoding};
use crate::rasterize::{DEFAULT_FILL, rasterize};
use crate::reader::GridGeometry;
use crate::shp;

/// On-disk encoding of a zone layer, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneFormat {
    /// Arc/Info ASCII grid (`.asc`).
    AsciiGrid,
    /// 2-D NetCDF variable (`.nc`).
    NetCdf,
    /// GeoJSON FeatureCollection (`.geojson`, `.json`).
    GeoJson,
    /// ESRI shapefile with its `.dbf` attribute table (`.shp`).
    Shapefile,
}

impl ZoneFormat {
    /// Detect the format from the extension of `path` (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`IoError::UnsupportedZoneFormat`] for any other extension.
    pub fn from_path(path: &Path) -> Result<Self, IoError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("asc") => Ok(Self::AsciiGrid),
            Some("nc" | "nc4") => Ok(Self::NetCdf),
            Some("geojson" | "json") => Ok(Self::GeoJson),
            Some("shp") => Ok(Self::Shapefile),
            _ => Err(IoError::UnsupportedZoneFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// Where zone codes come from and how uncovered cells are coded.
#[derive(Debug, Clone)]
pub struct ZoneSource {
    path: PathBuf,
    /// Feature property or dBase column holding the zone code (GeoJSON and
    /// shapefile).
    attribute: String,
    /// Variable holding the zone codes (NetCDF).
    variable: String,
    /// Code for cells outside every zone (vector layers and NetCDF), and for
    /// ASCII grid nodata cells when the header value is not an integer.
    fill_value: i64,
}

impl ZoneSource {
    /// A source reading `path` with the `zone` attribute/variable and a fill
    /// value of [`DEFAULT_FILL`].
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            attribute: "zone".into(),
            variable: "zone".into(),
            fill_value: DEFAULT_FILL,
        }
    }

    /// Set the GeoJSON property or shapefile column holding zone codes.
    pub fn with_attribute(mut self, name: impl Into<String>) -> Self {
        self.attribute = name.into();
        self
    }

    /// Set the NetCDF variable holding zone codes.
    pub fn with_variable(mut self, name: impl Into<String>) -> Self {
        self.variable = name.into();
        self
    }

    /// Set the code given to cells outside every zone.
    pub fn with_fill_value(mut self, fill: i64) -> Self {
        self.fill_value = fill;
        self
    }

    /// Path of the zone layer.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Attribute holding zone codes in vector layers.
    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    /// Variable holding zone codes in NetCDF layers.
    pub fn variable(&self) -> &str {
        &self.variable
    }

    /// Code for cells outside every zone.
    pub fn fill_value(&self) -> i64 {
        self.fill_value
    }
}

/// Load the zone layer described by `source` onto the grid described by
/// `geometry`.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] when the file is absent,
/// [`IoError::UnsupportedZoneFormat`] for unknown extensions,
/// [`IoError::DimensionMismatch`] when a raster layer's shape differs from
/// the grid, and a format-specific parse error otherwise.
pub fn read_zones(source: &ZoneSource, geometry: &GridGeometry) -> Result<ZoneRaster, IoError> {
    let path = source.path();
    let format = ZoneFormat::from_path(path)?;
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let zones = match format {
        ZoneFormat::AsciiGrid => read_ascii(source, geometry)?,
        ZoneFormat::NetCdf => read_netcdf(source, geometry)?,
        ZoneFormat::GeoJson => {
            let shapes = geojson::parse(&read_text(path)?, source.attribute(), path)?;
            burn(shapes, source, geometry)
        }
        ZoneFormat::Shapefile => burn(shp::read(path, source.attribute())?, source, geometry),
    };
    info!(
        path = %path.display(),
        ?format,
        n_zones = zones.zone_ids().len(),
        n_cells = zones.n_zoned_cells(),
        "loaded zones"
    );
    Ok(zones)
}

fn read_text(path: &Path) -> Result<String, IoError> {
    std::fs::read_to_string(path).map_err(|e| IoError::Io {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

fn read_ascii(source: &ZoneSource, geometry: &GridGeometry) -> Result<ZoneRaster, IoError> {
    let path = source.path();
    let grid = ascii_grid::parse(&read_text(path)?, path)?;
    let [ny, nx] = geometry.shape();
    check_dim("zone rows", ny, grid.nrows)?;
    check_dim("zone cols", nx, grid.ncols)?;

    // Header nodata paired with the code its cells receive.
    let nodata = grid.nodata.map(|raw| {
        let code = if is_integral(raw) { raw as i64 } else { source.fill_value() };
        (raw, code)
    });

    let mut codes = Vec::with_capacity(grid.values.len());
    for (i, &v) in grid.values.iter().enumerate() {
        if let Some((raw, code)) = nodata
            && (v == raw || (v.is_nan() && raw.is_nan()))
        {
            codes.push(code);
            continue;
        }
        if !is_integral(v) {
            return Err(IoError::Validation {
                count: 1,
                details: format!("{}: cell {i} has non-integer zone code {v}", path.display()),
            });
        }
        codes.push(v as i64);
    }
    let mut codes = Array2::from_shape_vec((ny, nx), codes).map_err(|e| IoError::Validation {
        count: 1,
        details: format!("{}: {e}", path.display()),
    })?;

    if geometry.y_ascending() {
        debug!("grid y axis ascends; flipping north-up zone rows");
        codes.invert_axis(ndarray::Axis(0));
    }
    check_alignment(&grid, geometry);

    Ok(ZoneRaster::new(codes, nodata.map(|(_, code)| code)))
}

fn is_integral(v: f64) -> bool {
    v.is_finite() && v.fract() == 0.0
}

/// Warn when the zone grid's first cell centre is more than half a cell away
/// from the data grid's.
fn check_alignment(grid: &ascii_grid::AsciiGrid, geometry: &GridGeometry) {
    let x0 = geometry.x().first().copied();
    let y_top = if geometry.y_ascending() {
        geometry.y().last().copied()
    } else {
        geometry.y().first().copied()
    };
    let tolerance = 0.5 * grid.cellsize;
    if let (Some(x0), Some(y_top)) = (x0, y_top)
        && ((x0 - grid.first_x_center()).abs() > tolerance
            || (y_top - grid.top_y_center()).abs() > tolerance)
    {
        warn!(
            grid_x = x0,
            grid_y = y_top,
            zone_x = grid.first_x_center(),
            zone_y = grid.top_y_center(),
            "zone grid origin does not line up with the data grid; zones are matched by cell index"
        );
    }
}

fn read_netcdf(source: &ZoneSource, geometry: &GridGeometry) -> Result<ZoneRaster, IoError> {
    let path = source.path();
    let file = netcdf_read::open_file(path)?;
    let var = netcdf_read::variable(&file, source.variable(), path)?;

    let dims: Vec<usize> = var.dimensions().iter().map(|d| d.len()).collect();
    let [ny, nx] = geometry.shape();
    match dims.as_slice() {
        [zy, zx] => {
            check_dim("zone rows", ny, *zy)?;
            check_dim("zone cols", nx, *zx)?;
        }
        _ => {
            return Err(IoError::DimensionMismatch {
                name: format!("{} dimensions", source.variable()),
                expected: 2,
                got: dims.len(),
            });
        }
    }

    let encoding = CfEncoding::of(&var);
    let fill = source.fill_value();
    let codes: Vec<i64> = var
        .get_values::<f64, _>(..)?
        .into_iter()
        .map(|raw| {
            let v = encoding.decode(raw);
            if v.is_finite() { v.round() as i64 } else { fill }
        })
        .collect();
    let codes = Array2::from_shape_vec((ny, nx), codes).map_err(|e| IoError::Netcdf {
        reason: format!("zone variable '{}': {e}", source.variable()),
    })?;

    Ok(ZoneRaster::new(codes, Some(fill)))
}

/// Rasterize vector zone shapes onto the grid.
fn burn(shapes: Vec<ZoneShape>, source: &ZoneSource, geometry: &GridGeometry) -> ZoneRaster {
    debug!(n_features = shapes.len(), "parsed zone polygons");
    let pairs: Vec<_> = shapes.into_iter().map(|s| (s.shape, s.zone)).collect();
    let codes = rasterize(&pairs, geometry, source.fill_value());
    ZoneRaster::new(codes, Some(source.fill_value()))
}

fn check_dim(name: &str, expected: usize, got: usize) -> Result<(), IoError> {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_extension() {
        let format = |name: &str| ZoneFormat::from_path(Path::new(name));
        assert_eq!(format("z.ASC").expect("asc"), ZoneFormat::AsciiGrid);
        assert_eq!(format("z.nc").expect("nc"), ZoneFormat::NetCdf);
        assert_eq!(format("z.json").expect("json"), ZoneFormat::GeoJson);
        assert_eq!(format("basins.SHP").expect("shp"), ZoneFormat::Shapefile);
        assert!(matches!(
            format("z.tif"),
            Err(IoError::UnsupportedZoneFormat { .. })
        ));
        assert!(format("zones").is_err());
    }

    #[test]
    fn source_defaults() {
        let source = ZoneSource::new("basins.geojson");
        assert_eq!(source.attribute(), "zone");
        assert_eq!(source.variable(), "zone");
        assert_eq!(source.fill_value(), DEFAULT_FILL);

        let source = source.with_attribute("HRU_ID").with_fill_value(0);
        assert_eq!(source.attribute(), "HRU_ID");
        assert_eq!(source.fill_value(), 0);
    }

    #[test]
    fn missing_zone_file() {
        let geometry = GridGeometry::new(vec![0.5], vec![0.5]);
        let err = read_zones(&ZoneSource::new("/nonexistent/zones.asc"), &geometry)
            .expect_err("missing");
        assert!(matches!(err, IoError::FileNotFound { .. }));
    }
}
