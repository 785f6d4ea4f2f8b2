//! Low-level NetCDF extraction helpers.

use std::path::Path;

use netcdf::AttributeValue;

use crate::error::IoError;

/// Open a NetCDF file at `path`, returning [`IoError::FileNotFound`] if the
/// path does not exist on disk.
pub(crate) fn open_file(path: &Path) -> Result<netcdf::File, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(netcdf::open(path)?)
}

/// Look up a variable by name, returning [`IoError::MissingVariable`] if it
/// is absent.
pub(crate) fn variable<'f>(
    file: &'f netcdf::File,
    name: &str,
    path: &Path,
) -> Result<netcdf::Variable<'f>, IoError> {
    file.variable(name).ok_or_else(|| IoError::MissingVariable {
        name: name.to_string(),
        path: path.to_path_buf(),
    })
}

/// Read a 1-D `f64` variable, trying each alias in order.
///
/// Returns the data from the first alias that matches. If none match,
/// returns [`IoError::MissingVariable`] with the first alias as the name.
pub(crate) fn read_1d_f64(
    file: &netcdf::File,
    aliases: &[&str],
    path: &Path,
) -> Result<Vec<f64>, IoError> {
    for &alias in aliases {
        if let Some(var) = file.variable(alias) {
            return Ok(var.get_values::<f64, _>(..)?);
        }
    }

    let name = aliases.first().copied().unwrap_or("unknown");
    Err(IoError::MissingVariable {
        name: name.to_string(),
        path: path.to_path_buf(),
    })
}

/// Read a string attribute, returning `None` when absent or not a string.
pub(crate) fn attribute_str(var: &netcdf::Variable<'_>, name: &str) -> Option<String> {
    match var.attribute_value(name)?.ok()? {
        AttributeValue::Str(s) => Some(s),
        _ => None,
    }
}

/// Read a numeric scalar attribute as `f64`, returning `None` when absent or
/// not numeric. Single-element array attributes are accepted.
pub(crate) fn attribute_f64(var: &netcdf::Variable<'_>, name: &str) -> Option<f64> {
    let value = var.attribute_value(name)?.ok()?;
    match value {
        AttributeValue::Double(v) => Some(v),
        AttributeValue::Float(v) => Some(f64::from(v)),
        AttributeValue::Int(v) => Some(f64::from(v)),
        AttributeValue::Short(v) => Some(f64::from(v)),
        AttributeValue::Schar(v) => Some(f64::from(v)),
        AttributeValue::Uchar(v) => Some(f64::from(v)),
        AttributeValue::Ushort(v) => Some(f64::from(v)),
        AttributeValue::Uint(v) => Some(f64::from(v)),
        AttributeValue::Longlong(v) => Some(v as f64),
        AttributeValue::Ulonglong(v) => Some(v as f64),
        AttributeValue::Doubles(v) => v.first().copied(),
        AttributeValue::Floats(v) => v.first().map(|&x| f64::from(x)),
        AttributeValue::Ints(v) => v.first().map(|&x| f64::from(x)),
        AttributeValue::Shorts(v) => v.first().map(|&x| f64::from(x)),
        _ => None,
    }
}

/// CF packing and missing-value attributes of a data variable.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct CfEncoding {
    pub missing: Vec<f64>,
    pub scale_factor: Option<f64>,
    pub add_offset: Option<f64>,
}

impl CfEncoding {
    /// Collect `_FillValue`, `missing_value`, `scale_factor` and `add_offset`.
    pub(crate) fn of(var: &netcdf::Variable<'_>) -> Self {
        let missing = ["_FillValue", "missing_value"]
            .iter()
            .filter_map(|name| attribute_f64(var, name))
            .collect();
        Self {
            missing,
            scale_factor: attribute_f64(var, "scale_factor"),
            add_offset: attribute_f64(var, "add_offset"),
        }
    }

    /// Decode one raw value: missing markers become NaN, then unpack.
    pub(crate) fn decode(&self, raw: f64) -> f64 {
        if self.missing.iter().any(|&m| m == raw) {
            return f64::NAN;
        }
        let scaled = match self.scale_factor {
            Some(s) => raw * s,
            None => raw,
        };
        match self.add_offset {
            Some(o) => scaled + o,
            None => scaled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_masks_fill_values() {
        let enc = CfEncoding {
            missing: vec![-9999.0, 1.0e20],
            ..CfEncoding::default()
        };
        assert!(enc.decode(-9999.0).is_nan());
        assert!(enc.decode(1.0e20).is_nan());
        assert_eq!(enc.decode(3.5), 3.5);
    }

    #[test]
    fn decode_unpacks_after_masking() {
        let enc = CfEncoding {
            missing: vec![-32768.0],
            scale_factor: Some(0.1),
            add_offset: Some(2.0),
        };
        assert!(enc.decode(-32768.0).is_nan());
        assert!((enc.decode(10.0) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn decode_without_attributes_is_identity() {
        let enc = CfEncoding::default();
        assert_eq!(enc.decode(-9999.0), -9999.0);
    }
}
