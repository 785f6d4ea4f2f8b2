//! CSV writer configuration and orchestration.

use std::path::Path;

use gridzone_zonal::{STAT_COLUMNS, ZonalRecord, ZonalTable};
use tracing::info;

use crate::error::IoError;

/// Configuration for writing a zonal result table to CSV.
#[derive(Debug, Clone)]
pub struct WriterConfig {
    /// Field delimiter.
    delimiter: u8,
    /// Text written for missing (NaN) statistics.
    na_rep: String,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            na_rep: String::new(),
        }
    }
}

impl WriterConfig {
    /// Sets the field delimiter.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets the text written for missing values.
    pub fn with_na_rep(mut self, na_rep: impl Into<String>) -> Self {
        self.na_rep = na_rep.into();
        self
    }

    /// Text written for missing values.
    pub fn na_rep(&self) -> &str {
        &self.na_rep
    }

    /// Validates this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] if the delimiter is a quote, a line
    /// break or a non-ASCII byte.
    fn validate(&self) -> Result<(), IoError> {
        if !self.delimiter.is_ascii() || matches!(self.delimiter, b'"' | b'\n' | b'\r') {
            return Err(IoError::Validation {
                count: 1,
                details: format!("invalid CSV delimiter byte {:#04x}", self.delimiter),
            });
        }
        Ok(())
    }
}

/// Write `table` to `path` as CSV.
///
/// Columns are `zone`, the statistics (`mean,max,min,sum,std,var,count`)
/// and then the label columns of the table's summary type. Integral floats
/// keep a trailing `.0`.
///
/// # Errors
///
/// Returns [`IoError::Validation`] if the configuration is invalid, or
/// [`IoError::Csv`] if the file cannot be created or written.
pub fn write_csv(path: &Path, table: &ZonalTable, config: &WriterConfig) -> Result<(), IoError> {
    config.validate()?;

    let mut wtr = csv::WriterBuilder::new()
        .delimiter(config.delimiter)
        .from_path(path)?;

    let labels = table.label_columns();
    let mut header = Vec::with_capacity(1 + STAT_COLUMNS.len() + labels.len());
    header.push("zone");
    header.extend(STAT_COLUMNS);
    header.extend(labels.iter().map(|c| c.name()));
    wtr.write_record(&header)?;

    for record in table.records() {
        wtr.write_record(row(record, table, config.na_rep()))?;
    }
    wtr.flush().map_err(|e| IoError::Io {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    info!(path = %path.display(), rows = table.len(), "wrote zonal statistics");
    Ok(())
}

fn row(record: &ZonalRecord, table: &ZonalTable, na_rep: &str) -> Vec<String> {
    let s = &record.stats;
    let mut fields = vec![record.zone.clone()];
    fields.extend(
        [s.mean, s.max, s.min, s.sum, s.std, s.var]
            .into_iter()
            .map(|v| format_float(v, na_rep)),
    );
    fields.push(s.count.to_string());
    fields.extend(
        table
            .label_columns()
            .iter()
            .map(|c| c.format(&record.labels).unwrap_or_else(|| na_rep.to_string())),
    );
    fields
}

fn format_float(v: f64, na_rep: &str) -> String {
    if v.is_nan() {
        na_rep.to_string()
    } else if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e16 {
        format!("{v:.1}")
    } else {
        v.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_formatting() {
        assert_eq!(format_float(31.0, ""), "31.0");
        assert_eq!(format_float(-0.25, ""), "-0.25");
        assert_eq!(format_float(f64::NAN, "NA"), "NA");
        assert_eq!(format_float(f64::INFINITY, ""), "inf");
    }

    #[test]
    fn validate_rejects_quote_delimiter() {
        assert!(WriterConfig::default().validate().is_ok());
        assert!(WriterConfig::default().with_delimiter(b';').validate().is_ok());
        assert!(WriterConfig::default().with_delimiter(b'"').validate().is_err());
        assert!(WriterConfig::default().with_delimiter(0xE9).validate().is_err());
    }
}
