use std::path::PathBuf;

use serde::Deserialize;

/// Top-level gridzone configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GridzoneConfig {
    /// Gridded input settings.
    #[serde(default)]
    pub grid: GridToml,

    /// Zone layer settings.
    #[serde(default)]
    pub zones: ZonesToml,

    /// Temporal summary settings.
    #[serde(default)]
    pub summary: SummaryToml,

    /// CSV output settings.
    #[serde(default)]
    pub output: OutputToml,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GridToml {
    pub file: Option<PathBuf>,
    #[serde(default = "default_variable")]
    pub variable: String,
    #[serde(default = "default_time_var")]
    pub time_var: String,
    /// Replaces the default x coordinate names (`x`, `lon`, `longitude`).
    #[serde(default)]
    pub x_aliases: Option<Vec<String>>,
    /// Replaces the default y coordinate names (`y`, `lat`, `latitude`).
    #[serde(default)]
    pub y_aliases: Option<Vec<String>>,
}

impl Default for GridToml {
    fn default() -> Self {
        Self {
            file: None,
            variable: default_variable(),
            time_var: default_time_var(),
            x_aliases: None,
            y_aliases: None,
        }
    }
}

fn default_variable() -> String {
    "actual_et".to_string()
}
fn default_time_var() -> String {
    "time".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ZonesToml {
    pub file: Option<PathBuf>,
    #[serde(default = "default_zone_field")]
    pub attribute: String,
    #[serde(default = "default_zone_field")]
    pub variable: String,
    #[serde(default = "default_fill_value")]
    pub fill_value: i64,
}

impl Default for ZonesToml {
    fn default() -> Self {
        Self {
            file: None,
            attribute: default_zone_field(),
            variable: default_zone_field(),
            fill_value: default_fill_value(),
        }
    }
}

fn default_zone_field() -> String {
    "zone".to_string()
}
fn default_fill_value() -> i64 {
    -9999
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SummaryToml {
    #[serde(default = "default_summary_type")]
    pub summary_type: String,
    #[serde(default = "default_water_year_start")]
    pub water_year_start_month: u8,
}

impl Default for SummaryToml {
    fn default() -> Self {
        Self {
            summary_type: default_summary_type(),
            water_year_start_month: default_water_year_start(),
        }
    }
}

fn default_summary_type() -> String {
    "seasonal_sum".to_string()
}
fn default_water_year_start() -> u8 {
    10
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputToml {
    #[serde(default = "default_output_file")]
    pub file: PathBuf,
    #[serde(default = "default_zone_width")]
    pub zone_width: usize,
    #[serde(default)]
    pub exclude_zones: Vec<i64>,
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    /// Text written for missing statistics and labels.
    #[serde(default)]
    pub na_rep: String,
}

impl Default for OutputToml {
    fn default() -> Self {
        Self {
            file: default_output_file(),
            zone_width: default_zone_width(),
            exclude_zones: Vec::new(),
            delimiter: default_delimiter(),
            na_rep: String::new(),
        }
    }
}

fn default_output_file() -> PathBuf {
    PathBuf::from("simulated_actual_et.csv")
}
fn default_zone_width() -> usize {
    3
}
fn default_delimiter() -> char {
    ','
}
