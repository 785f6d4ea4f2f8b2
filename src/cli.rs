use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Zonal statistics of gridded time series.
#[derive(Parser)]
#[command(
    name = "gridzone",
    version,
    about = "Zonal summary statistics of gridded time series"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Resample a grid in time and write per-zone statistics to CSV.
    Stats(StatsArgs),
    /// List the accepted summary types.
    SummaryTypes,
}

/// Arguments for the `stats` subcommand. Flags override the TOML file.
#[derive(clap::Args)]
pub struct StatsArgs {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// NetCDF file holding the gridded time series.
    #[arg(long = "grid-file", visible_alias = "grid_file")]
    pub grid_file: Option<PathBuf>,

    /// Name of the variable to summarize.
    #[arg(long = "variable-name", visible_alias = "variable_name")]
    pub variable_name: Option<String>,

    /// Zone layer (.asc, .nc, .geojson or .json).
    #[arg(long = "zone-file", visible_alias = "zone_file")]
    pub zone_file: Option<PathBuf>,

    /// GeoJSON property holding zone codes.
    #[arg(long = "zone-attribute")]
    pub zone_attribute: Option<String>,

    /// Summary type, e.g. monthly_sum or seasonal_sum.
    #[arg(short, long = "summary-type", visible_alias = "summary_type")]
    pub summary_type: Option<String>,

    /// Zero-padded width of zone codes (0 disables padding).
    #[arg(long = "zone-width")]
    pub zone_width: Option<usize>,

    /// Output CSV path.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
