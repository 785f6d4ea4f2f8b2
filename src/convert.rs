//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Context, Result, bail};

use gridzone_io::{ReaderConfig, WriterConfig, ZoneSource};
use gridzone_resample::SummaryType;
use gridzone_zonal::ZonalConfig;

use crate::config::*;

/// Parses a summary tag, listing the accepted tags on failure.
pub fn parse_summary_type(s: &str) -> Result<SummaryType> {
    s.parse::<SummaryType>().with_context(|| {
        let tags: Vec<&str> = SummaryType::ALL.iter().map(|t| t.tag()).collect();
        format!("accepted summary types: {}", tags.join(", "))
    })
}

/// Builds a [`ReaderConfig`] from the TOML grid configuration.
pub fn build_reader_config(grid: &GridToml) -> ReaderConfig {
    let mut cfg = ReaderConfig::default()
        .with_variable(&grid.variable)
        .with_time_var(&grid.time_var);
    if let Some(aliases) = &grid.x_aliases {
        cfg = cfg.with_x_aliases(aliases);
    }
    if let Some(aliases) = &grid.y_aliases {
        cfg = cfg.with_y_aliases(aliases);
    }
    cfg
}

/// Builds a [`ZoneSource`] from the TOML zone configuration.
pub fn build_zone_source(zones: &ZonesToml) -> Result<ZoneSource> {
    let Some(file) = &zones.file else {
        bail!("no zone file: set [zones].file in config or use --zone-file");
    };
    Ok(ZoneSource::new(file)
        .with_attribute(&zones.attribute)
        .with_variable(&zones.variable)
        .with_fill_value(zones.fill_value))
}

/// Builds a [`ZonalConfig`]. A zone width of 0 disables padding.
pub fn build_zonal_config(summary: &SummaryToml, output: &OutputToml) -> Result<ZonalConfig> {
    let width = (output.zone_width > 0).then_some(output.zone_width);
    let cfg = ZonalConfig::new()
        .with_zone_width(width)
        .with_water_year_start(summary.water_year_start_month)
        .with_excluded_zones(output.exclude_zones.iter().copied());
    cfg.validate().context("invalid [summary]/[output] settings")?;
    Ok(cfg)
}

/// Builds a [`WriterConfig`] from the TOML output configuration.
pub fn build_writer_config(output: &OutputToml) -> Result<WriterConfig> {
    let delimiter = u8::try_from(output.delimiter)
        .ok()
        .filter(u8::is_ascii)
        .with_context(|| {
            format!("delimiter {:?} is not a single ASCII character", output.delimiter)
        })?;
    Ok(WriterConfig::default()
        .with_delimiter(delimiter)
        .with_na_rep(&output.na_rep))
}
