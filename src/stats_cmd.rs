//! Stats command: resample a grid in time, aggregate by zone, write CSV.

use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::{debug, info, info_span};

use gridzone_io::{GridReader, read_zones, write_csv};
use gridzone_resample::{Resampler, SummaryType};
use gridzone_zonal::calculate_zonal_statistics;

use crate::cli::StatsArgs;
use crate::config::GridzoneConfig;
use crate::convert;

/// Run the zonal statistics pipeline.
pub fn run(args: StatsArgs) -> Result<()> {
    let _cmd = info_span!("stats").entered();

    // 1. Load project TOML and apply command-line overrides
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => GridzoneConfig::default(),
    };
    apply_overrides(&mut config, args);

    // 2. Build crate configs
    let Some(grid_file) = config.grid.file.clone() else {
        bail!("no grid file: set [grid].file in config or use --grid-file");
    };
    let summary_type = convert::parse_summary_type(&config.summary.summary_type)?;
    let reader_cfg = convert::build_reader_config(&config.grid);
    let zone_source = convert::build_zone_source(&config.zones)?;
    let zonal_cfg = convert::build_zonal_config(&config.summary, &config.output)?;
    let writer_cfg = convert::build_writer_config(&config.output)?;

    // 3. Open the grid and load zones onto it
    let reader = GridReader::open(&grid_file, &reader_cfg)
        .with_context(|| format!("failed to open grid: {}", grid_file.display()))?;
    let zones = read_zones(&zone_source, reader.geometry()).with_context(|| {
        format!("failed to load zones: {}", zone_source.path().display())
    })?;

    // 4. Temporal reduction, one slice at a time
    let grid = resample(&reader, summary_type)?;
    info!(
        summary_type = %summary_type,
        n_slices = grid.len(),
        "temporal reduction complete"
    );

    // 5. Zonal statistics and labels
    let table = calculate_zonal_statistics(&grid, &zones, &zonal_cfg)
        .context("zonal statistics failed")?;
    if table.is_empty() {
        bail!("no zones left after exclusions; check the zone layer and [output].exclude_zones");
    }

    // 6. Write CSV
    write_csv(&config.output.file, &table, &writer_cfg).with_context(|| {
        format!("failed to write CSV: {}", config.output.file.display())
    })?;
    info!(path = %config.output.file.display(), rows = table.len(), "done");

    Ok(())
}

/// Print every accepted summary tag with a short description.
pub fn list_summary_types() {
    for st in SummaryType::ALL {
        println!("{:<18} {}", st.tag(), st.description());
    }
    println!("{:<18} alias of seasonal_sum", "quarterly_sum");
    println!("{:<18} alias of seasonal_mean", "quarterly_mean");
}

fn load_config(path: &Path) -> Result<GridzoneConfig> {
    let toml_str = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    toml::from_str(&toml_str).context("failed to parse TOML config")
}

fn apply_overrides(config: &mut GridzoneConfig, args: StatsArgs) {
    if let Some(file) = args.grid_file {
        config.grid.file = Some(file);
    }
    if let Some(variable) = args.variable_name {
        config.grid.variable = variable;
    }
    if let Some(file) = args.zone_file {
        config.zones.file = Some(file);
    }
    if let Some(attribute) = args.zone_attribute {
        config.zones.attribute = attribute;
    }
    if let Some(summary_type) = args.summary_type {
        config.summary.summary_type = summary_type;
    }
    if let Some(width) = args.zone_width {
        config.output.zone_width = width;
    }
    if let Some(output) = args.output {
        config.output.file = output;
    }
}

fn resample(
    reader: &GridReader,
    summary_type: SummaryType,
) -> Result<gridzone_resample::ResampledGrid> {
    let mut resampler = Resampler::new(summary_type, reader.shape());
    for (t, &date) in reader.dates().iter().enumerate() {
        let slice = reader
            .read_slice(t)
            .with_context(|| format!("failed to read timestep {t} ({date})"))?;
        resampler.push(date, slice.view())?;
        if (t + 1) % 365 == 0 {
            debug!(steps = t + 1, %date, "resampling");
        }
    }
    debug!(n_steps = resampler.n_steps(), "all timesteps read");
    resampler.finish().context("grid has no timesteps")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn args() -> StatsArgs {
        StatsArgs {
            config: None,
            grid_file: None,
            variable_name: None,
            zone_file: None,
            zone_attribute: None,
            summary_type: None,
            zone_width: None,
            output: None,
        }
    }

    #[test]
    fn flags_override_config() {
        let text = concat!(
            "[grid]\nfile = \"a.nc\"\nvariable = \"pet\"\n",
            "[summary]\nsummary_type = \"annual_sum\"\n",
        );
        let mut config: GridzoneConfig = toml::from_str(text).unwrap();
        let overrides = StatsArgs {
            variable_name: Some("actual_et".into()),
            zone_width: Some(5),
            ..args()
        };
        apply_overrides(&mut config, overrides);

        assert_eq!(config.grid.file, Some(PathBuf::from("a.nc")));
        assert_eq!(config.grid.variable, "actual_et");
        assert_eq!(config.summary.summary_type, "annual_sum");
        assert_eq!(config.output.zone_width, 5);
    }

    /// Writes a 2 x 3 daily grid for 2016 and a matching ASCII zone grid.
    fn fixture(dir: &Path) -> (PathBuf, PathBuf) {
        let grid = dir.join("aet.nc");
        let nt = 366;
        {
            let mut file = netcdf::create(&grid).unwrap();
            file.add_dimension("time", nt).unwrap();
            file.add_dimension("y", 2).unwrap();
            file.add_dimension("x", 3).unwrap();
            let mut x = file.add_variable::<f64>("x", &["x"]).unwrap();
            x.put_values(&[5.0, 15.0, 25.0], ..).unwrap();
            let mut y = file.add_variable::<f64>("y", &["y"]).unwrap();
            y.put_values(&[15.0, 5.0], ..).unwrap();
            let mut time = file.add_variable::<f64>("time", &["time"]).unwrap();
            let offsets: Vec<f64> = (0..nt).map(|t| t as f64).collect();
            time.put_values(&offsets, ..).unwrap();
            time.put_attribute("units", "days since 2016-01-01").unwrap();
            let mut aet = file
                .add_variable::<f64>("actual_et", &["time", "y", "x"])
                .unwrap();
            let per_day = [1.0, 1.0, 2.0, 1.0, 50.0, 2.0];
            let data: Vec<f64> = (0..nt).flat_map(|_| per_day).collect();
            aet.put_values(&data, ..).unwrap();
        }

        let zones = dir.join("zones.asc");
        std::fs::write(
            &zones,
            "ncols 3\nnrows 2\nxllcorner 0\nyllcorner 0\ncellsize 10\nNODATA_value -9999\n\
             1 1 12\n1 -9999 12\n",
        )
        .unwrap();
        (grid, zones)
    }

    #[test]
    fn annual_sum_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let (grid, zones) = fixture(dir.path());
        let output = dir.path().join("out.csv");

        run(StatsArgs {
            grid_file: Some(grid),
            zone_file: Some(zones),
            summary_type: Some("annual_sum".into()),
            output: Some(output.clone()),
            ..args()
        })
        .unwrap();

        let text = std::fs::read_to_string(&output).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "zone,mean,max,min,sum,std,var,count,month,year,date,water_year",
                "001,366.0,366.0,366.0,1098.0,0.0,0.0,3,6,2016,2016-06-01,2016",
                "012,732.0,732.0,732.0,1464.0,0.0,0.0,2,6,2016,2016-06-01,2016",
            ]
        );
    }

    #[test]
    fn unknown_summary_type_fails_before_reading() {
        let err = run(StatsArgs {
            grid_file: Some("/nonexistent/aet.nc".into()),
            zone_file: Some("/nonexistent/zones.asc".into()),
            summary_type: Some("weekly_sum".into()),
            ..args()
        })
        .unwrap_err();
        assert!(format!("{err:#}").contains("weekly_sum"));
    }

    #[test]
    fn missing_grid_file() {
        let err = run(args()).unwrap_err();
        assert!(err.to_string().contains("no grid file"));
    }
}
