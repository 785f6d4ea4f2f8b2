//! Concatenated per-zone, per-slice result table.

use gridzone_resample::{ResampledGrid, SummaryType};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::config::ZonalConfig;
use crate::error::ZonalError;
use crate::label::{LabelColumn, TimeLabels, annotate, label_columns};
use crate::stats::{ZoneStats, zonal_stats};
use crate::zone_code::format_zone_code;
use crate::zones::ZoneRaster;

/// One row of the result table: one zone in one slice.
#[derive(Debug, Clone, PartialEq)]
pub struct ZonalRecord {
    /// Formatted zone code.
    pub zone: String,
    /// Statistics of the zone's cells in this slice.
    pub stats: ZoneStats,
    /// Time labels of the slice.
    pub labels: TimeLabels,
}

/// Rows of all slices, in slice order and ascending zone order within a slice.
#[derive(Debug, Clone)]
pub struct ZonalTable {
    summary_type: SummaryType,
    records: Vec<ZonalRecord>,
}

impl ZonalTable {
    /// Creates a table from rows produced for `summary_type`.
    pub fn new(summary_type: SummaryType, records: Vec<ZonalRecord>) -> Self {
        Self {
            summary_type,
            records,
        }
    }

    /// Returns the summary type of the underlying slices.
    pub fn summary_type(&self) -> SummaryType {
        self.summary_type
    }

    /// Label columns present in every row.
    pub fn label_columns(&self) -> &'static [LabelColumn] {
        label_columns(self.summary_type)
    }

    /// Returns the rows.
    pub fn records(&self) -> &[ZonalRecord] {
        &self.records
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Computes labelled zonal statistics for every slice of `grid`.
///
/// Slices are processed in parallel; the output keeps slice order.
///
/// # Errors
///
/// Returns [`ZonalError::InvalidConfig`] for an invalid configuration,
/// [`ZonalError::ShapeMismatch`] if `zones` is not on the grid, or
/// [`ZonalError::LabelMismatch`] if a slice cannot be labelled.
pub fn calculate_zonal_statistics(
    grid: &ResampledGrid,
    zones: &ZoneRaster,
    config: &ZonalConfig,
) -> Result<ZonalTable, ZonalError> {
    config.validate()?;
    let summary_type = grid.summary_type();

    let per_slice: Vec<Vec<ZonalRecord>> = grid
        .slices()
        .par_iter()
        .map(|slice| -> Result<Vec<ZonalRecord>, ZonalError> {
            let labels = annotate(summary_type, slice.time(), config.water_year_start())?;
            let stats = zonal_stats(slice.values().view(), zones)?;
            debug!(time = %slice.time(), n_zones = stats.len(), "slice aggregated");
            Ok(stats
                .into_iter()
                .filter(|s| !config.is_excluded(s.zone))
                .map(|stats| ZonalRecord {
                    zone: format_zone_code(stats.zone, config.zone_width()),
                    stats,
                    labels,
                })
                .collect())
        })
        .collect::<Result<_, _>>()?;

    let records: Vec<ZonalRecord> = per_slice.into_iter().flatten().collect();
    info!(
        summary_type = %summary_type,
        n_slices = grid.len(),
        n_rows = records.len(),
        "zonal statistics computed"
    );
    Ok(ZonalTable::new(summary_type, records))
}
