//! Configuration for zonal aggregation.

use gridzone_calendar::DEFAULT_WATER_YEAR_START;

use crate::error::ZonalError;

/// Configuration for [`calculate_zonal_statistics`](crate::calculate_zonal_statistics).
///
/// # Example
///
/// ```
/// use gridzone_zonal::ZonalConfig;
///
/// let config = ZonalConfig::new()
///     .with_zone_width(Some(2))
///     .with_excluded_zones([-9999]);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ZonalConfig {
    zone_width: Option<usize>,
    water_year_start: u8,
    excluded_zones: Vec<i64>,
}

impl ZonalConfig {
    /// Creates a configuration with defaults.
    ///
    /// Defaults: `zone_width = Some(3)`, `water_year_start = 10`, no excluded
    /// zones.
    pub fn new() -> Self {
        Self {
            zone_width: Some(3),
            water_year_start: DEFAULT_WATER_YEAR_START,
            excluded_zones: Vec::new(),
        }
    }

    /// Sets the zero-padded width of zone codes, `None` to disable padding.
    pub fn with_zone_width(mut self, width: Option<usize>) -> Self {
        self.zone_width = width;
        self
    }

    /// Sets the first month of the water year.
    pub fn with_water_year_start(mut self, month: u8) -> Self {
        self.water_year_start = month;
        self
    }

    /// Sets zone codes dropped from the output.
    pub fn with_excluded_zones(mut self, zones: impl IntoIterator<Item = i64>) -> Self {
        self.excluded_zones = zones.into_iter().collect();
        self
    }

    // --- Accessors ---

    /// Returns the zone code width.
    pub fn zone_width(&self) -> Option<usize> {
        self.zone_width
    }

    /// Returns the water-year start month.
    pub fn water_year_start(&self) -> u8 {
        self.water_year_start
    }

    /// Returns the excluded zone codes.
    pub fn excluded_zones(&self) -> &[i64] {
        &self.excluded_zones
    }

    /// Whether rows for `zone` are dropped.
    pub fn is_excluded(&self, zone: i64) -> bool {
        self.excluded_zones.contains(&zone)
    }

    /// Validates this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ZonalError::InvalidConfig`] if the water-year start month is
    /// outside 1..=12.
    pub fn validate(&self) -> Result<(), ZonalError> {
        if !(1..=12).contains(&self.water_year_start) {
            return Err(ZonalError::InvalidConfig {
                reason: format!(
                    "water_year_start must be 1..=12, got {}",
                    self.water_year_start
                ),
            });
        }
        Ok(())
    }
}

impl Default for ZonalConfig {
    fn default() -> Self {
        Self::new()
    }
}
