//! Error types for the gridzone-zonal crate.

use gridzone_calendar::CalendarError;

/// Error type for all fallible operations in the gridzone-zonal crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ZonalError {
    /// Returned when a value grid and the zone raster differ in shape.
    #[error("zone raster shape {zones:?} does not match grid shape {grid:?}")]
    ShapeMismatch {
        /// Shape of the zone raster, `[ny, nx]`.
        zones: [usize; 2],
        /// Shape of the value grid, `[ny, nx]`.
        grid: [usize; 2],
    },

    /// Returned when a slice's time coordinate cannot be labelled for the
    /// summary type that produced the grid.
    #[error("cannot label slice '{time}' for summary type '{summary_type}'")]
    LabelMismatch {
        /// Summary type tag.
        summary_type: String,
        /// Display form of the slice time.
        time: String,
    },

    /// Wraps an error originating from the gridzone-calendar crate.
    #[error("calendar error: {reason}")]
    Calendar {
        /// Description of the underlying calendar failure.
        reason: String,
    },

    /// Returned when configuration is invalid.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },
}

impl From<CalendarError> for ZonalError {
    fn from(e: CalendarError) -> Self {
        ZonalError::Calendar {
            reason: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_shape_mismatch() {
        let err = ZonalError::ShapeMismatch {
            zones: [2, 2],
            grid: [3, 2],
        };
        assert_eq!(
            err.to_string(),
            "zone raster shape [2, 2] does not match grid shape [3, 2]"
        );
    }

    #[test]
    fn display_label_mismatch() {
        let err = ZonalError::LabelMismatch {
            summary_type: "monthly_sum".into(),
            time: "all".into(),
        };
        assert_eq!(
            err.to_string(),
            "cannot label slice 'all' for summary type 'monthly_sum'"
        );
    }

    #[test]
    fn from_calendar_error() {
        let err: ZonalError = CalendarError::InvalidMonth { month: 0 }.into();
        assert!(matches!(err, ZonalError::Calendar { .. }));
        assert!(err.to_string().contains("invalid month: 0"));
    }

    #[test]
    fn error_is_send_sync_and_std_error() {
        fn assert_bounds<T: Send + Sync + std::error::Error>() {}
        assert_bounds::<ZonalError>();
    }
}
