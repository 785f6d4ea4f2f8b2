//! Error types for the gridzone-resample crate.

/// Error type for all fallible operations in the gridzone-resample crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResampleError {
    /// Returned when no time steps were supplied.
    #[error("input data is empty")]
    EmptyData,

    /// Returned when a slice does not have the grid shape.
    #[error("slice shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        /// Shape the resampler was created with, `[ny, nx]`.
        expected: [usize; 2],
        /// Shape of the offending slice.
        got: [usize; 2],
    },

    /// Returned when array lengths don't match.
    #[error("{field}: expected {expected} elements, got {got}")]
    LengthMismatch {
        /// Name of the mismatched field.
        field: &'static str,
        /// Expected length.
        expected: usize,
        /// Actual length.
        got: usize,
    },

    /// Returned when a summary tag is not recognised.
    #[error("unknown summary type '{tag}'")]
    UnknownSummaryType {
        /// The tag that failed to parse.
        tag: String,
    },
}
