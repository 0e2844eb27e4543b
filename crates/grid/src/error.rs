//! Error types for teleconnect-grid.

/// Error type for all fallible operations in the teleconnect-grid crate.
///
/// Every variant describes a malformed or degenerate grid. These are raised
/// before any correlation work starts and are fatal to the run.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GridError {
    /// Returned when a grid index is requested over zero axes.
    #[error("grid must have at least one axis")]
    NoAxes,

    /// Returned when an axis has no coordinate values.
    #[error("axis '{axis}' is empty")]
    EmptyAxis {
        /// Name of the empty axis.
        axis: String,
    },

    /// Returned when a coordinate value is NaN or infinite.
    #[error("axis '{axis}' has non-finite coordinate {value} at index {index}")]
    NonFiniteCoordinate {
        /// Name of the offending axis.
        axis: String,
        /// Position of the value within the axis.
        index: usize,
        /// The offending value.
        value: f64,
    },

    /// Returned when an array shape does not match its axes.
    #[error("dimension '{name}' mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Name of the dimension.
        name: String,
        /// Expected size.
        expected: usize,
        /// Actual size.
        got: usize,
    },
}
