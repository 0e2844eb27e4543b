//! Error types for teleconnect-pipeline.

use teleconnect_correlate::CorrelateError;
use teleconnect_grid::GridError;
use teleconnect_paths::PathError;

/// Error type for all fallible operations in the teleconnect-pipeline crate.
///
/// Every failure is fatal to a run; no partial output is returned.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Returned when the threshold is NaN, infinite or outside `[-1, 1]`.
    #[error("threshold must be finite and within [-1, 1], got {threshold}")]
    InvalidThreshold {
        /// The rejected threshold.
        threshold: f64,
    },

    /// Returned when the dense memory limit is zero.
    #[error("memory limit must be positive")]
    InvalidMemoryLimit,

    /// Wraps a malformed grid or field.
    #[error("grid error: {source}")]
    Grid {
        #[from]
        source: GridError,
    },

    /// Wraps a reducer failure, including diagnostic sink failures.
    #[error("correlation error: {source}")]
    Correlate {
        #[from]
        source: CorrelateError,
    },

    /// Wraps a path building failure.
    #[error("path error: {source}")]
    Path {
        #[from]
        source: PathError,
    },
}
