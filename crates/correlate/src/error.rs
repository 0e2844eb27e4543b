//! Error types for teleconnect-correlate.

/// Error type for all fallible operations in the teleconnect-correlate crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CorrelateError {
    /// Returned when the series matrix has no location columns.
    #[error("series matrix has no locations")]
    NoLocations,

    /// Returned when the dense N×N matrix would exceed the configured limit.
    #[error(
        "dense correlation matrix for {n_locations} locations needs {bytes} bytes, limit is {limit}"
    )]
    MatrixTooLarge {
        /// Number of locations (N).
        n_locations: usize,
        /// Bytes required for the N×N matrix.
        bytes: usize,
        /// Configured limit in bytes.
        limit: usize,
    },

    /// Returned when a map observer fails for one origin.
    #[error("map observer failed at origin {origin}: {reason}")]
    Observer {
        /// Linear id of the origin being processed.
        origin: usize,
        /// Description of the failure.
        reason: String,
    },
}
