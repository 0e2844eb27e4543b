//! Error types for teleconnect-paths.

/// Error type for all fallible operations in the teleconnect-paths crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PathError {
    /// Returned when an extremum names a location the grid does not have.
    #[error("location {id} is not on the grid ({n_locations} locations)")]
    UnknownLocation {
        /// The offending linear id.
        id: usize,
        /// Number of locations in the grid.
        n_locations: usize,
    },

    /// Returned when a CRS string cannot be parsed.
    #[error("invalid CRS '{value}': {reason}")]
    InvalidCrs {
        /// The string that failed to parse.
        value: String,
        /// Description of the problem.
        reason: String,
    },

    /// Returned when GeoJSON serialization fails.
    #[error("GeoJSON serialization failed: {reason}")]
    Serialization {
        /// Underlying serializer message.
        reason: String,
    },
}
