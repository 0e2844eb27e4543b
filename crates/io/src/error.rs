//! Error types for teleconnect-io.

use std::path::PathBuf;

/// Error type for all fallible operations in the teleconnect-io crate.
///
/// This enum covers file-system failures, NetCDF library errors, reader
/// configuration problems, and layout mismatches encountered when reading
/// fields or writing teleconnection output.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Wraps an error originating from the NetCDF library.
    #[error("netcdf error: {reason}")]
    Netcdf {
        /// Description of the underlying NetCDF failure.
        reason: String,
    },

    /// Returned when one or more validation checks fail.
    #[error("{count} validation error(s): {details}")]
    Validation {
        /// Number of accumulated validation failures.
        count: usize,
        /// Human-readable summary of the failures.
        details: String,
    },

    /// Returned when a required variable is not present in a file.
    #[error("variable '{name}' not found in {}", path.display())]
    MissingVariable {
        /// Name of the missing variable.
        name: String,
        /// Path to the file that was inspected.
        path: PathBuf,
    },

    /// Returned when a variable lacks one of the lon/lat/time dimensions.
    #[error("variable '{variable}' has no {axis} dimension (looked for {candidates})")]
    MissingDimension {
        /// Name of the variable.
        variable: String,
        /// Which axis was not found.
        axis: &'static str,
        /// Comma-separated names that were tried.
        candidates: String,
    },

    /// Returned when two axes resolve to the same dimension of a variable.
    #[error("variable '{variable}' dimension '{dimension}' matches both {first} and {second}")]
    AmbiguousDimension {
        /// Name of the variable.
        variable: String,
        /// Dimension claimed twice.
        dimension: String,
        /// First axis that matched it.
        first: &'static str,
        /// Second axis that matched it.
        second: &'static str,
    },

    /// Returned when a dimension has an unexpected size.
    #[error("dimension '{name}' mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Name of the dimension.
        name: String,
        /// Expected size.
        expected: usize,
        /// Actual size.
        got: usize,
    },

    /// Wraps an error building the grid or field from file contents.
    #[error("grid error: {reason}")]
    Grid {
        /// Description of the grid failure.
        reason: String,
    },

    /// Wraps a GeoJSON rendering failure.
    #[error("geojson error: {reason}")]
    Geojson {
        /// Description of the serialization failure.
        reason: String,
    },

    /// Returned when writing a plain file fails.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        /// Path being written.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

impl From<netcdf::Error> for IoError {
    fn from(e: netcdf::Error) -> Self {
        IoError::Netcdf {
            reason: e.to_string(),
        }
    }
}

impl From<teleconnect_grid::GridError> for IoError {
    fn from(e: teleconnect_grid::GridError) -> Self {
        IoError::Grid {
            reason: e.to_string(),
        }
    }
}

impl From<teleconnect_paths::PathError> for IoError {
    fn from(e: teleconnect_paths::PathError) -> Self {
        IoError::Geojson {
            reason: e.to_string(),
        }
    }
}
