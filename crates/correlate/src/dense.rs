//! Dense Pearson reduction over the full N×N correlation matrix.

use ndarray::{Array2, ArrayView2};
use rayon::prelude::*;
use tracing::{info, warn};

use crate::error::CorrelateError;
use crate::policy::{Extremum, ReductionPolicy, select_extremum};
use crate::reduction::{CorrelationReducer, Reduction};

/// Matrices above this size get a warning before allocation.
const LARGE_MATRIX_BYTES: usize = 1 << 30;

/// Bytes needed for an N×N `f64` matrix, saturating on overflow.
pub fn matrix_bytes(n_locations: usize) -> usize {
    n_locations
        .saturating_mul(n_locations)
        .saturating_mul(std::mem::size_of::<f64>())
}

/// Pearson correlation between every pair of columns of a `(T, N)` matrix.
///
/// Columns are standardized with their sample mean and standard deviation
/// and the matrix is `ZᵀZ / (T - 1)`. The result is symmetric with a unit
/// diagonal and off-diagonal entries clamped to `[-1, 1]`. A column with
/// zero variance or any NaN sample yields a NaN row and column (its
/// diagonal stays 1). With fewer than two time steps every off-diagonal
/// entry is NaN.
pub fn correlation_matrix(series: ArrayView2<'_, f64>) -> Array2<f64> {
    let (n_times, n_locations) = series.dim();

    let mut corr = if n_times < 2 {
        Array2::from_elem((n_locations, n_locations), f64::NAN)
    } else {
        let mut z = Array2::<f64>::zeros((n_times, n_locations));
        for (j, column) in series.columns().into_iter().enumerate() {
            let values = column.to_vec();
            if teleconnect_stats::is_constant(&values) {
                z.column_mut(j).fill(f64::NAN);
                continue;
            }
            let m = teleconnect_stats::mean(&values);
            let s = teleconnect_stats::sd(&values);
            z.column_mut(j).assign(&column.mapv(|x| (x - m) / s));
        }
        z.t().dot(&z) / (n_times as f64 - 1.0)
    };

    for i in 0..n_locations {
        corr[[i, i]] = 1.0;
        for j in (i + 1)..n_locations {
            let r = corr[[i, j]].clamp(-1.0, 1.0);
            corr[[i, j]] = r;
            corr[[j, i]] = r;
        }
    }
    corr
}

/// Reducer that materializes the full Pearson matrix and reduces each row.
#[derive(Debug, Clone, Default)]
pub struct DenseReducer {
    memory_limit: Option<usize>,
}

impl DenseReducer {
    /// Create a reducer with no memory limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse to allocate matrices larger than `bytes`.
    pub fn with_memory_limit(mut self, bytes: usize) -> Self {
        self.memory_limit = Some(bytes);
        self
    }

    /// Returns the configured memory limit in bytes.
    pub fn memory_limit(&self) -> Option<usize> {
        self.memory_limit
    }

    fn check_size(&self, n_locations: usize) -> Result<(), CorrelateError> {
        let bytes = matrix_bytes(n_locations);
        if let Some(limit) = self.memory_limit
            && bytes > limit
        {
            return Err(CorrelateError::MatrixTooLarge {
                n_locations,
                bytes,
                limit,
            });
        }
        if bytes > LARGE_MATRIX_BYTES {
            warn!(
                n_locations,
                mib = bytes / (1 << 20),
                "dense correlation matrix is large"
            );
        }
        Ok(())
    }
}

impl CorrelationReducer for DenseReducer {
    fn name(&self) -> &'static str {
        "dense"
    }

    #[tracing::instrument(skip(self, series, policy), fields(n_times = series.nrows(), n_locations = series.ncols()))]
    fn reduce(
        &self,
        series: ArrayView2<'_, f64>,
        policy: &ReductionPolicy,
    ) -> Result<Reduction, CorrelateError> {
        let n_locations = series.ncols();
        if n_locations == 0 {
            return Err(CorrelateError::NoLocations);
        }
        self.check_size(n_locations)?;

        let corr = correlation_matrix(series);
        info!(n_locations, "correlation matrix computed");

        let extrema: Vec<Extremum> = (0..n_locations)
            .into_par_iter()
            .map(|origin| select_extremum(corr.row(origin), origin, policy))
            .collect();

        Ok(Reduction::new(extrema, None))
    }
}
