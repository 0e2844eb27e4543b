//! Reducer trait and its output.

use ndarray::{Array2, ArrayView2};

use crate::error::CorrelateError;
use crate::policy::{Extremum, ReductionPolicy};

/// A strategy that turns a `(T, N)` series matrix into one [`Extremum`] per
/// location.
///
/// Column `j` of the input is the time series of the location with linear
/// id `j`; every reducer returns extrema in that same id order.
pub trait CorrelationReducer {
    /// Short name used in log records.
    fn name(&self) -> &'static str;

    /// Reduce every location's correlation row to its extremum.
    fn reduce(
        &self,
        series: ArrayView2<'_, f64>,
        policy: &ReductionPolicy,
    ) -> Result<Reduction, CorrelateError>;
}

/// Output of a [`CorrelationReducer`].
#[derive(Debug, Clone)]
pub struct Reduction {
    extrema: Vec<Extremum>,
    maps: Option<Array2<f64>>,
}

impl Reduction {
    pub(crate) fn new(extrema: Vec<Extremum>, maps: Option<Array2<f64>>) -> Self {
        Self { extrema, maps }
    }

    /// Extrema indexed by origin id.
    pub fn extrema(&self) -> &[Extremum] {
        &self.extrema
    }

    /// Retained per-origin correlation maps, `(N origins, N locations)`.
    pub fn maps(&self) -> Option<&Array2<f64>> {
        self.maps.as_ref()
    }

    /// Split into extrema and retained maps.
    pub fn into_parts(self) -> (Vec<Extremum>, Option<Array2<f64>>) {
        (self.extrema, self.maps)
    }
}
