//! # teleconnect-correlate
//!
//! Correlation reducers for teleconnection maps. Each reducer takes the
//! `(T, N)` series matrix of a grid (column `j` is location `j`) and returns,
//! for every location, the partner with the extremal correlation.
//!
//! - [`DenseReducer`] builds the full Pearson matrix once and reduces rows.
//! - [`RankReducer`] computes one Kendall τ-b map per origin in parallel.
//!
//! Both share [`select_extremum`], so extremum and tie policies behave the
//! same regardless of engine.

mod dense;
mod error;
mod policy;
mod rank;
mod reduction;

pub use dense::{DenseReducer, correlation_matrix, matrix_bytes};
pub use error::CorrelateError;
pub use policy::{Extremum, ExtremumPolicy, ReductionPolicy, TiePolicy, select_extremum};
pub use rank::{MapObserver, RankReducer};
pub use reduction::{CorrelationReducer, Reduction};
