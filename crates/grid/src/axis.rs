//! Named coordinate axes.

use crate::error::GridError;

/// A named, ordered sequence of finite coordinate values.
///
/// An axis may be empty; emptiness is rejected later by
/// [`GridIndex::new`](crate::GridIndex::new), which is where a non-empty
/// product is actually required.
#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    name: String,
    values: Vec<f64>,
}

impl Axis {
    /// Create a new axis after checking every value is finite.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::NonFiniteCoordinate`] for the first NaN or
    /// infinite value.
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Result<Self, GridError> {
        let name = name.into();
        if let Some((index, &value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(GridError::NonFiniteCoordinate {
                axis: name,
                index,
                value,
            });
        }
        Ok(Self { name, values })
    }

    /// Axis name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Coordinate values in storage order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of coordinate values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` when the axis has no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns `true` when values are in non-decreasing order.
    pub fn is_sorted(&self) -> bool {
        self.values.windows(2).all(|w| w[0] <= w[1])
    }

    /// Grid spacing, taken as `|x[1] - x[0]|`.
    ///
    /// Returns `None` for axes with fewer than two values.
    pub fn resolution(&self) -> Option<f64> {
        match self.values.as_slice() {
            [a, b, ..] => Some((b - a).abs()),
            _ => None,
        }
    }

    /// Returns a copy of this axis with every value passed through `f`.
    pub(crate) fn map_values(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            name: self.name.clone(),
            values: self.values.iter().map(|&v| f(v)).collect(),
        }
    }

    /// Returns a copy of this axis with values taken in `order`.
    pub(crate) fn reordered(&self, order: &[usize]) -> Self {
        Self {
            name: self.name.clone(),
            values: order.iter().map(|&i| self.values[i]).collect(),
        }
    }
}
