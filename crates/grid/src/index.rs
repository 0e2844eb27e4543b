//! Flattened location index over the spatial axes.

use crate::axis::Axis;
use crate::error::GridError;

/// A geographic point, longitude first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    /// Longitude (x).
    pub lon: f64,
    /// Latitude (y).
    pub lat: f64,
}

impl GeoPoint {
    /// Create a point from longitude and latitude.
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

/// Cartesian product of the spatial axes with a stable linear numbering.
///
/// Locations are numbered row-major over the axes in the order given: the
/// first axis varies slowest. For a `(lon, lat)` grid the linear id is
/// `i_lon * n_lat + i_lat`. Correlation matrices are indexed positionally by
/// this id, so the numbering never depends on anything but the axes.
#[derive(Debug, Clone, PartialEq)]
pub struct GridIndex {
    axes: Vec<Axis>,
    strides: Vec<usize>,
    n_locations: usize,
}

impl GridIndex {
    /// Build the index over `axes`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::NoAxes`] when `axes` is empty and
    /// [`GridError::EmptyAxis`] when any axis has zero length.
    pub fn new(axes: Vec<Axis>) -> Result<Self, GridError> {
        if axes.is_empty() {
            return Err(GridError::NoAxes);
        }
        if let Some(axis) = axes.iter().find(|a| a.is_empty()) {
            return Err(GridError::EmptyAxis {
                axis: axis.name().to_string(),
            });
        }

        let mut strides = vec![1; axes.len()];
        for k in (0..axes.len() - 1).rev() {
            strides[k] = strides[k + 1] * axes[k + 1].len();
        }
        let n_locations = strides[0] * axes[0].len();

        Ok(Self {
            axes,
            strides,
            n_locations,
        })
    }

    /// Convenience constructor for a `(lon, lat)` grid.
    ///
    /// # Errors
    ///
    /// Same as [`GridIndex::new`], plus [`GridError::NonFiniteCoordinate`]
    /// from axis construction.
    pub fn lon_lat(lons: Vec<f64>, lats: Vec<f64>) -> Result<Self, GridError> {
        Self::new(vec![Axis::new("lon", lons)?, Axis::new("lat", lats)?])
    }

    /// Total number of locations (product of axis lengths).
    pub fn n_locations(&self) -> usize {
        self.n_locations
    }

    /// Axis lengths, outer first.
    pub fn shape(&self) -> Vec<usize> {
        self.axes.iter().map(Axis::len).collect()
    }

    /// The axes this index was built from.
    pub fn axes(&self) -> &[Axis] {
        &self.axes
    }

    /// Linear id of a per-axis index tuple.
    ///
    /// Returns `None` if the tuple has the wrong arity or is out of range.
    pub fn linear_id(&self, multi: &[usize]) -> Option<usize> {
        if multi.len() != self.axes.len() {
            return None;
        }
        let mut id = 0;
        for ((&i, &stride), axis) in multi.iter().zip(&self.strides).zip(&self.axes) {
            if i >= axis.len() {
                return None;
            }
            id += i * stride;
        }
        Some(id)
    }

    /// Per-axis index tuple of a linear id.
    pub fn multi_index(&self, id: usize) -> Option<Vec<usize>> {
        if id >= self.n_locations {
            return None;
        }
        Some(
            self.strides
                .iter()
                .zip(&self.axes)
                .map(|(&stride, axis)| (id / stride) % axis.len())
                .collect(),
        )
    }

    /// Per-axis coordinate tuple of a linear id.
    pub fn coordinates(&self, id: usize) -> Option<Vec<f64>> {
        let multi = self.multi_index(id)?;
        Some(
            multi
                .iter()
                .zip(&self.axes)
                .map(|(&i, axis)| axis.values()[i])
                .collect(),
        )
    }

    /// Geographic point of a linear id, reading the first axis as longitude
    /// and the second as latitude.
    ///
    /// Returns `None` for out-of-range ids or grids with fewer than two axes.
    pub fn point(&self, id: usize) -> Option<GeoPoint> {
        match self.coordinates(id)?.as_slice() {
            [lon, lat, ..] => Some(GeoPoint::new(*lon, *lat)),
            _ => None,
        }
    }

    /// Iterator over all linear ids in order.
    pub fn ids(&self) -> std::ops::Range<usize> {
        0..self.n_locations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lon_outer_lat_inner() {
        let grid = GridIndex::lon_lat(vec![0.0, 10.0, 20.0], vec![-5.0, 5.0]).unwrap();
        assert_eq!(grid.n_locations(), 6);
        assert_eq!(grid.shape(), vec![3, 2]);
        assert_eq!(grid.coordinates(0), Some(vec![0.0, -5.0]));
        assert_eq!(grid.coordinates(1), Some(vec![0.0, 5.0]));
        assert_eq!(grid.coordinates(2), Some(vec![10.0, -5.0]));
        assert_eq!(grid.coordinates(5), Some(vec![20.0, 5.0]));
    }

    #[test]
    fn linear_id_inverse() {
        let grid = GridIndex::lon_lat(vec![0.0, 1.0, 2.0], vec![0.0, 1.0]).unwrap();
        assert_eq!(grid.linear_id(&[2, 1]), Some(5));
        assert_eq!(grid.multi_index(5), Some(vec![2, 1]));
    }

    #[test]
    fn out_of_range_returns_none() {
        let grid = GridIndex::lon_lat(vec![0.0, 1.0], vec![0.0]).unwrap();
        assert_eq!(grid.multi_index(2), None);
        assert_eq!(grid.linear_id(&[2, 0]), None);
        assert_eq!(grid.linear_id(&[0]), None);
        assert_eq!(grid.point(7), None);
    }

    #[test]
    fn empty_axis_fails() {
        let err = GridIndex::lon_lat(vec![0.0, 1.0], vec![]).unwrap_err();
        assert_eq!(
            err,
            GridError::EmptyAxis {
                axis: "lat".to_string()
            }
        );
    }

    #[test]
    fn no_axes_fails() {
        assert_eq!(GridIndex::new(vec![]).unwrap_err(), GridError::NoAxes);
    }

    #[test]
    fn point_requires_two_axes() {
        let grid = GridIndex::new(vec![Axis::new("station", vec![1.0, 2.0]).unwrap()]).unwrap();
        assert_eq!(grid.coordinates(1), Some(vec![2.0]));
        assert_eq!(grid.point(1), None);
    }

    #[test]
    fn three_axes_strides() {
        let grid = GridIndex::new(vec![
            Axis::new("a", vec![0.0, 1.0]).unwrap(),
            Axis::new("b", vec![0.0, 1.0, 2.0]).unwrap(),
            Axis::new("c", vec![0.0, 1.0, 2.0, 3.0]).unwrap(),
        ])
        .unwrap();
        assert_eq!(grid.n_locations(), 24);
        assert_eq!(grid.linear_id(&[1, 2, 3]), Some(23));
        assert_eq!(grid.multi_index(13), Some(vec![1, 0, 1]));
    }
}
