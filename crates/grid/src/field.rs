//! Gridded space-time field.

use ndarray::{Array2, Array3, ArrayView1, ArrayView3, Axis as NdAxis};

use crate::axis::Axis;
use crate::error::GridError;
use crate::index::GridIndex;

/// One scalar variable sampled on a `(lon, lat, time)` grid.
///
/// Values are stored with shape `(n_lon, n_lat, n_time)` so that the series
/// of location `id` (see [`GridIndex`]) is the contiguous lane
/// `values[id / n_lat, id % n_lat, ..]`. NaN marks missing samples.
#[derive(Debug, Clone)]
pub struct SpaceTimeField {
    variable: String,
    lon: Axis,
    lat: Axis,
    time: Axis,
    values: Array3<f64>,
}

impl SpaceTimeField {
    /// Create a field from axes and a `(lon, lat, time)` array.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::DimensionMismatch`] if the array shape does not
    /// match the axis lengths.
    pub fn new(
        variable: impl Into<String>,
        lon: Axis,
        lat: Axis,
        time: Axis,
        values: Array3<f64>,
    ) -> Result<Self, GridError> {
        let expected = [lon.len(), lat.len(), time.len()];
        for ((axis, &want), &got) in [&lon, &lat, &time]
            .iter()
            .zip(expected.iter())
            .zip(values.shape())
        {
            if want != got {
                return Err(GridError::DimensionMismatch {
                    name: axis.name().to_string(),
                    expected: want,
                    got,
                });
            }
        }

        Ok(Self {
            variable: variable.into(),
            lon,
            lat,
            time,
            values: values.as_standard_layout().into_owned(),
        })
    }

    /// Create a field from flat data stored in CF order `[time, lat, lon]`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::DimensionMismatch`] if `data.len()` is not
    /// `n_time * n_lat * n_lon`.
    pub fn from_time_major(
        variable: impl Into<String>,
        lon: Axis,
        lat: Axis,
        time: Axis,
        data: Vec<f64>,
    ) -> Result<Self, GridError> {
        let shape = (time.len(), lat.len(), lon.len());
        let expected = shape.0 * shape.1 * shape.2;
        let got = data.len();
        let cf = Array3::from_shape_vec(shape, data).map_err(|_| GridError::DimensionMismatch {
            name: "values".to_string(),
            expected,
            got,
        })?;
        let values = cf.permuted_axes([2, 1, 0]);
        Self::new(variable, lon, lat, time, values)
    }

    /// Name of the sampled variable.
    pub fn variable(&self) -> &str {
        &self.variable
    }

    /// Longitude axis.
    pub fn lon(&self) -> &Axis {
        &self.lon
    }

    /// Latitude axis.
    pub fn lat(&self) -> &Axis {
        &self.lat
    }

    /// Time axis.
    pub fn time(&self) -> &Axis {
        &self.time
    }

    /// The `(lon, lat, time)` values.
    pub fn values(&self) -> ArrayView3<'_, f64> {
        self.values.view()
    }

    /// Number of spatial locations.
    pub fn n_locations(&self) -> usize {
        self.lon.len() * self.lat.len()
    }

    /// Number of time steps.
    pub fn n_times(&self) -> usize {
        self.time.len()
    }

    /// Build the `(lon, lat)` location index.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::EmptyAxis`] if either spatial axis is empty.
    pub fn grid_index(&self) -> Result<GridIndex, GridError> {
        GridIndex::new(vec![self.lon.clone(), self.lat.clone()])
    }

    /// Time series of one location, or `None` if `id` is out of range.
    pub fn series(&self, id: usize) -> Option<ArrayView1<'_, f64>> {
        if id >= self.n_locations() {
            return None;
        }
        let n_lat = self.lat.len();
        Some(self.values.index_axis(NdAxis(0), id / n_lat).index_axis_move(NdAxis(0), id % n_lat))
    }

    /// Reshape into a `(T, N)` matrix whose column `j` is location `j`.
    pub fn series_matrix(&self) -> Array2<f64> {
        let n = self.n_locations();
        let t = self.n_times();
        let mut out = Array2::<f64>::zeros((t, n));
        for (j, lane) in self.values.lanes(NdAxis(2)).into_iter().enumerate() {
            out.column_mut(j).assign(&lane);
        }
        out
    }

    /// Replace axes and values, keeping the variable name.
    pub(crate) fn with_parts(&self, lon: Axis, lat: Axis, time: Axis, values: Array3<f64>) -> Self {
        Self {
            variable: self.variable.clone(),
            lon,
            lat,
            time,
            values: values.as_standard_layout().into_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn axis(name: &str, values: &[f64]) -> Axis {
        Axis::new(name, values.to_vec()).unwrap()
    }

    fn small_field() -> SpaceTimeField {
        // 2 lon x 2 lat x 3 time, CF order [t, lat, lon]
        let data = vec![
            1.0, 2.0, 3.0, 4.0, // t0: (lat0: lon0, lon1), (lat1: lon0, lon1)
            5.0, 6.0, 7.0, 8.0, // t1
            9.0, 10.0, 11.0, 12.0, // t2
        ];
        SpaceTimeField::from_time_major(
            "air",
            axis("lon", &[0.0, 10.0]),
            axis("lat", &[-5.0, 5.0]),
            axis("time", &[0.0, 1.0, 2.0]),
            data,
        )
        .unwrap()
    }

    #[test]
    fn from_time_major_transposes() {
        let f = small_field();
        assert_eq!(f.values().shape(), &[2, 2, 3]);
        // lon0, lat1 -> values at CF index lat=1, lon=0
        assert_eq!(f.values()[[0, 1, 0]], 3.0);
        assert_eq!(f.values()[[1, 0, 2]], 10.0);
    }

    #[test]
    fn series_follows_grid_index() {
        let f = small_field();
        let grid = f.grid_index().unwrap();
        // id 1 = (lon 0.0, lat 5.0)
        assert_eq!(grid.coordinates(1), Some(vec![0.0, 5.0]));
        assert_eq!(f.series(1).unwrap().to_vec(), vec![3.0, 7.0, 11.0]);
        // id 2 = (lon 10.0, lat -5.0)
        assert_eq!(f.series(2).unwrap().to_vec(), vec![2.0, 6.0, 10.0]);
        assert!(f.series(4).is_none());
    }

    #[test]
    fn series_matrix_columns_are_locations() {
        let f = small_field();
        let m = f.series_matrix();
        assert_eq!(m.shape(), &[3, 4]);
        for id in 0..4 {
            assert_eq!(m.column(id).to_vec(), f.series(id).unwrap().to_vec());
        }
    }

    #[test]
    fn new_rejects_shape_mismatch() {
        let err = SpaceTimeField::new(
            "air",
            axis("lon", &[0.0, 1.0]),
            axis("lat", &[0.0]),
            axis("time", &[0.0, 1.0]),
            array![[[1.0, 2.0, 3.0]], [[4.0, 5.0, 6.0]]],
        )
        .unwrap_err();
        assert_eq!(
            err,
            GridError::DimensionMismatch {
                name: "time".to_string(),
                expected: 2,
                got: 3,
            }
        );
    }

    #[test]
    fn from_time_major_rejects_wrong_length() {
        let err = SpaceTimeField::from_time_major(
            "air",
            axis("lon", &[0.0, 1.0]),
            axis("lat", &[0.0]),
            axis("time", &[0.0]),
            vec![1.0],
        )
        .unwrap_err();
        assert!(matches!(err, GridError::DimensionMismatch { expected: 2, got: 1, .. }));
    }
}
