//! Per-location teleconnection values on the spatial grid.

use ndarray::Array2;
use teleconnect_correlate::Extremum;
use teleconnect_grid::{Axis, GeoPoint, GridIndex};

/// Reduced teleconnection value and partner of every location.
///
/// Arrays have shape `(n_lon, n_lat)`, matching the normalized field the
/// run was computed on. Locations without a partner hold NaN partner
/// coordinates; their value is NaN too unless the extremum was flagged
/// ambiguous.
#[derive(Debug, Clone)]
pub struct TeleconnectionMap {
    grid: GridIndex,
    values: Array2<f64>,
    partners: Vec<Option<usize>>,
    ambiguous: Vec<bool>,
}

impl TeleconnectionMap {
    /// Lay extrema out on `grid`. Extrema are indexed by origin id.
    pub(crate) fn from_extrema(grid: GridIndex, extrema: &[Extremum]) -> Self {
        let shape = grid.shape();
        let (n_lon, n_lat) = (shape[0], shape[1]);
        let mut values = Array2::from_elem((n_lon, n_lat), f64::NAN);
        let mut partners = vec![None; grid.n_locations()];
        let mut ambiguous = vec![false; grid.n_locations()];

        for e in extrema {
            if e.origin >= partners.len() {
                continue;
            }
            values[[e.origin / n_lat, e.origin % n_lat]] = e.value;
            partners[e.origin] = e.partner();
            ambiguous[e.origin] = e.ambiguous;
        }

        Self {
            grid,
            values,
            partners,
            ambiguous,
        }
    }

    /// The grid the map is laid out on.
    pub fn grid(&self) -> &GridIndex {
        &self.grid
    }

    /// Longitude axis.
    pub fn lon(&self) -> &Axis {
        &self.grid.axes()[0]
    }

    /// Latitude axis.
    pub fn lat(&self) -> &Axis {
        &self.grid.axes()[1]
    }

    /// Reported values, `(n_lon, n_lat)`.
    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// Reported value of location `id`.
    pub fn value(&self, id: usize) -> Option<f64> {
        let n_lat = self.lat().len();
        self.values.get([id / n_lat, id % n_lat]).copied()
    }

    /// First partner of location `id`, if any.
    pub fn partner(&self, id: usize) -> Option<usize> {
        self.partners.get(id).copied().flatten()
    }

    /// Coordinates of the first partner of location `id`.
    pub fn partner_point(&self, id: usize) -> Option<GeoPoint> {
        self.partner(id).and_then(|p| self.grid.point(p))
    }

    /// Returns `true` when location `id` was flagged ambiguous.
    pub fn is_ambiguous(&self, id: usize) -> bool {
        self.ambiguous.get(id).copied().unwrap_or(false)
    }

    /// Number of locations with a partner.
    pub fn n_with_partner(&self) -> usize {
        self.partners.iter().filter(|p| p.is_some()).count()
    }

    /// Number of locations flagged ambiguous.
    pub fn n_ambiguous(&self) -> usize {
        self.ambiguous.iter().filter(|&&a| a).count()
    }

    /// Partner longitude and latitude per location, `(n_lon, n_lat)` each,
    /// NaN where there is no partner.
    pub fn partner_coordinates(&self) -> (Array2<f64>, Array2<f64>) {
        let dim = self.values.dim();
        let mut lons = Array2::from_elem(dim, f64::NAN);
        let mut lats = Array2::from_elem(dim, f64::NAN);
        let n_lat = dim.1;
        for id in self.grid.ids() {
            if let Some(point) = self.partner_point(id) {
                lons[[id / n_lat, id % n_lat]] = point.lon;
                lats[[id / n_lat, id % n_lat]] = point.lat;
            }
        }
        (lons, lats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extremum(origin: usize, value: f64, partners: Vec<usize>, ambiguous: bool) -> Extremum {
        Extremum {
            origin,
            value,
            partners,
            ambiguous,
        }
    }

    #[test]
    fn lays_out_lon_major() {
        let grid = GridIndex::lon_lat(vec![0.0, 10.0], vec![-5.0, 0.0, 5.0]).unwrap();
        let extrema = vec![
            extremum(0, -0.9, vec![5], false),
            extremum(1, f64::NAN, vec![], false),
            extremum(2, -0.4, vec![], true),
            extremum(3, -0.2, vec![0], false),
            extremum(4, -0.3, vec![0], false),
            extremum(5, -0.9, vec![0], false),
        ];
        let map = TeleconnectionMap::from_extrema(grid, &extrema);

        assert_eq!(map.values().dim(), (2, 3));
        assert_eq!(map.values()[[1, 2]], -0.9);
        assert_eq!(map.value(3), Some(-0.2));
        assert_eq!(map.partner(0), Some(5));
        assert_eq!(map.partner_point(0), Some(GeoPoint::new(10.0, 5.0)));
        assert_eq!(map.partner(1), None);
        assert!(map.is_ambiguous(2));
        assert_eq!(map.n_with_partner(), 4);
        assert_eq!(map.n_ambiguous(), 1);

        let (lons, lats) = map.partner_coordinates();
        assert_eq!(lons[[0, 0]], 10.0);
        assert_eq!(lats[[0, 0]], 5.0);
        assert!(lons[[0, 1]].is_nan());
        assert_eq!(lons[[1, 0]], 0.0);
        assert_eq!(lats[[1, 0]], -5.0);
    }
}
