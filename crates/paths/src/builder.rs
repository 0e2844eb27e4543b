//! Turn reducer extrema into path records.

use teleconnect_correlate::Extremum;
use teleconnect_grid::{GeoPoint, GridIndex};
use tracing::debug;

use crate::collection::PathCollection;
use crate::crs::Crs;
use crate::error::PathError;
use crate::record::{LineString, PathRecord};

/// Builds one line per (origin, partner) pair.
#[derive(Debug, Clone, Default)]
pub struct PathBuilder {
    crs: Crs,
}

impl PathBuilder {
    /// Builder tagging its output with `crs`.
    pub fn new(crs: Crs) -> Self {
        Self { crs }
    }

    /// Returns the CRS new collections are tagged with.
    pub fn crs(&self) -> &Crs {
        &self.crs
    }

    /// Build a collection from `extrema`, in the order given.
    ///
    /// Extrema without partners produce no record; an extremum with several
    /// partners produces one record per partner. Values are stored as
    /// reported, never re-signed.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::UnknownLocation`] when an origin or partner id
    /// is outside `grid`.
    pub fn build(&self, extrema: &[Extremum], grid: &GridIndex) -> Result<PathCollection, PathError> {
        let mut records = Vec::new();
        for extremum in extrema {
            if extremum.partners.is_empty() {
                continue;
            }
            let start = locate(grid, extremum.origin)?;
            for &partner in &extremum.partners {
                let end = locate(grid, partner)?;
                records.push(PathRecord::new(
                    extremum.origin,
                    partner,
                    extremum.value,
                    LineString::new(start, end),
                ));
            }
        }
        debug!(
            n_extrema = extrema.len(),
            n_paths = records.len(),
            crs = %self.crs,
            "paths built"
        );
        Ok(PathCollection::new(self.crs.clone(), records))
    }
}

fn locate(grid: &GridIndex, id: usize) -> Result<GeoPoint, PathError> {
    grid.point(id).ok_or(PathError::UnknownLocation {
        id,
        n_locations: grid.n_locations(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extremum(origin: usize, value: f64, partners: Vec<usize>) -> Extremum {
        Extremum {
            origin,
            value,
            partners,
            ambiguous: false,
        }
    }

    fn grid() -> GridIndex {
        GridIndex::lon_lat(vec![0.0, 10.0], vec![-5.0, 5.0]).unwrap()
    }

    #[test]
    fn one_line_per_partner() {
        let extrema = vec![
            extremum(0, -0.9, vec![3]),
            extremum(1, -0.4, vec![]),
            extremum(2, -0.7, vec![1, 3]),
        ];
        let paths = PathBuilder::default().build(&extrema, &grid()).unwrap();
        assert_eq!(paths.len(), 3);

        let first = &paths.records()[0];
        assert_eq!(first.origin(), 0);
        assert_eq!(first.destination(), 3);
        assert_eq!(first.value(), -0.9);
        assert_eq!(first.geometry().coordinates(), [[0.0, -5.0], [10.0, 5.0]]);

        let pairs: Vec<(usize, usize)> = paths
            .iter()
            .map(|r| (r.origin(), r.destination()))
            .collect();
        assert_eq!(pairs, vec![(0, 3), (2, 1), (2, 3)]);
    }

    #[test]
    fn unknown_partner_fails() {
        let extrema = vec![extremum(0, -0.9, vec![4])];
        let err = PathBuilder::default().build(&extrema, &grid()).unwrap_err();
        assert_eq!(
            err,
            PathError::UnknownLocation {
                id: 4,
                n_locations: 4
            }
        );
    }

    #[test]
    fn collection_carries_crs() {
        let builder = PathBuilder::new(Crs::Epsg(3857));
        let paths = builder.build(&[], &grid()).unwrap();
        assert!(paths.is_empty());
        assert_eq!(paths.crs(), &Crs::Epsg(3857));
    }
}
