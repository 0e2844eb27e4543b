//! Coordinate normalization.
//!
//! Correlation results are only meaningful on a grid whose axes are sorted
//! ascending with longitude in `[-180, 180)` and latitude in `[-90, 90]`.
//! [`normalize`] produces such a field from any input; the reducers assume
//! it has already run.

use ndarray::Axis as NdAxis;
use tracing::{debug, warn};

use crate::axis::Axis;
use crate::error::GridError;
use crate::field::SpaceTimeField;

/// Wrap a longitude into `[-180, 180)`.
pub fn wrap_longitude(lon: f64) -> f64 {
    (lon + 180.0).rem_euclid(360.0) - 180.0
}

/// Wrap a latitude into `[-90, 90]`.
///
/// In-range values, both poles included, are returned unchanged; anything
/// else wraps with period 180.
pub fn wrap_latitude(lat: f64) -> f64 {
    if (-90.0..=90.0).contains(&lat) {
        return lat;
    }
    (lat + 90.0).rem_euclid(180.0) - 90.0
}

/// Return a normalized copy of `field`.
///
/// Longitudes and latitudes are wrapped into range first, then all three
/// axes are sorted ascending (stable, so duplicated coordinates keep their
/// relative order) and the values are permuted to match.
///
/// # Errors
///
/// Returns [`GridError::EmptyAxis`] if any axis is empty.
pub fn normalize(field: &SpaceTimeField) -> Result<SpaceTimeField, GridError> {
    for axis in [field.lon(), field.lat(), field.time()] {
        if axis.is_empty() {
            return Err(GridError::EmptyAxis {
                axis: axis.name().to_string(),
            });
        }
    }

    let lon = field.lon().map_values(wrap_longitude);
    let lat = field.lat().map_values(wrap_latitude);
    let time = field.time().clone();

    let lon_order = ascending_order(&lon);
    let lat_order = ascending_order(&lat);
    let time_order = ascending_order(&time);

    warn_duplicates(&lon, &lon_order);
    warn_duplicates(&lat, &lat_order);

    let values = field
        .values()
        .select(NdAxis(0), &lon_order)
        .select(NdAxis(1), &lat_order)
        .select(NdAxis(2), &time_order);

    debug!(
        variable = field.variable(),
        n_lon = lon.len(),
        n_lat = lat.len(),
        n_time = time.len(),
        "normalized field coordinates"
    );

    Ok(field.with_parts(
        lon.reordered(&lon_order),
        lat.reordered(&lat_order),
        time.reordered(&time_order),
        values,
    ))
}

/// Stable permutation that sorts the axis ascending.
fn ascending_order(axis: &Axis) -> Vec<usize> {
    let values = axis.values();
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));
    order
}

fn warn_duplicates(axis: &Axis, order: &[usize]) {
    let values = axis.values();
    let duplicates = order
        .windows(2)
        .filter(|w| values[w[0]] == values[w[1]])
        .count();
    if duplicates > 0 {
        warn!(
            axis = axis.name(),
            duplicates, "axis has duplicated coordinates after wrapping"
        );
    }
}
