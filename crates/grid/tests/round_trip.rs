//! Flatten/unflatten round trips over a range of grid shapes.

use teleconnect_grid::{Axis, GeoPoint, GridIndex};

fn lon_lat_grid(n_lon: usize, n_lat: usize) -> GridIndex {
    let lons: Vec<f64> = (0..n_lon).map(|i| -180.0 + 2.5 * i as f64).collect();
    let lats: Vec<f64> = (0..n_lat).map(|j| -60.0 + 1.25 * j as f64).collect();
    GridIndex::lon_lat(lons, lats).unwrap()
}

#[test]
fn round_trip_all_shapes() {
    for (n_lon, n_lat) in [(1, 1), (1, 7), (7, 1), (3, 4), (16, 9)] {
        let grid = lon_lat_grid(n_lon, n_lat);
        assert_eq!(grid.n_locations(), n_lon * n_lat);

        for id in grid.ids() {
            let multi = grid.multi_index(id).unwrap();
            assert_eq!(grid.linear_id(&multi), Some(id), "shape {n_lon}x{n_lat}");

            let point = grid.point(id).unwrap();
            let expected = GeoPoint::new(
                grid.axes()[0].values()[multi[0]],
                grid.axes()[1].values()[multi[1]],
            );
            assert_eq!(point, expected);
        }
    }
}

#[test]
fn every_lon_lat_pair_appears_once() {
    let grid = lon_lat_grid(5, 3);
    let mut seen = Vec::new();
    for id in grid.ids() {
        let c = grid.coordinates(id).unwrap();
        assert!(!seen.contains(&c), "duplicate coordinate {c:?}");
        seen.push(c);
    }
    assert_eq!(seen.len(), 15);
}

#[test]
fn rebuilding_gives_identical_ids() {
    let a = lon_lat_grid(4, 6);
    let b = lon_lat_grid(4, 6);
    assert_eq!(a, b);
    for id in a.ids() {
        assert_eq!(a.coordinates(id), b.coordinates(id));
    }
}

#[test]
fn outer_axis_varies_slowest() {
    let grid = GridIndex::new(vec![
        Axis::new("lon", vec![0.0, 1.0]).unwrap(),
        Axis::new("lat", vec![0.0, 1.0, 2.0]).unwrap(),
    ])
    .unwrap();
    let lons: Vec<f64> = grid
        .ids()
        .map(|id| grid.coordinates(id).unwrap()[0])
        .collect();
    assert_eq!(lons, vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0]);
}
