//! Two-point line geometry and the path record built around it.

use teleconnect_grid::GeoPoint;

/// A straight two-point line in planar lon/lat.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineString {
    start: GeoPoint,
    end: GeoPoint,
}

impl LineString {
    /// Line from `start` to `end`.
    pub fn new(start: GeoPoint, end: GeoPoint) -> Self {
        Self { start, end }
    }

    /// First vertex.
    pub fn start(&self) -> GeoPoint {
        self.start
    }

    /// Last vertex.
    pub fn end(&self) -> GeoPoint {
        self.end
    }

    /// Vertices as `[lon, lat]` pairs.
    pub fn coordinates(&self) -> [[f64; 2]; 2] {
        [
            [self.start.lon, self.start.lat],
            [self.end.lon, self.end.lat],
        ]
    }

    /// Planar length in coordinate units.
    pub fn length(&self) -> f64 {
        (self.end.lon - self.start.lon).hypot(self.end.lat - self.start.lat)
    }
}

/// One teleconnection edge: origin, partner, reported value and geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct PathRecord {
    origin: usize,
    destination: usize,
    value: f64,
    geometry: LineString,
}

impl PathRecord {
    pub(crate) fn new(origin: usize, destination: usize, value: f64, geometry: LineString) -> Self {
        Self {
            origin,
            destination,
            value,
            geometry,
        }
    }

    /// Linear id of the origin location.
    pub fn origin(&self) -> usize {
        self.origin
    }

    /// Linear id of the partner location.
    pub fn destination(&self) -> usize {
        self.destination
    }

    /// Value as reported by the reducer.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Line from origin to partner.
    pub fn geometry(&self) -> &LineString {
        &self.geometry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn coordinates_are_lon_lat() {
        let line = LineString::new(GeoPoint::new(10.0, -5.0), GeoPoint::new(13.0, -1.0));
        assert_eq!(line.coordinates(), [[10.0, -5.0], [13.0, -1.0]]);
        assert_relative_eq!(line.length(), 5.0);
    }

    #[test]
    fn record_accessors() {
        let line = LineString::new(GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 1.0));
        let record = PathRecord::new(3, 7, -0.8, line);
        assert_eq!(record.origin(), 3);
        assert_eq!(record.destination(), 7);
        assert_eq!(record.value(), -0.8);
        assert_eq!(record.geometry().end(), GeoPoint::new(1.0, 1.0));
    }
}
