//! GeoJSON rendering of path collections.

use serde::Serialize;

use crate::collection::PathCollection;
use crate::error::PathError;

/// Top-level GeoJSON `FeatureCollection`.
#[derive(Debug, Serialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub crs: NamedCrs,
    pub features: Vec<Feature>,
}

/// Legacy GeoJSON named-CRS member.
#[derive(Debug, Serialize)]
pub struct NamedCrs {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub properties: CrsProperties,
}

#[derive(Debug, Serialize)]
pub struct CrsProperties {
    pub name: String,
}

/// One path as a GeoJSON feature.
#[derive(Debug, Serialize)]
pub struct Feature {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub geometry: Geometry,
    pub properties: FeatureProperties,
}

#[derive(Debug, Serialize)]
pub struct Geometry {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub coordinates: [[f64; 2]; 2],
}

#[derive(Debug, Serialize)]
pub struct FeatureProperties {
    pub value: f64,
    pub origin: usize,
    pub destination: usize,
}

impl From<&PathCollection> for FeatureCollection {
    fn from(paths: &PathCollection) -> Self {
        Self {
            kind: "FeatureCollection",
            crs: NamedCrs {
                kind: "name",
                properties: CrsProperties {
                    name: paths.crs().urn(),
                },
            },
            features: paths
                .iter()
                .map(|r| Feature {
                    kind: "Feature",
                    geometry: Geometry {
                        kind: "LineString",
                        coordinates: r.geometry().coordinates(),
                    },
                    properties: FeatureProperties {
                        value: r.value(),
                        origin: r.origin(),
                        destination: r.destination(),
                    },
                })
                .collect(),
        }
    }
}

/// Serialize a path collection to a pretty-printed GeoJSON string.
pub fn to_geojson(paths: &PathCollection) -> Result<String, PathError> {
    serde_json::to_string_pretty(&FeatureCollection::from(paths)).map_err(|e| {
        PathError::Serialization {
            reason: e.to_string(),
        }
    })
}
