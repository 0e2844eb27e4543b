//! # teleconnect-paths
//!
//! Geographic line paths between each location and its teleconnected
//! partner. [`PathBuilder`] turns reducer extrema into a [`PathCollection`]
//! of two-point [`LineString`]s tagged with a [`Crs`]; collections filter by
//! threshold and render to GeoJSON.

mod builder;
mod collection;
mod crs;
mod error;
pub mod geojson;
mod record;

pub use builder::PathBuilder;
pub use collection::PathCollection;
pub use crs::Crs;
pub use error::PathError;
pub use geojson::to_geojson;
pub use record::{LineString, PathRecord};
