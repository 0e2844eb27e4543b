//! # teleconnect-grid
//!
//! Spatial grid model for teleconnection analysis: named coordinate axes, the
//! flattened location index that correlation matrices are addressed by, the
//! owned `(lon, lat, time)` field, and the pure coordinate normalization that
//! must run before any reducer.
//!
//! ```
//! use teleconnect_grid::GridIndex;
//!
//! let grid = GridIndex::lon_lat(vec![0.0, 10.0], vec![-5.0, 5.0]).unwrap();
//! assert_eq!(grid.n_locations(), 4);
//! let id = grid.linear_id(&[1, 0]).unwrap();
//! assert_eq!(grid.coordinates(id), Some(vec![10.0, -5.0]));
//! ```

mod axis;
mod error;
mod field;
mod index;
mod normalize;

pub use axis::Axis;
pub use error::GridError;
pub use field::SpaceTimeField;
pub use index::{GeoPoint, GridIndex};
pub use normalize::{normalize, wrap_latitude, wrap_longitude};
