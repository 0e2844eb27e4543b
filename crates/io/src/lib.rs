//! # teleconnect-io
//!
//! Read gridded fields from NetCDF files and write teleconnection output:
//! the reduced map and retained correlation maps as NetCDF, paths as
//! GeoJSON.

mod error;
mod netcdf_read;
mod reader;
mod writer;

pub use error::IoError;
pub use reader::{ReaderConfig, read_field};
pub use writer::{WriterConfig, write_correlation_maps, write_map_netcdf, write_paths_geojson};
