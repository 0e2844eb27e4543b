//! NetCDF and GeoJSON output of a teleconnection run.

use std::path::Path;

use ndarray::{Array2, ArrayView2};
use teleconnect_paths::PathCollection;
use teleconnect_pipeline::TeleconnectionMap;
use tracing::info;

use crate::error::IoError;

/// Configuration for NetCDF output.
#[derive(Debug, Clone, Default)]
pub struct WriterConfig {
    /// zlib deflate level for gridded variables, `None` for uncompressed.
    deflate_level: Option<u8>,
}

impl WriterConfig {
    /// Sets the deflate level (0-9), or `None` to disable compression.
    pub fn with_deflate_level(mut self, level: Option<u8>) -> Self {
        self.deflate_level = level;
        self
    }

    /// Returns the deflate level.
    pub fn deflate_level(&self) -> Option<u8> {
        self.deflate_level
    }

    /// Validates this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] if the deflate level exceeds 9.
    pub fn validate(&self) -> Result<(), IoError> {
        if let Some(level) = self.deflate_level
            && level > 9
        {
            return Err(IoError::Validation {
                count: 1,
                details: format!("deflate level must be 0..=9, got {level}"),
            });
        }
        Ok(())
    }
}

/// Write the teleconnection map as NetCDF.
///
/// Variables `teleconnection`, `partner_lon` and `partner_lat` are laid out
/// on `(lat, lon)` with `lon` / `lat` coordinate variables. Missing values
/// are NaN.
///
/// # Errors
///
/// Returns [`IoError`] on invalid config or any NetCDF failure.
pub fn write_map_netcdf(
    path: &Path,
    map: &TeleconnectionMap,
    config: &WriterConfig,
) -> Result<(), IoError> {
    config.validate()?;
    let mut file = netcdf::create(path)?;
    add_lon_lat(&mut file, map)?;

    let (partner_lon, partner_lat) = map.partner_coordinates();
    let layers: [(&str, &Array2<f64>, &str); 3] = [
        ("teleconnection", map.values(), "extremal correlation coefficient"),
        ("partner_lon", &partner_lon, "longitude of teleconnected partner"),
        ("partner_lat", &partner_lat, "latitude of teleconnected partner"),
    ];
    for (name, values, long_name) in layers {
        let data = lat_major(values.view());
        put_gridded(&mut file, config, name, &["lat", "lon"], &data, long_name)?;
    }

    info!(
        path = %path.display(),
        n_lon = map.lon().len(),
        n_lat = map.lat().len(),
        "teleconnection map written"
    );
    Ok(())
}

/// Write retained per-origin correlation maps as NetCDF variable
/// `correlation(origin, lat, lon)`.
///
/// `maps` has one row per origin, indexed by linear location id on the
/// map's grid; `origin_lon` / `origin_lat` give each origin's coordinates.
///
/// # Errors
///
/// Returns [`IoError::DimensionMismatch`] if `maps` is not `(N, N)` for the
/// map's grid, or [`IoError`] on any NetCDF failure.
pub fn write_correlation_maps(
    path: &Path,
    map: &TeleconnectionMap,
    maps: &Array2<f64>,
    config: &WriterConfig,
) -> Result<(), IoError> {
    config.validate()?;
    let grid = map.grid();
    let n = grid.n_locations();
    for (name, got) in [("origin", maps.nrows()), ("location", maps.ncols())] {
        if got != n {
            return Err(IoError::DimensionMismatch {
                name: name.to_string(),
                expected: n,
                got,
            });
        }
    }
    let n_lon = map.lon().len();
    let n_lat = map.lat().len();

    let mut file = netcdf::create(path)?;
    file.add_dimension("origin", n)?;
    add_lon_lat(&mut file, map)?;

    {
        let ids: Vec<i32> = (0..n).map(|id| id as i32).collect();
        let mut var = file.add_variable::<i32>("origin", &["origin"])?;
        var.put_attribute("long_name", "linear location id (lon-major)")?;
        var.put_values(&ids, ..)?;
    }
    let points: Vec<_> = grid.ids().filter_map(|id| grid.point(id)).collect();
    let origin_lon: Vec<f64> = points.iter().map(|p| p.lon).collect();
    let origin_lat: Vec<f64> = points.iter().map(|p| p.lat).collect();
    put_gridded(&mut file, config, "origin_lon", &["origin"], &origin_lon, "origin longitude")?;
    put_gridded(&mut file, config, "origin_lat", &["origin"], &origin_lat, "origin latitude")?;

    let mut data = Vec::with_capacity(n * n);
    for row in maps.rows() {
        for j in 0..n_lat {
            for i in 0..n_lon {
                data.push(row[i * n_lat + j]);
            }
        }
    }
    put_gridded(
        &mut file,
        config,
        "correlation",
        &["origin", "lat", "lon"],
        &data,
        "correlation of origin with location",
    )?;

    info!(path = %path.display(), n_origins = n, "correlation maps written");
    Ok(())
}

/// Write a path collection as a GeoJSON `FeatureCollection`.
///
/// # Errors
///
/// Returns [`IoError::Geojson`] if rendering fails or [`IoError::Write`] if
/// the file cannot be written.
pub fn write_paths_geojson(path: &Path, paths: &PathCollection) -> Result<(), IoError> {
    let json = teleconnect_paths::to_geojson(paths)?;
    std::fs::write(path, json).map_err(|source| IoError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), n_paths = paths.len(), crs = %paths.crs(), "paths written");
    Ok(())
}

fn add_lon_lat(file: &mut netcdf::FileMut, map: &TeleconnectionMap) -> Result<(), IoError> {
    file.add_dimension("lat", map.lat().len())?;
    file.add_dimension("lon", map.lon().len())?;
    for (name, values, units) in [
        ("lon", map.lon().values(), "degrees_east"),
        ("lat", map.lat().values(), "degrees_north"),
    ] {
        let mut var = file.add_variable::<f64>(name, &[name])?;
        var.put_attribute("units", units)?;
        var.put_values(values, ..)?;
    }
    Ok(())
}

fn put_gridded(
    file: &mut netcdf::FileMut,
    config: &WriterConfig,
    name: &str,
    dims: &[&str],
    data: &[f64],
    long_name: &str,
) -> Result<(), IoError> {
    let mut var = file.add_variable::<f64>(name, dims)?;
    if let Some(level) = config.deflate_level {
        var.set_compression(i32::from(level), true)?;
    }
    var.put_attribute("_FillValue", f64::NAN)?;
    var.put_attribute("long_name", long_name)?;
    var.put_values(data, ..)?;
    Ok(())
}

/// Flatten an `(n_lon, n_lat)` array in `(lat, lon)` order.
fn lat_major(values: ArrayView2<'_, f64>) -> Vec<f64> {
    values.t().iter().copied().collect()
}
