//! High-level NetCDF reader configuration and orchestration.

use std::path::Path;

use ndarray::Array3;
use teleconnect_grid::{Axis, SpaceTimeField};
use tracing::info;

use crate::error::IoError;
use crate::netcdf_read;

// ---------------------------------------------------------------------------
// ReaderConfig
// ---------------------------------------------------------------------------

/// Configuration for reading a gridded field from a NetCDF file.
///
/// Dimension names are matched against alias lists, first match wins. The
/// [`Default`] implementation reads variable `air` over `lon`/`lat`/`time`
/// with the common CF spellings as fallbacks.
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// NetCDF variable to read.
    variable: String,
    /// Aliases to try when matching the longitude dimension.
    lon_aliases: Vec<String>,
    /// Aliases to try when matching the latitude dimension.
    lat_aliases: Vec<String>,
    /// Aliases to try when matching the time dimension.
    time_aliases: Vec<String>,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            variable: "air".into(),
            lon_aliases: vec!["lon".into(), "longitude".into(), "x".into()],
            lat_aliases: vec!["lat".into(), "latitude".into(), "y".into()],
            time_aliases: vec!["time".into(), "t".into()],
        }
    }
}

impl ReaderConfig {
    /// Set the variable name.
    pub fn with_variable(mut self, name: impl Into<String>) -> Self {
        self.variable = name.into();
        self
    }

    /// Try `name` first when matching the longitude dimension.
    pub fn with_lon_name(mut self, name: impl Into<String>) -> Self {
        prepend(&mut self.lon_aliases, name.into());
        self
    }

    /// Try `name` first when matching the latitude dimension.
    pub fn with_lat_name(mut self, name: impl Into<String>) -> Self {
        prepend(&mut self.lat_aliases, name.into());
        self
    }

    /// Try `name` first when matching the time dimension.
    pub fn with_time_name(mut self, name: impl Into<String>) -> Self {
        prepend(&mut self.time_aliases, name.into());
        self
    }

    /// Returns the variable name.
    pub fn variable(&self) -> &str {
        &self.variable
    }

    /// Returns the longitude aliases in match order.
    pub fn lon_aliases(&self) -> &[String] {
        &self.lon_aliases
    }

    /// Returns the latitude aliases in match order.
    pub fn lat_aliases(&self) -> &[String] {
        &self.lat_aliases
    }

    /// Returns the time aliases in match order.
    pub fn time_aliases(&self) -> &[String] {
        &self.time_aliases
    }

    /// Validate that the configuration is internally consistent.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] listing every problem: an empty
    /// variable name, or a name claimed by more than one axis.
    pub fn validate(&self) -> Result<(), IoError> {
        let mut problems = Vec::new();
        if self.variable.trim().is_empty() {
            problems.push("variable name is empty".to_string());
        }
        let primary = [
            self.lon_aliases.first(),
            self.lat_aliases.first(),
            self.time_aliases.first(),
        ];
        for i in 0..primary.len() {
            for j in (i + 1)..primary.len() {
                if let (Some(a), Some(b)) = (primary[i], primary[j])
                    && a == b
                {
                    problems.push(format!("dimension name '{a}' is used for two axes"));
                }
            }
        }
        if problems.is_empty() {
            Ok(())
        } else {
            Err(IoError::Validation {
                count: problems.len(),
                details: problems.join("; "),
            })
        }
    }
}

fn prepend(aliases: &mut Vec<String>, name: String) {
    aliases.retain(|a| *a != name);
    aliases.insert(0, name);
}

// ---------------------------------------------------------------------------
// read_field
// ---------------------------------------------------------------------------

/// Read one 3-D variable from a NetCDF file as a [`SpaceTimeField`].
///
/// The variable's dimensions may appear in any order; they are matched to
/// longitude, latitude and time through the configured aliases. Coordinate
/// values come from the same-named coordinate variables. `_FillValue` and
/// `missing_value` samples become NaN; packed data is unpacked with
/// `scale_factor` / `add_offset`. Coordinates are returned as stored; the
/// pipeline normalizes them.
///
/// # Errors
///
/// Returns [`IoError`] on a missing file, variable or dimension, a variable
/// that is not 3-D, or coordinate lengths that disagree with the variable.
pub fn read_field(path: &Path, config: &ReaderConfig) -> Result<SpaceTimeField, IoError> {
    config.validate()?;

    let file = netcdf_read::open_file(path)?;
    let raw = netcdf_read::read_3d_f64(&file, &config.variable, path)?;

    let p_lon = find_dim(&raw.dims, &config.lon_aliases, &config.variable, "longitude")?;
    let p_lat = find_dim(&raw.dims, &config.lat_aliases, &config.variable, "latitude")?;
    let p_time = find_dim(&raw.dims, &config.time_aliases, &config.variable, "time")?;
    check_distinct(
        &raw.dims,
        [(p_lon, "longitude"), (p_lat, "latitude"), (p_time, "time")],
        &config.variable,
    )?;

    let lons = netcdf_read::read_coordinate(&file, &raw.dims[p_lon], raw.shape[p_lon])?;
    let lats = netcdf_read::read_coordinate(&file, &raw.dims[p_lat], raw.shape[p_lat])?;
    let times = netcdf_read::read_coordinate(&file, &raw.dims[p_time], raw.shape[p_time])?;

    let expected: usize = raw.shape.iter().product();
    let got = raw.data.len();
    let stored = Array3::from_shape_vec(raw.shape, raw.data).map_err(|_| {
        IoError::DimensionMismatch {
            name: config.variable.clone(),
            expected,
            got,
        }
    })?;
    let values = stored.permuted_axes([p_lon, p_lat, p_time]);

    let field = SpaceTimeField::new(
        config.variable.clone(),
        Axis::new(raw.dims[p_lon].clone(), lons)?,
        Axis::new(raw.dims[p_lat].clone(), lats)?,
        Axis::new(raw.dims[p_time].clone(), times)?,
        values,
    )?;

    info!(
        path = %path.display(),
        variable = field.variable(),
        n_lon = field.lon().len(),
        n_lat = field.lat().len(),
        n_times = field.n_times(),
        "field loaded"
    );
    Ok(field)
}

/// Position of the first dimension matching any alias, aliases in order.
fn find_dim(
    dims: &[String; 3],
    aliases: &[String],
    variable: &str,
    axis: &'static str,
) -> Result<usize, IoError> {
    aliases
        .iter()
        .find_map(|alias| dims.iter().position(|d| d == alias))
        .ok_or_else(|| IoError::MissingDimension {
            variable: variable.to_string(),
            axis,
            candidates: aliases.join(", "),
        })
}

/// Every axis must resolve to its own dimension.
fn check_distinct(
    dims: &[String; 3],
    positions: [(usize, &'static str); 3],
    variable: &str,
) -> Result<(), IoError> {
    for (i, &(p, first)) in positions.iter().enumerate() {
        if let Some(&(_, second)) = positions[i + 1..].iter().find(|(q, _)| *q == p) {
            return Err(IoError::AmbiguousDimension {
                variable: variable.to_string(),
                dimension: dims[p].clone(),
                first,
                second,
            });
        }
    }
    Ok(())
}
