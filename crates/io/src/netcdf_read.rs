//! Low-level NetCDF extraction helpers.

use std::path::Path;

use netcdf::AttributeValue;
use tracing::{debug, warn};

use crate::error::IoError;

/// Open a NetCDF file at `path`, returning [`IoError::FileNotFound`] if the
/// path does not exist on disk.
pub(crate) fn open_file(path: &Path) -> Result<netcdf::File, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(netcdf::open(path)?)
}

/// Read a 1-D `f64` coordinate variable named `name`.
///
/// Falls back to `0..len` when the file has no coordinate variable for the
/// dimension.
pub(crate) fn read_coordinate(
    file: &netcdf::File,
    name: &str,
    len: usize,
) -> Result<Vec<f64>, IoError> {
    match file.variable(name) {
        Some(var) => {
            let values = var.get_values::<f64, _>(..)?;
            if values.len() != len {
                return Err(IoError::DimensionMismatch {
                    name: name.to_string(),
                    expected: len,
                    got: values.len(),
                });
            }
            Ok(values)
        }
        None => {
            warn!(dimension = name, "no coordinate variable, using indices");
            Ok((0..len).map(|i| i as f64).collect())
        }
    }
}

/// A 3-D variable read in its on-disk dimension order.
pub(crate) struct RawVariable {
    /// Flattened values, row-major over `dims`.
    pub data: Vec<f64>,
    /// Dimension names in storage order.
    pub dims: [String; 3],
    /// Dimension lengths in storage order.
    pub shape: [usize; 3],
}

/// Read a 3-D variable, masking `_FillValue` / `missing_value` to NaN and
/// applying `scale_factor` / `add_offset` when present.
pub(crate) fn read_3d_f64(
    file: &netcdf::File,
    var_name: &str,
    path: &Path,
) -> Result<RawVariable, IoError> {
    let var = file
        .variable(var_name)
        .ok_or_else(|| IoError::MissingVariable {
            name: var_name.to_string(),
            path: path.to_path_buf(),
        })?;

    let dims = var.dimensions();
    if dims.len() != 3 {
        return Err(IoError::DimensionMismatch {
            name: format!("{var_name} dimensions"),
            expected: 3,
            got: dims.len(),
        });
    }
    let names = [dims[0].name(), dims[1].name(), dims[2].name()];
    let shape = [dims[0].len(), dims[1].len(), dims[2].len()];

    let mut data = var.get_values::<f64, _>(..)?;

    let mut sentinels = numeric_attribute(&var, "_FillValue");
    sentinels.extend(numeric_attribute(&var, "missing_value"));
    let scale = numeric_attribute(&var, "scale_factor").first().copied();
    let offset = numeric_attribute(&var, "add_offset").first().copied();

    let n_masked = mask_and_unpack(&mut data, &sentinels, scale, offset);
    debug!(
        variable = var_name,
        ?shape,
        n_masked,
        "read 3-D variable"
    );

    Ok(RawVariable {
        data,
        dims: names,
        shape,
    })
}

/// Replace sentinel samples with NaN, then unpack `raw * scale + offset`.
/// Returns the number of masked samples.
pub(crate) fn mask_and_unpack(
    data: &mut [f64],
    sentinels: &[f64],
    scale: Option<f64>,
    offset: Option<f64>,
) -> usize {
    let mut n_masked = 0;
    let scale = scale.unwrap_or(1.0);
    let offset = offset.unwrap_or(0.0);
    for x in data.iter_mut() {
        if sentinels.contains(x) {
            *x = f64::NAN;
            n_masked += 1;
        } else {
            *x = *x * scale + offset;
        }
    }
    n_masked
}

/// Numeric attribute values as `f64`; empty when absent or non-numeric.
fn numeric_attribute(var: &netcdf::Variable<'_>, name: &str) -> Vec<f64> {
    let Some(Ok(value)) = var.attribute_value(name) else {
        return Vec::new();
    };
    match value {
        AttributeValue::Double(v) => vec![v],
        AttributeValue::Doubles(v) => v,
        AttributeValue::Float(v) => vec![f64::from(v)],
        AttributeValue::Floats(v) => v.into_iter().map(f64::from).collect(),
        AttributeValue::Int(v) => vec![f64::from(v)],
        AttributeValue::Ints(v) => v.into_iter().map(f64::from).collect(),
        AttributeValue::Short(v) => vec![f64::from(v)],
        AttributeValue::Shorts(v) => v.into_iter().map(f64::from).collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_replaces_every_sentinel() {
        let mut data = vec![1.0, -9999.0, 3.0, 1e20];
        let n = mask_and_unpack(&mut data, &[-9999.0, 1e20], None, None);
        assert_eq!(n, 2);
        assert_eq!(data[0], 1.0);
        assert!(data[1].is_nan());
        assert_eq!(data[2], 3.0);
        assert!(data[3].is_nan());
    }

    #[test]
    fn unpack_applies_scale_then_offset() {
        let mut data = vec![10.0, 20.0, 32767.0];
        let n = mask_and_unpack(&mut data, &[32767.0], Some(0.5), Some(100.0));
        assert_eq!(n, 1);
        assert_eq!(data[0], 105.0);
        assert_eq!(data[1], 110.0);
        assert!(data[2].is_nan());
    }

    #[test]
    fn no_attributes_is_identity() {
        let mut data = vec![1.5, f64::NAN];
        let n = mask_and_unpack(&mut data, &[], None, None);
        assert_eq!(n, 0);
        assert_eq!(data[0], 1.5);
        assert!(data[1].is_nan());
    }
}
