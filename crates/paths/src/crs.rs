//! Coordinate reference system tag carried by path collections.

use std::fmt;
use std::str::FromStr;

use crate::error::PathError;

const WGS84_EPSG: u32 = 4326;

/// Coordinate reference system of path geometry.
///
/// Paths are built from grid coordinates taken as planar lon/lat, so the
/// CRS is a declaration for downstream consumers, never a reprojection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Crs {
    /// WGS84 geographic coordinates (EPSG:4326).
    #[default]
    Wgs84,
    /// Any other EPSG code.
    Epsg(u32),
    /// A free-form CRS name, emitted verbatim.
    Named(String),
}

impl Crs {
    /// EPSG code, when the CRS has one.
    pub fn epsg(&self) -> Option<u32> {
        match self {
            Self::Wgs84 => Some(WGS84_EPSG),
            Self::Epsg(code) => Some(*code),
            Self::Named(_) => None,
        }
    }

    /// Name used in the GeoJSON `crs` member.
    pub fn urn(&self) -> String {
        match self.epsg() {
            Some(code) => format!("urn:ogc:def:crs:EPSG::{code}"),
            None => self.to_string(),
        }
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wgs84 => write!(f, "EPSG:{WGS84_EPSG}"),
            Self::Epsg(code) => write!(f, "EPSG:{code}"),
            Self::Named(name) => f.write_str(name),
        }
    }
}

impl FromStr for Crs {
    type Err = PathError;

    /// Parses `WGS84`, `EPSG:<code>` (case-insensitive) or any other
    /// non-empty name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(PathError::InvalidCrs {
                value: s.to_string(),
                reason: "empty name".to_string(),
            });
        }
        if trimmed.eq_ignore_ascii_case("wgs84") {
            return Ok(Self::Wgs84);
        }
        let upper = trimmed.to_ascii_uppercase();
        if let Some(code) = upper.strip_prefix("EPSG:") {
            let code: u32 = code.parse().map_err(|_| PathError::InvalidCrs {
                value: s.to_string(),
                reason: "code is not a number".to_string(),
            })?;
            return Ok(if code == WGS84_EPSG {
                Self::Wgs84
            } else {
                Self::Epsg(code)
            });
        }
        Ok(Self::Named(trimmed.to_string()))
    }
}
