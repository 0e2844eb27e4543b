use std::path::PathBuf;

use serde::Deserialize;

/// Top-level teleconnect configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TeleconnectConfig {
    /// I/O settings.
    #[serde(default)]
    pub io: IoToml,

    /// Reduction settings.
    #[serde(default)]
    pub teleconnection: TeleconnectionToml,

    /// Per-origin diagnostic figures.
    #[serde(default)]
    pub diagnostics: DiagnosticsToml,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IoToml {
    pub input: Option<PathBuf>,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "default_variable")]
    pub variable: String,
    #[serde(default = "default_lon_name")]
    pub lon_name: String,
    #[serde(default = "default_lat_name")]
    pub lat_name: String,
    #[serde(default = "default_time_name")]
    pub time_name: String,
    #[serde(default)]
    pub deflate_level: Option<u8>,
}

impl Default for IoToml {
    fn default() -> Self {
        Self {
            input: None,
            output_dir: default_output_dir(),
            variable: default_variable(),
            lon_name: default_lon_name(),
            lat_name: default_lat_name(),
            time_name: default_time_name(),
            deflate_level: None,
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}
fn default_variable() -> String {
    "air".to_string()
}
fn default_lon_name() -> String {
    "lon".to_string()
}
fn default_lat_name() -> String {
    "lat".to_string()
}
fn default_time_name() -> String {
    "time".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TeleconnectionToml {
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    #[serde(default = "default_extremum")]
    pub extremum: String,
    #[serde(default = "default_ties")]
    pub ties: String,
    #[serde(default = "default_crs")]
    pub crs: String,
    #[serde(default)]
    pub progress: bool,
    #[serde(default)]
    pub retain_maps: bool,
    /// Dense correlation matrix limit in MiB.
    #[serde(default)]
    pub memory_limit_mib: Option<usize>,
}

impl Default for TeleconnectionToml {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            extremum: default_extremum(),
            ties: default_ties(),
            crs: default_crs(),
            progress: false,
            retain_maps: false,
            memory_limit_mib: None,
        }
    }
}

fn default_threshold() -> f64 {
    teleconnect_pipeline::DEFAULT_THRESHOLD
}
fn default_extremum() -> String {
    "signed-minimum".to_string()
}
fn default_ties() -> String {
    "first-match".to_string()
}
fn default_crs() -> String {
    "EPSG:4326".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DiagnosticsToml {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_diagnostics_dir")]
    pub dir: PathBuf,
}

impl Default for DiagnosticsToml {
    fn default() -> Self {
        Self {
            enabled: false,
            dir: default_diagnostics_dir(),
        }
    }
}

fn default_diagnostics_dir() -> PathBuf {
    PathBuf::from("diagnostics")
}
