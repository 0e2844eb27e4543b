//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Context, Result, bail};

use crate::config::*;

use teleconnect_io::{ReaderConfig, WriterConfig};
use teleconnect_pipeline::{Crs, ExtremumPolicy, TeleconnectionConfig, TiePolicy};

const MIB: usize = 1024 * 1024;

/// Parses an extremum policy name into the corresponding enum variant.
pub fn parse_extremum(s: &str) -> Result<ExtremumPolicy> {
    match s.to_lowercase().replace('_', "-").as_str() {
        "signed-minimum" | "minimum" => Ok(ExtremumPolicy::SignedMinimum),
        "magnitude-of-minimum" => Ok(ExtremumPolicy::MagnitudeOfMinimum),
        "maximum-magnitude" | "magnitude" => Ok(ExtremumPolicy::MaximumMagnitude),
        other => bail!("unknown extremum policy: {other:?}"),
    }
}

/// Parses a tie policy name into the corresponding enum variant.
pub fn parse_ties(s: &str) -> Result<TiePolicy> {
    match s.to_lowercase().replace('_', "-").as_str() {
        "first-match" | "first" => Ok(TiePolicy::FirstMatch),
        "report-all" | "all" => Ok(TiePolicy::ReportAll),
        "flag-ambiguous" | "flag" => Ok(TiePolicy::FlagAmbiguous),
        other => bail!("unknown tie policy: {other:?}"),
    }
}

/// Parses a CRS string such as `EPSG:4326` or `wgs84`.
pub fn parse_crs(s: &str) -> Result<Crs> {
    s.parse::<Crs>()
        .with_context(|| format!("invalid crs: {s:?}"))
}

/// Builds a [`ReaderConfig`] from the TOML I/O configuration.
pub fn build_reader_config(io: &IoToml) -> Result<ReaderConfig> {
    let cfg = ReaderConfig::default()
        .with_variable(&io.variable)
        .with_lon_name(&io.lon_name)
        .with_lat_name(&io.lat_name)
        .with_time_name(&io.time_name);
    cfg.validate().context("invalid [io] reader settings")?;
    Ok(cfg)
}

/// Builds a [`WriterConfig`] from the TOML I/O configuration.
pub fn build_writer_config(io: &IoToml) -> Result<WriterConfig> {
    let cfg = WriterConfig::default().with_deflate_level(io.deflate_level);
    cfg.validate().context("invalid [io] writer settings")?;
    Ok(cfg)
}

/// Builds a [`TeleconnectionConfig`] from the TOML reduction and
/// diagnostics sections.
pub fn build_teleconnection_config(
    t: &TeleconnectionToml,
    diagnostics: &DiagnosticsToml,
) -> Result<TeleconnectionConfig> {
    let memory_limit = match t.memory_limit_mib {
        Some(0) => bail!("memory_limit_mib must be positive"),
        Some(mib) => Some(mib.saturating_mul(MIB)),
        None => None,
    };
    let cfg = TeleconnectionConfig::default()
        .with_threshold(t.threshold)
        .with_extremum(parse_extremum(&t.extremum)?)
        .with_ties(parse_ties(&t.ties)?)
        .with_crs(parse_crs(&t.crs)?)
        .with_progress(t.progress)
        .with_retain_maps(t.retain_maps)
        .with_memory_limit(memory_limit)
        .with_diagnostics(diagnostics.enabled);
    cfg.validate().context("invalid [teleconnection] settings")?;
    Ok(cfg)
}
